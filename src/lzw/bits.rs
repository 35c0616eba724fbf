//! Fixed-width code extraction from the little-endian bitstream.

/// Reads the `n_bits`-wide code starting at bit offset `bit_pos`.
///
/// Loads the 3-byte little-endian window at `bit_pos >> 3`. `n_bits` is at
/// most 16, so `n_bits + 7` always fits in those 24 bits. The caller keeps
/// `bit_pos >> 3` at least 2 bytes short of `data.len()`.
#[inline]
pub fn read_code(data: &[u8], bit_pos: usize, n_bits: u32) -> u32 {
    let p = bit_pos >> 3;
    let window = u32::from(data[p]) | u32::from(data[p + 1]) << 8 | u32::from(data[p + 2]) << 16;
    (window >> (bit_pos & 7)) & ((1u32 << n_bits) - 1)
}

/// Rounds `bit_pos` up to the next code-group boundary for width `n_bits`.
///
/// A group is 8 codes, i.e. `n_bits` bytes. Position 0 and positions already
/// on a boundary are returned unchanged.
#[inline]
pub fn align_to_group(bit_pos: usize, n_bits: u32) -> usize {
    if bit_pos == 0 {
        return 0;
    }
    let group = n_bits as usize * 8;
    let last = bit_pos - 1;
    last + group - (last + group) % group
}
