//! The adaptive LZW dictionary.

use crate::lzw::types::{Header, LITERALS};

/// Prefix/suffix arrays indexed by code, plus the next free slot.
///
/// Literal codes `0..256` map to themselves and are never reassigned. Every
/// assigned code `c >= 256` has `prefix[c] < c`, so chain walks terminate.
pub struct CodeTable {
    prefix: Box<[u16]>,
    suffix: Box<[u8]>,
    free_ent: u32,
    first_free: u32,
    capacity: u32,
}

impl CodeTable {
    pub fn new(header: &Header) -> Self {
        let capacity = header.max_max_code();
        let mut suffix = vec![0u8; capacity as usize].into_boxed_slice();
        for (c, s) in suffix.iter_mut().take(LITERALS as usize).enumerate() {
            *s = c as u8;
        }
        CodeTable {
            prefix: vec![0u16; capacity as usize].into_boxed_slice(),
            suffix,
            free_ent: header.first_free(),
            first_free: header.first_free(),
            capacity,
        }
    }

    #[inline]
    pub fn free_ent(&self) -> u32 {
        self.free_ent
    }

    /// `1 << max_bits`.
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.free_ent >= self.capacity
    }

    #[inline]
    pub fn prefix(&self, code: u32) -> u32 {
        u32::from(self.prefix[code as usize])
    }

    #[inline]
    pub fn suffix(&self, code: u32) -> u8 {
        self.suffix[code as usize]
    }

    /// Assigns the next free code, unless the table is frozen.
    ///
    /// Returns `false` once the table is full; that is not an error.
    pub fn add(&mut self, prefix: u32, suffix: u8) -> bool {
        if self.is_full() {
            return false;
        }
        let slot = self.free_ent as usize;
        self.prefix[slot] = prefix as u16;
        self.suffix[slot] = suffix;
        self.free_ent += 1;
        true
    }

    /// Forgets every assigned code.
    pub fn clear(&mut self) {
        self.free_ent = self.first_free;
    }
}
