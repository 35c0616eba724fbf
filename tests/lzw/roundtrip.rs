// Round trips through the reference encoder at every legal width, in both
// block and non-block mode, plus code-width bookkeeping.

use std::io::Read;

use unlzw::{uncompress, UncompressReader};

use crate::lzw_encoder::{compress, compress_traced, noise, text_corpus, EncoderOptions};

fn unz(z: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    uncompress(z, &mut out).unwrap();
    out
}

#[test]
fn empty_input_is_header_only() {
    let z = compress(b"", EncoderOptions::default());
    assert_eq!(z, [0x1F, 0x9D, 0x90]);
    assert!(unz(&z).is_empty());
}

#[test]
fn single_byte() {
    let z = compress(b"Q", EncoderOptions::default());
    assert_eq!(z.len(), 5);
    assert_eq!(unz(&z), b"Q");
}

#[test]
fn eight_literals_fill_one_group_exactly() {
    let z = compress(b"abcdefgh", EncoderOptions::default());
    assert_eq!(z.len(), 3 + 9);
    assert_eq!(unz(&z), b"abcdefgh");
}

#[test]
fn every_width_block_mode() {
    let data = text_corpus(200_000, 7);
    for bits in 9..=16 {
        let z = compress(&data, EncoderOptions::bits(bits));
        assert_eq!(z[2], 0x80 | bits as u8);
        assert_eq!(unz(&z), data, "max_bits {bits}");
    }
}

#[test]
fn every_width_non_block_mode() {
    let data = text_corpus(120_000, 11);
    for bits in 9..=16 {
        let opts = EncoderOptions { block_mode: false, ..EncoderOptions::bits(bits) };
        let z = compress(&data, opts);
        assert_eq!(z[2], bits as u8);
        assert_eq!(unz(&z), data, "max_bits {bits}");
    }
}

#[test]
fn frozen_table_keeps_decoding() {
    // Without clears the dictionary fills up and stays fixed.
    let data = noise(60_000, 3);
    let opts = EncoderOptions { clear_when_full: false, ..EncoderOptions::bits(10) };
    let z = compress(&data, opts);
    let mut r = UncompressReader::new(&z[..]).unwrap();
    let mut out = Vec::new();
    r.read_to_end(&mut out).unwrap();
    assert_eq!(out, data);
    assert_eq!(r.free_ent(), 1 << 10);
    assert_eq!(r.code_width(), 10);
}

#[test]
fn nine_bit_table_stops_at_capacity() {
    let data = noise(10_000, 5);
    let opts = EncoderOptions { clear_when_full: false, ..EncoderOptions::bits(9) };
    let (z, trace) = compress_traced(&data, opts);
    assert!(trace.iter().all(|&(_, w)| w == 9));
    let mut r = UncompressReader::new(&z[..]).unwrap();
    let mut out = Vec::new();
    r.read_to_end(&mut out).unwrap();
    assert_eq!(out, data);
    assert_eq!(r.free_ent(), 512);
    assert_eq!(r.code_width(), 9);
}

#[test]
fn widths_only_grow_without_clears() {
    let data = noise(300_000, 9);
    let opts = EncoderOptions { clear_when_full: false, ..EncoderOptions::default() };
    let (z, trace) = compress_traced(&data, opts);
    assert!(trace.windows(2).all(|w| w[0].1 <= w[1].1));
    assert_eq!(trace.first().map(|t| t.1), Some(9));
    assert_eq!(trace.last().map(|t| t.1), Some(16));
    assert_eq!(unz(&z), data);
}

#[test]
fn random_data_with_clears_when_full() {
    let data = noise(400_000, 21);
    let (z, trace) = compress_traced(&data, EncoderOptions::bits(12));
    assert!(trace.iter().filter(|&&(c, _)| c == 256).count() > 1);
    assert_eq!(unz(&z), data);
}

#[test]
fn long_runs_exercise_kwk() {
    let mut data = vec![b'z'; 100_000];
    data.extend(std::iter::repeat(0u8).take(70_000));
    data.extend_from_slice(b"tail");
    let z = compress(&data, EncoderOptions::default());
    assert!(z.len() < data.len() / 50);
    assert_eq!(unz(&z), data);
}

#[test]
fn all_byte_values() {
    let data: Vec<u8> = (0..=255u8).cycle().take(256 * 40).collect();
    for bits in [9, 12, 16] {
        assert_eq!(unz(&compress(&data, EncoderOptions::bits(bits))), data);
    }
}
