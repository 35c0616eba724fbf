// e2e/roundtrip.rs: library round trips through the public reader API
//
// Streams from the reference encoder are decoded with awkward read sizes and
// with sources that hand out a few bytes at a time, across widths, block
// modes and periodic clears.

#[path = "../tests/common/lzw_encoder.rs"]
mod lzw_encoder;

use std::io::{self, Read};

use lzw_encoder::{compress, noise, text_corpus, EncoderOptions};
use unlzw::{uncompress, UncompressReader};

/// Source that returns at most `step` bytes per read, cycling through sizes.
struct Dribble<'a> {
    data: &'a [u8],
    steps: &'a [usize],
    i: usize,
}

impl Read for Dribble<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let step = self.steps[self.i % self.steps.len()];
        self.i += 1;
        let n = step.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fn decode_in_chunks<R: Read>(src: R, chunk: usize) -> Vec<u8> {
    let mut r = UncompressReader::new(src).unwrap();
    let mut out = Vec::new();
    let mut buf = vec![0u8; chunk];
    loop {
        let n = r.read(&mut buf).unwrap();
        if n == 0 {
            return out;
        }
        out.extend_from_slice(&buf[..n]);
    }
}

fn samples() -> Vec<(&'static str, Vec<u8>)> {
    vec![
        ("text", text_corpus(250_000, 42)),
        ("noise", noise(90_000, 42)),
        ("mixed", {
            let mut v = text_corpus(40_000, 1);
            v.extend(noise(40_000, 2));
            v.extend(vec![0u8; 40_000]);
            v.extend(text_corpus(40_000, 3));
            v
        }),
    ]
}

#[test]
fn test_roundtrip_every_width_and_mode() {
    for (name, data) in samples() {
        for bits in [9, 10, 12, 13, 15, 16] {
            for block_mode in [true, false] {
                let opts = EncoderOptions { block_mode, ..EncoderOptions::bits(bits) };
                let z = compress(&data, opts);
                let mut out = Vec::new();
                uncompress(&z[..], &mut out).unwrap();
                assert!(out == data, "{name}: bits {bits}, block {block_mode}");
            }
        }
    }
}

#[test]
fn test_roundtrip_odd_read_sizes() {
    let data = text_corpus(120_000, 5);
    let z = compress(&data, EncoderOptions::bits(14));
    for chunk in [1, 3, 7, 64, 4_095, 100_000, 1 << 20] {
        assert!(decode_in_chunks(&z[..], chunk) == data, "chunk {chunk}");
    }
}

#[test]
fn test_roundtrip_trickling_source() {
    let data = text_corpus(80_000, 8);
    let opts = EncoderOptions { clear_every: Some(20_000), ..EncoderOptions::bits(12) };
    let z = compress(&data, opts);
    let plans: [&[usize]; 4] = [&[1], &[2, 5, 1], &[9, 13, 64, 3], &[10_001]];
    for steps in plans {
        let src = Dribble { data: &z, steps, i: 0 };
        assert!(decode_in_chunks(src, 777) == data, "steps {steps:?}");
    }
}

#[test]
fn test_roundtrip_periodic_clears() {
    let data = text_corpus(300_000, 77);
    for every in [1_000, 9_999, 65_536] {
        let opts = EncoderOptions { clear_every: Some(every), ..EncoderOptions::default() };
        let z = compress(&data, opts);
        let mut out = Vec::new();
        uncompress(&z[..], &mut out).unwrap();
        assert!(out == data, "clear every {every}");
    }
}

#[test]
fn test_roundtrip_tiny_inputs() {
    for len in 0..40 {
        let data: Vec<u8> = (0..len).map(|i| b"aab"[i % 3]).collect();
        let z = compress(&data, EncoderOptions::default());
        assert_eq!(decode_in_chunks(&z[..], 5), data, "len {len}");
    }
}
