// Block-mode clear codes, hand-assembled and from the encoder.

use std::io::Read;

use unlzw::lzw::DecodeState;
use unlzw::UncompressReader;

use crate::lzw_encoder::{compress_traced, text_corpus, EncoderOptions, RawStream};

fn c(b: u8) -> u32 {
    b as u32
}

#[test]
fn clear_mid_stream_resets_table() {
    let z = RawStream::new(0x90)
        .codes(&[c(b'a'), c(b'b'), 257, 256], 9)
        .pad(9)
        .codes(&[c(b'c'), c(b'd'), 257], 9)
        .finish();
    // Header, one padded 9-byte group, then three more codes.
    assert_eq!(z.len(), 3 + 9 + 4);

    let mut r = UncompressReader::new(&z[..]).unwrap();
    let mut out = Vec::new();
    r.read_to_end(&mut out).unwrap();
    assert_eq!(out, b"ababcdcd");
    // 257 now means "cd", and one more entry ("dc") was added after it.
    assert_eq!(r.free_ent(), 259);
    assert_eq!(r.code_width(), 9);
    assert_eq!(r.state(), DecodeState::Eof);
}

#[test]
fn clear_at_wider_width_drops_back_to_nine_bits() {
    let data = text_corpus(150_000, 13);
    let opts = EncoderOptions { clear_every: Some(40_000), ..EncoderOptions::default() };
    let (z, trace) = compress_traced(&data, opts);

    let clears: Vec<usize> = trace
        .iter()
        .enumerate()
        .filter(|(_, &(code, _))| code == 256)
        .map(|(i, _)| i)
        .collect();
    assert!(!clears.is_empty());
    for &i in &clears {
        assert!(trace[i].1 > 9, "clear sent at width {}", trace[i].1);
        assert_eq!(trace[i + 1].1, 9);
    }

    let mut out = Vec::new();
    UncompressReader::new(&z[..]).unwrap().read_to_end(&mut out).unwrap();
    assert_eq!(out, data);
}

#[test]
fn widths_never_decrease_between_clears() {
    let data = text_corpus(200_000, 17);
    let (_, trace) = compress_traced(&data, EncoderOptions::bits(11));
    for w in trace.windows(2) {
        let ((_, w0), (code1, w1)) = (w[0], w[1]);
        if w[0].0 != 256 {
            assert!(w1 >= w0, "width dropped without a clear before code {code1}");
        }
        assert!(w1 <= 11);
    }
}

#[test]
fn non_block_mode_treats_256_as_data() {
    let z = RawStream::new(0x10).codes(&[c(b'x'), c(b'y'), 256, 257], 9).finish();
    let mut out = Vec::new();
    UncompressReader::new(&z[..]).unwrap().read_to_end(&mut out).unwrap();
    // 256 = "xy", 257 = "yx".
    assert_eq!(out, b"xyxyyx");
}
