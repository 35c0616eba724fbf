// e2e/error_handling.rs: damaged streams through the library and file API
//
// Nothing here may panic: every damaged stream must end in either a clean end
// of stream or an `InvalidData` error, after a correct prefix of the output.

#[path = "../tests/common/lzw_encoder.rs"]
mod lzw_encoder;

use std::io::{self, Read};

use lzw_encoder::{compress, noise, text_corpus, EncoderOptions};
use unlzw::io::{decompress_filename, Prefs};
use unlzw::lzw::lzw_error_of;
use unlzw::UncompressReader;

/// Decodes as far as possible; returns the output and the error, if any.
fn decode_lossy(z: &[u8]) -> (Vec<u8>, Option<io::Error>) {
    let mut r = match UncompressReader::new(z) {
        Ok(r) => r,
        Err(e) => return (Vec::new(), Some(e)),
    };
    let mut out = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        match r.read(&mut buf) {
            Ok(0) => return (out, None),
            Ok(n) => out.extend_from_slice(&buf[..n]),
            Err(e) => return (out, Some(e)),
        }
    }
}

#[test]
fn test_truncation_at_every_offset() {
    let data = text_corpus(3_000, 10);
    let z = compress(&data, EncoderOptions::bits(10));
    for cut in 0..z.len() {
        let (out, err) = decode_lossy(&z[..cut]);
        if cut < 3 {
            let e = err.expect("short header must fail");
            assert_eq!(e.kind(), io::ErrorKind::InvalidData);
            continue;
        }
        assert!(out.len() <= data.len());
        assert!(out[..] == data[..out.len()], "cut {cut}: output is not a prefix");
        if let Some(e) = err {
            assert!(lzw_error_of(&e).is_some(), "cut {cut}: {e}");
        }
    }
}

#[test]
fn test_bit_flips_never_panic() {
    let data = text_corpus(40_000, 3);
    let z = compress(&data, EncoderOptions::default());
    for i in 3..z.len().min(600) {
        for bit in [0x01u8, 0x10, 0x80] {
            let mut bad = z.clone();
            bad[i] ^= bit;
            let (out, err) = decode_lossy(&bad);
            if let Some(e) = err {
                assert_eq!(e.kind(), io::ErrorKind::InvalidData);
            }
            // A flipped code may still be in range; the output just differs.
            let _ = out;
        }
    }
}

#[test]
fn test_garbage_bodies_never_panic() {
    for bits in 9..=16u8 {
        for seed in 1..6 {
            let mut z = vec![0x1F, 0x9D, 0x80 | bits];
            z.extend(noise(5_000, seed * 31 + bits as u64));
            let (_, err) = decode_lossy(&z);
            if let Some(e) = err {
                assert_eq!(e.kind(), io::ErrorKind::InvalidData);
            }
        }
    }
}

#[test]
fn test_file_api_reports_and_cleans_up() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("cut.Z");
    let z = compress(&text_corpus(50_000, 4), EncoderOptions::default());
    let mut bad = z[..z.len() / 2].to_vec();
    bad.extend(vec![0xFF; 64]);
    std::fs::write(&src, &bad).unwrap();
    let dst = dir.path().join("cut");

    let mut prefs = Prefs::new();
    prefs.set_overwrite(true);
    match decompress_filename(src.to_str().unwrap(), dst.to_str().unwrap(), &prefs) {
        Ok(_) => assert!(dst.exists()),
        Err(e) => {
            assert_eq!(e.kind(), io::ErrorKind::InvalidData);
            assert!(!dst.exists(), "partial output must be removed");
        }
    }
}

#[test]
fn test_directory_as_source() {
    let dir = tempfile::tempdir().unwrap();
    let mut prefs = Prefs::new();
    prefs.set_overwrite(true);
    let dst = dir.path().join("out");
    let err = decompress_filename(dir.path().to_str().unwrap(), dst.to_str().unwrap(), &prefs)
        .unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    assert!(!dst.exists());
}
