// Header validation through `parse_header`, `read_header` and the reader.

use std::io::{self, Read};

use unlzw::lzw::{lzw_error_of, parse_header, read_header};
use unlzw::{Header, LzwError, UncompressReader};

fn open_err(bytes: &[u8]) -> LzwError {
    let err = UncompressReader::new(bytes).err().expect("header must be rejected");
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    lzw_error_of(&err).expect("error carries an LzwError")
}

#[test]
fn accepts_every_legal_width() {
    for bits in 9..=16u8 {
        let h = parse_header(&[0x1F, 0x9D, 0x80 | bits]).unwrap();
        assert_eq!(h, Header { magic: 0x1F9D, flags: 0x80 | bits, block_mode: true, max_bits: bits as u32 });
        let h = parse_header(&[0x1F, 0x9D, bits]).unwrap();
        assert!(!h.block_mode);
    }
}

#[test]
fn zero_magic_is_bad_magic() {
    assert_eq!(open_err(&[0x00, 0x00, 0x90]), LzwError::BadMagic { found: 0 });
}

#[test]
fn gzip_magic_is_bad_magic() {
    assert_eq!(open_err(&[0x1F, 0x8B, 0x08]), LzwError::BadMagic { found: 0x1F8B });
}

#[test]
fn short_inputs_are_truncated() {
    assert_eq!(open_err(&[]), LzwError::TruncatedHeader);
    assert_eq!(open_err(&[0x1F, 0x9D]), LzwError::TruncatedHeader);
}

#[test]
fn reserved_bits_are_rejected() {
    assert_eq!(open_err(&[0x1F, 0x9D, 0xB0]), LzwError::UnsupportedExtension { flags: 0xB0 });
    assert_eq!(open_err(&[0x1F, 0x9D, 0x50]), LzwError::UnsupportedExtension { flags: 0x50 });
}

#[test]
fn width_limits() {
    assert_eq!(open_err(&[0x1F, 0x9D, 0x91]), LzwError::ExcessiveWidth { max_bits: 17 });
    assert_eq!(open_err(&[0x1F, 0x9D, 0x88]), LzwError::InsufficientWidth { max_bits: 8 });
    assert_eq!(open_err(&[0x1F, 0x9D, 0x00]), LzwError::InsufficientWidth { max_bits: 0 });
}

#[test]
fn magic_is_checked_before_flags() {
    assert_eq!(open_err(&[0x1F, 0x9E, 0xFF]), LzwError::BadMagic { found: 0x1F9E });
}

#[test]
fn messages_name_the_problem() {
    let msg = open_err(&[0x1F, 0x9D, 0x91]).to_string();
    assert!(msg.contains("17 bits"), "{msg}");
    assert_eq!(LzwError::TruncatedHeader.kind_name(), "TruncatedHeader");
}

/// Hands out one byte per call and interrupts every other call.
struct Trickle<'a> {
    data: &'a [u8],
    interrupt: bool,
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.interrupt = !self.interrupt;
        if self.interrupt {
            return Err(io::Error::from(io::ErrorKind::Interrupted));
        }
        match self.data.split_first() {
            Some((&b, rest)) if !buf.is_empty() => {
                buf[0] = b;
                self.data = rest;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

#[test]
fn read_header_retries_interrupted_reads() {
    let mut src = Trickle { data: &[0x1F, 0x9D, 0x8C, 0xAA], interrupt: false };
    let h = read_header(&mut src).unwrap();
    assert_eq!(h.max_bits, 12);
    assert_eq!(src.data, &[0xAA]);
}

struct Broken;

impl Read for Broken {
    fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
    }
}

#[test]
fn source_errors_pass_through_unchanged() {
    let err = UncompressReader::new(Broken).err().unwrap();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    assert!(lzw_error_of(&err).is_none());
}
