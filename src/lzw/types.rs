//! LZW container constants, the decoded stream header, and the error type.
//!
//! Covers:
//! - Header constants (`LZW_MAGIC`, flag-byte masks, width limits)
//! - Code-space constants (`TBL_CLEAR`, `TBL_FIRST`)
//! - Source window sizing (`BUF_SIZE`, `EXTRA`)
//! - `Header` (decoded 3-byte stream header)
//! - `LzwError` with hand-written `Display` + `Error` impls, and its
//!   conversion into `std::io::Error`

use core::fmt;
use std::io;

// ─────────────────────────────────────────────────────────────────────────────
// Header constants
// ─────────────────────────────────────────────────────────────────────────────

/// Big-endian 16-bit magic at the start of every `.Z` stream (`1F 9D`).
pub const LZW_MAGIC: u16 = 0x1F9D;

/// Size of the fixed stream header in bytes (2 magic + 1 flags).
pub const HEADER_SIZE: usize = 3;

/// Flags byte: low 5 bits carry the maximum code width.
pub const HDR_MAXBITS: u8 = 0x1F;
/// Flags byte: extended header, never produced by any known encoder.
pub const HDR_EXTENDED: u8 = 0x20;
/// Flags byte: reserved bit.
pub const HDR_FREE: u8 = 0x40;
/// Flags byte: block mode (code 256 clears the table).
pub const HDR_BLOCK_MODE: u8 = 0x80;

/// Initial code width.
pub const INIT_BITS: u32 = 9;
/// Largest code width accepted in the header.
pub const MAX_BITS: u32 = 16;

// ─────────────────────────────────────────────────────────────────────────────
// Code space
// ─────────────────────────────────────────────────────────────────────────────

/// Number of literal codes (0..=255).
pub const LITERALS: u32 = 256;
/// Table-clear code, only meaningful in block mode.
pub const TBL_CLEAR: u32 = 256;
/// First assignable code in block mode.
pub const TBL_FIRST: u32 = 257;

// ─────────────────────────────────────────────────────────────────────────────
// Source window sizing
// ─────────────────────────────────────────────────────────────────────────────

/// Fill limit of the source window.
pub const BUF_SIZE: usize = 10_000;
/// Slack past `BUF_SIZE` so that a 3-byte code window never leaves the buffer.
pub const EXTRA: usize = 64;

// ─────────────────────────────────────────────────────────────────────────────
// Header
// ─────────────────────────────────────────────────────────────────────────────

/// Decoded `.Z` stream header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Leading magic; always `LZW_MAGIC` once parsed.
    pub magic: u16,
    /// Raw flags byte as found in the stream.
    pub flags: u8,
    /// Code 256 resets the dictionary.
    pub block_mode: bool,
    /// Maximum code width, 9..=16.
    pub max_bits: u32,
}

impl Header {
    /// Dictionary capacity, `1 << max_bits`.
    #[inline]
    pub fn max_max_code(&self) -> u32 {
        1 << self.max_bits
    }

    /// First code allocated after open (and after each clear).
    #[inline]
    pub fn first_free(&self) -> u32 {
        if self.block_mode {
            TBL_FIRST
        } else {
            LITERALS
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// LzwError
// ─────────────────────────────────────────────────────────────────────────────

/// Format errors raised while opening or decoding a `.Z` stream.
///
/// Every variant is terminal for the stream that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LzwError {
    /// Fewer than 3 header bytes were available.
    TruncatedHeader,
    /// The first two bytes are not `1F 9D`.
    BadMagic { found: u16 },
    /// Extended-header or reserved bit set in the flags byte.
    UnsupportedExtension { flags: u8 },
    /// Header asks for codes wider than 16 bits.
    ExcessiveWidth { max_bits: u32 },
    /// Header asks for codes narrower than the 9-bit starting width.
    InsufficientWidth { max_bits: u32 },
    /// A decoded code violates the table state.
    CorruptCode { code: u32, free_ent: u32 },
}

impl LzwError {
    /// Short stable identifier for the error kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            LzwError::TruncatedHeader => "TruncatedHeader",
            LzwError::BadMagic { .. } => "BadMagic",
            LzwError::UnsupportedExtension { .. } => "UnsupportedExtension",
            LzwError::ExcessiveWidth { .. } => "ExcessiveWidth",
            LzwError::InsufficientWidth { .. } => "InsufficientWidth",
            LzwError::CorruptCode { .. } => "CorruptCode",
        }
    }
}

impl fmt::Display for LzwError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            LzwError::TruncatedHeader => f.write_str("truncated header: fewer than 3 bytes"),
            LzwError::BadMagic { found } => {
                write!(f, "bad magic 0x{found:04x} (expected 0x{LZW_MAGIC:04x})")
            }
            LzwError::UnsupportedExtension { flags } => {
                write!(f, "unsupported header extension (flags 0x{flags:02x})")
            }
            LzwError::ExcessiveWidth { max_bits } => {
                write!(f, "compressed with {max_bits} bits, can only handle {MAX_BITS} bits")
            }
            LzwError::InsufficientWidth { max_bits } => {
                write!(f, "compressed with {max_bits} bits, need at least {INIT_BITS} bits")
            }
            LzwError::CorruptCode { code, free_ent } => {
                write!(f, "corrupt input: code={code}, free_ent={free_ent}")
            }
        }
    }
}

impl std::error::Error for LzwError {}

impl From<LzwError> for io::Error {
    fn from(e: LzwError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, e)
    }
}

/// Recovers the `LzwError` carried by an `io::Error`, if any.
pub fn lzw_error_of(e: &io::Error) -> Option<LzwError> {
    e.get_ref()
        .and_then(|inner| inner.downcast_ref::<LzwError>())
        .copied()
}
