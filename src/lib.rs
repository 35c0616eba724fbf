//! Streaming decompressor for the Unix `compress` (`.Z`) format.
//!
//! [`UncompressReader`] turns any `Read` of a `.Z` stream into a `Read` of the
//! original bytes; [`uncompress`] and [`uncompress_file`] cover the
//! whole-stream cases. The [`io`] and [`cli`] modules hold the file-level
//! drivers behind the `unlzw` binary.
//!
//! ```
//! use std::io::Read;
//! let z = [0x1F, 0x9D, 0x90, 0x61, 0xC4, 0x04, 0x1C, 0x08];
//! let mut text = String::new();
//! unlzw::UncompressReader::new(&z[..])?.read_to_string(&mut text)?;
//! assert_eq!(text, "abababa");
//! # Ok::<(), std::io::Error>(())
//! ```

pub mod timefn;
pub mod config;
pub mod util;
pub mod lzw;
pub mod io;
pub mod cli;

// ── Version constants ─────────────────────────────────────────────────────────
pub const UNLZW_VERSION_MAJOR: u32 = 0;
pub const UNLZW_VERSION_MINOR: u32 = 3;
pub const UNLZW_VERSION_RELEASE: u32 = 0;
pub const UNLZW_VERSION_NUMBER: u32 =
    UNLZW_VERSION_MAJOR * 100 * 100 + UNLZW_VERSION_MINOR * 100 + UNLZW_VERSION_RELEASE;
pub const UNLZW_VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// Returns the runtime version number.
pub fn version_number() -> u32 {
    UNLZW_VERSION_NUMBER
}

/// Returns the runtime version string.
pub fn version_string() -> &'static str {
    UNLZW_VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use lzw::{uncompress, uncompress_file, Header, LzwError, UncompressReader};
