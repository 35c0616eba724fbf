//! Adaptive LZW (`compress` / `.Z`) stream decoding.
//!
//! | Submodule   | Responsibility |
//! |-------------|----------------|
//! | [`types`]   | Format constants, [`Header`], [`LzwError`]. |
//! | [`header`]  | 3-byte header validation. |
//! | [`buffer`]  | Sliding source window with refill/compact. |
//! | [`bits`]    | Code extraction and group alignment. |
//! | [`table`]   | Prefix/suffix dictionary. |
//! | [`decoder`] | Per-code state machine. |
//! | [`stream`]  | `Read` façade and whole-stream helpers. |

pub mod bits;
pub mod buffer;
pub mod decoder;
pub mod header;
pub mod stream;
pub mod table;
pub mod types;

pub use decoder::DecodeState;
pub use header::{parse_header, read_header};
pub use stream::{uncompress, uncompress_file, UncompressReader};
pub use types::{lzw_error_of, Header, LzwError, LZW_MAGIC, MAX_BITS};
