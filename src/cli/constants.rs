//! Program identity strings, the CLI display level and `displaylevel!`.

use std::sync::atomic::{AtomicU32, Ordering};

pub const PROGRAM_NAME: &str = "unlzw";
/// Alias that decompresses every argument in place.
pub const UNCOMPRESS: &str = "uncompress";
/// Alias that decompresses to stdout.
pub const LZWCAT: &str = "lzwcat";

pub use crate::config::Z_EXTENSION;

#[cfg(feature = "multithread")]
pub const IO_MT: &str = "multithread";
#[cfg(not(feature = "multithread"))]
pub const IO_MT: &str = "single-thread";

pub const DEFAULT_DISPLAY_LEVEL: u32 = 2;

/// 0 = silent, 1 = errors, 2 = results and warnings (default), 3 = progress,
/// 4+ = verbose.
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(DEFAULT_DISPLAY_LEVEL);

#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Print to stderr when the display level is at least `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
