// prefs.rs - I/O preferences, notification level, and timing display.
//
// - `DISPLAY_LEVEL` is a process-wide atomic so worker threads in
//   multi-file mode can read it without locking.
// - `Prefs` is a plain value owned by the caller; setters return the value
//   actually stored.

use std::io::Write;
use std::sync::atomic::{AtomicI32, Ordering};

use crate::config::{NB_WORKERS_MAX, SPARSE_DEFAULT};
use crate::timefn::{clock_span_ns, ns_to_secs, TimeT};

// ---------------------------------------------------------------------------
// Numeric constants
// ---------------------------------------------------------------------------
pub const MB: usize = 1 << 20;

// ---------------------------------------------------------------------------
// Display / notification globals
// ---------------------------------------------------------------------------

/// Global notification level. 0 = silent, 1 = errors only, 2 = results +
/// warnings, 3 = progress, 4+ = verbose.
pub static DISPLAY_LEVEL: AtomicI32 = AtomicI32::new(0);

/// Write `msg` to stderr if the current notification level is ≥ `level`.
/// Flushes stderr at level 4 and above.
#[inline]
pub fn display_level(level: i32, msg: &str) {
    if DISPLAY_LEVEL.load(Ordering::Relaxed) >= level {
        eprint!("{}", msg);
        if DISPLAY_LEVEL.load(Ordering::Relaxed) >= 4 {
            let _ = std::io::stderr().flush();
        }
    }
}

/// Sets the I/O layer's notification level; returns it.
pub fn set_notification_level(level: i32) -> i32 {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
    level
}

// ---------------------------------------------------------------------------
// Final timing display
// ---------------------------------------------------------------------------

/// Formats the "Done in ..." summary line.
pub fn time_summary(elapsed_ns: u64, size: u64) -> String {
    let seconds = ns_to_secs(elapsed_ns);
    format!(
        "Done in {:.2} s ==> {:.2} MiB/s\n",
        seconds,
        (size as f64) / seconds / MB as f64,
    )
}

/// Prints the timing summary at notification level 3.
pub fn final_time_display(time_start: TimeT, size: u64) {
    display_level(3, &time_summary(clock_span_ns(time_start), size));
}

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

/// Tunable parameters for file-level decompression.
#[derive(Clone, Debug)]
pub struct Prefs {
    /// Copy input that is not a `.Z` stream through unchanged. Default: false.
    pub pass_through: bool,
    /// Overwrite existing destination files without prompting. Default: true.
    pub overwrite: bool,
    /// Test mode: decompress, discard output. Default: false.
    pub test_mode: bool,
    /// Sparse-file write support: 0 = off, 1 = auto, 2 = forced. Default: 1.
    pub sparse_file_support: u32,
    /// Remove the source file after successful decompression. Default: false.
    pub remove_src_file: bool,
    /// Copy mtime, permissions and ownership onto the output. Default: true.
    pub keep_stat: bool,
    /// Worker threads for multi-file decompression. Default: auto-detected.
    pub nb_workers: usize,
}

/// Default number of decompression workers.
///
/// With the `multithread` feature, one per physical core minus a small
/// reserve; otherwise 1.
pub fn default_nb_workers() -> usize {
    #[cfg(feature = "multithread")]
    {
        let nb_cores = num_cpus::get_physical();
        let spared = 1 + (nb_cores >> 3);
        if nb_cores <= spared {
            1
        } else {
            nb_cores - spared
        }
    }
    #[cfg(not(feature = "multithread"))]
    {
        1
    }
}

impl Default for Prefs {
    fn default() -> Self {
        Prefs {
            pass_through: false,
            overwrite: true,
            test_mode: false,
            sparse_file_support: SPARSE_DEFAULT,
            remove_src_file: false,
            keep_stat: true,
            nb_workers: default_nb_workers(),
        }
    }
}

impl Prefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of worker threads, clamped to [1, NB_WORKERS_MAX].
    pub fn set_nb_workers(&mut self, nb_workers: usize) -> usize {
        let clamped = nb_workers.clamp(1, NB_WORKERS_MAX);
        self.nb_workers = clamped;
        clamped
    }

    pub fn set_pass_through(&mut self, yes: bool) -> bool {
        self.pass_through = yes;
        yes
    }

    pub fn set_overwrite(&mut self, yes: bool) -> bool {
        self.overwrite = yes;
        yes
    }

    pub fn set_test_mode(&mut self, yes: bool) -> bool {
        self.test_mode = yes;
        yes
    }

    /// 0 = off, 1 = auto, 2 = forced; larger values are clamped to 2.
    pub fn set_sparse_file(&mut self, mode: u32) -> u32 {
        self.sparse_file_support = mode.min(2);
        self.sparse_file_support
    }

    pub fn set_remove_src_file(&mut self, yes: bool) -> bool {
        self.remove_src_file = yes;
        yes
    }

    pub fn set_keep_stat(&mut self, yes: bool) -> bool {
        self.keep_stat = yes;
        yes
    }
}
