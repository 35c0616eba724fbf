//! Source/destination opening for the file-level drivers.
//!
//! Special names:
//! - `STDIN_MARK` / `STDOUT_MARK` select the standard streams;
//! - `NUL_MARK` (`/dev/null`, or `nul` on Windows) discards output without
//!   opening anything.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, Read, Write};
use std::path::Path;
use std::sync::atomic::Ordering;

use crate::io::prefs::{display_level, Prefs, DISPLAY_LEVEL};
use crate::io::sparse::SparseWriter;
use crate::util::is_directory;

// ---------------------------------------------------------------------------
// Sentinels
// ---------------------------------------------------------------------------

pub const STDIN_MARK: &str = "stdin";

pub const STDOUT_MARK: &str = "stdout";

#[cfg(windows)]
pub const NUL_MARK: &str = "nul";
#[cfg(not(windows))]
pub const NUL_MARK: &str = "/dev/null";

#[inline]
pub fn is_stdin(s: &str) -> bool {
    s == STDIN_MARK
}

#[inline]
pub fn is_stdout(s: &str) -> bool {
    s == STDOUT_MARK
}

#[inline]
pub fn is_dev_null(s: &str) -> bool {
    s == NUL_MARK
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// Opens `path` (or stdin) for reading.
///
/// Directories are refused with `InvalidInput`. Failures are returned, not
/// displayed; the drivers report them once per file.
pub fn open_src_file(path: &str) -> io::Result<Box<dyn Read + Send>> {
    if is_stdin(path) {
        display_level(4, "Using stdin for input\n");
        return Ok(Box::new(io::stdin()));
    }

    if is_directory(Path::new(path)) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "is a directory -- ignored",
        ));
    }

    let f = File::open(path)?;
    Ok(Box::new(BufReader::new(f)))
}

// ---------------------------------------------------------------------------
// Destination
// ---------------------------------------------------------------------------

enum Dst {
    Stdout(io::Stdout),
    Null(io::Sink),
    File(SparseWriter),
}

/// An opened output: stdout, the null sink, or a (possibly sparse) file.
pub struct DstFile {
    dst: Dst,
}

impl DstFile {
    pub fn is_stdout(&self) -> bool {
        matches!(self.dst, Dst::Stdout(_))
    }

    pub fn sparse_mode(&self) -> bool {
        match &self.dst {
            Dst::File(w) => w.sparse_mode(),
            _ => false,
        }
    }

    /// Completes the output (pending sparse skips, flush).
    pub fn finish(self) -> io::Result<()> {
        match self.dst {
            Dst::Stdout(mut s) => s.flush(),
            Dst::Null(_) => Ok(()),
            Dst::File(w) => w.finish().map(drop),
        }
    }
}

impl Write for DstFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.dst {
            Dst::Stdout(s) => s.write(buf),
            Dst::Null(s) => s.write(buf),
            Dst::File(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.dst {
            Dst::Stdout(s) => s.flush(),
            Dst::Null(s) => s.flush(),
            Dst::File(w) => w.flush(),
        }
    }
}

/// Asks on the console whether `path` may be overwritten.
///
/// At notification level ≤ 1 there is no prompt and the answer is no.
fn confirm_overwrite(path: &str) -> io::Result<()> {
    let refused = |msg: &str| io::Error::new(io::ErrorKind::AlreadyExists, msg.to_owned());

    if DISPLAY_LEVEL.load(Ordering::Relaxed) <= 1 {
        return Err(refused("already exists; not overwritten"));
    }
    eprint!("{} already exists; do you want to overwrite (y/N) ? ", path);
    let _ = io::stderr().flush();
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    match line.trim_start().chars().next() {
        Some('y') | Some('Y') => Ok(()),
        _ => Err(refused("not overwritten")),
    }
}

/// Opens the destination named `path`.
///
/// Regular files honour `prefs.overwrite` (prompting when unset) and get
/// sparse writes when `prefs.sparse_file_support > 0`.
pub fn open_dst_file(path: &str, prefs: &Prefs) -> io::Result<DstFile> {
    if is_stdout(path) {
        display_level(4, "Using stdout for output\n");
        if prefs.sparse_file_support == 1 {
            display_level(4, "Sparse File Support automatically disabled on stdout\n");
        }
        return Ok(DstFile { dst: Dst::Stdout(io::stdout()) });
    }

    if is_dev_null(path) {
        return Ok(DstFile { dst: Dst::Null(io::sink()) });
    }

    if !prefs.overwrite && Path::new(path).exists() {
        confirm_overwrite(path)?;
    }

    let f = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;

    let sparse_mode = prefs.sparse_file_support > 0;
    Ok(DstFile { dst: Dst::File(SparseWriter::new(f, sparse_mode)) })
}
