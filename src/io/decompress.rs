//! File-level decompression drivers.
//!
//! - [`decompress_filename`] handles one source/destination pair;
//! - [`decompress_multiple_filenames`] handles a list of `.Z` files, naming
//!   each output by stripping the suffix, optionally on a rayon pool.
//!
//! Input that does not start with the `.Z` magic is an error unless
//! pass-through is enabled, in which case it is copied unchanged.
//!
//! A failed decompression into a regular file removes the partial output.
//! The source is removed (with `--rm`) only after its output was completed
//! as a regular file.

use std::fs;
use std::io::{self, Cursor, Read, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::io::file_io::{is_dev_null, is_stdin, is_stdout, open_dst_file, open_src_file};
use crate::io::prefs::{display_level, final_time_display, Prefs};
use crate::lzw::stream::uncompress;
use crate::lzw::types::{HEADER_SIZE, LZW_MAGIC};
use crate::timefn::get_time;
use crate::util::{copy_file_stat, is_reg_file};

/// Copy buffer for pass-through mode.
const PT_BUF_SIZE: usize = 16 * 1024;

/// Result of a successful single-file decompression.
#[derive(Debug, Clone, Default)]
pub struct DecompressStats {
    /// Bytes written to the destination.
    pub decompressed_bytes: u64,
}

/// Reads up to `buf.len()` bytes, stopping early only at end of input.
fn read_prefix<R: Read>(src: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match src.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Writes `prefix` then the rest of `src` to `dst`.
fn pass_through<R: Read, W: Write>(src: &mut R, dst: &mut W, prefix: &[u8]) -> io::Result<u64> {
    dst.write_all(prefix)?;
    let mut total = prefix.len() as u64;
    let mut buf = [0u8; PT_BUF_SIZE];
    loop {
        let n = match src.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        dst.write_all(&buf[..n])?;
        total += n as u64;
    }
    Ok(total)
}

/// Decompresses (or passes through) everything in `src` into `dst`.
pub fn decompress_stream<R: Read, W: Write>(
    mut src: R,
    dst: &mut W,
    prefs: &Prefs,
) -> io::Result<u64> {
    let mut head = [0u8; HEADER_SIZE];
    let n = read_prefix(&mut src, &mut head)?;
    let head = &head[..n];

    let is_lzw = n >= 2 && head[..2] == LZW_MAGIC.to_be_bytes();
    if !is_lzw && prefs.pass_through && !prefs.test_mode {
        debug!(bytes = n, "input is not compressed; copying");
        return pass_through(&mut src, dst, head);
    }

    uncompress(Cursor::new(head).chain(src), dst)
}

fn decompress_src_file<W: Write>(src_path: &str, dst: &mut W, prefs: &Prefs) -> io::Result<u64> {
    let src = open_src_file(src_path)?;
    let filesize = decompress_stream(src, dst, prefs)?;
    display_level(2, &format!("{:<30.30} : decoded {} bytes \n", src_path, filesize));
    Ok(filesize)
}

fn decompress_dst_file(src_path: &str, dst_path: &str, prefs: &Prefs) -> io::Result<u64> {
    let src_stat = if is_stdin(src_path) {
        None
    } else {
        fs::metadata(src_path).ok()
    };

    let mut dst = open_dst_file(dst_path, prefs)?;
    let special_dst = is_stdout(dst_path) || is_dev_null(dst_path);

    let result = decompress_src_file(src_path, &mut dst, prefs);
    let result = result.and_then(|n| dst.finish().map(|_| n));
    let filesize = match result {
        Ok(n) => n,
        Err(e) => {
            if !special_dst {
                if let Err(rm) = fs::remove_file(dst_path) {
                    debug!(path = dst_path, error = %rm, "could not remove partial output");
                }
            }
            return Err(e);
        }
    };

    if special_dst || !is_reg_file(Path::new(dst_path)) {
        return Ok(filesize);
    }

    if prefs.keep_stat {
        if let Some(meta) = &src_stat {
            if let Err(e) = copy_file_stat(meta, Path::new(dst_path)) {
                warn!(path = dst_path, error = %e, "could not copy file attributes");
            }
        }
    }

    if prefs.remove_src_file && !is_stdin(src_path) {
        fs::remove_file(src_path)
            .map_err(|e| io::Error::new(e.kind(), format!("Remove error : {}: {}", src_path, e)))?;
    }

    Ok(filesize)
}

/// Decompresses `src` into `dst`.
///
/// Either name may be one of the stdin/stdout/null sentinels. Errors are
/// returned, not displayed.
pub fn decompress_filename(src: &str, dst: &str, prefs: &Prefs) -> io::Result<DecompressStats> {
    let time_start = get_time();
    let bytes = decompress_dst_file(src, dst, prefs)?;
    final_time_display(time_start, bytes);
    Ok(DecompressStats { decompressed_bytes: bytes })
}

/// Output name for `src_path`, or `None` when it does not carry `suffix`.
pub fn strip_suffix<'a>(src_path: &'a str, suffix: &str) -> Option<&'a str> {
    src_path
        .strip_suffix(suffix)
        .filter(|base| !base.is_empty() && !base.ends_with(std::path::MAIN_SEPARATOR))
}

/// Decompresses every file in `srcs`.
///
/// With `suffix` set to the stdout or null sentinel, every file goes to that
/// destination, in order. Otherwise each output is named by stripping
/// `suffix`; files without it are skipped. Each failure is displayed as it
/// happens; the returned error only summarises the counts.
pub fn decompress_multiple_filenames(srcs: &[&str], suffix: &str, prefs: &Prefs) -> io::Result<()> {
    let time_start = get_time();
    let dst_is_special = is_stdout(suffix) || is_dev_null(suffix);

    let mut jobs: Vec<(&str, &str)> = Vec::with_capacity(srcs.len());
    let mut skipped_files = 0usize;
    for &src in srcs {
        if dst_is_special {
            jobs.push((src, suffix));
            continue;
        }
        match strip_suffix(src, suffix) {
            Some(dst) => jobs.push((src, dst)),
            None => {
                display_level(
                    1,
                    &format!("unlzw: {}: does not end in {} -- ignored\n", src, suffix),
                );
                skipped_files += 1;
            }
        }
    }

    let run = |(src, dst): (&str, &str)| match decompress_dst_file(src, dst, prefs) {
        Ok(n) => Some(n),
        Err(e) => {
            display_level(1, &format!("unlzw: {}: {}\n", src, e));
            None
        }
    };

    let results: Vec<Option<u64>> = if use_worker_pool(prefs, dst_is_special, jobs.len()) {
        run_on_pool(prefs.nb_workers, &jobs, &run)?
    } else {
        jobs.iter().copied().map(run).collect()
    };

    let total_processed: u64 = results.iter().flatten().sum();
    let failed_files = results.iter().filter(|r| r.is_none()).count();

    final_time_display(time_start, total_processed);

    if failed_files + skipped_files > 0 {
        Err(io::Error::other(format!(
            "{} file(s) could not be decompressed; {} file(s) skipped",
            failed_files, skipped_files
        )))
    } else {
        Ok(())
    }
}

fn use_worker_pool(prefs: &Prefs, dst_is_special: bool, nb_jobs: usize) -> bool {
    // stdout output must stay in argument order; an overwrite prompt needs
    // the console to itself.
    cfg!(feature = "multithread")
        && prefs.nb_workers > 1
        && nb_jobs > 1
        && !dst_is_special
        && prefs.overwrite
}

#[cfg(feature = "multithread")]
fn run_on_pool<F>(nb_workers: usize, jobs: &[(&str, &str)], run: &F) -> io::Result<Vec<Option<u64>>>
where
    F: Fn((&str, &str)) -> Option<u64> + Sync,
{
    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(nb_workers)
        .build()
        .map_err(io::Error::other)?;
    debug!(workers = nb_workers, files = jobs.len(), "decompressing on worker pool");
    Ok(pool.install(|| jobs.par_iter().copied().map(run).collect()))
}

#[cfg(not(feature = "multithread"))]
fn run_on_pool<F>(_nb_workers: usize, jobs: &[(&str, &str)], run: &F) -> io::Result<Vec<Option<u64>>>
where
    F: Fn((&str, &str)) -> Option<u64> + Sync,
{
    Ok(jobs.iter().copied().map(run).collect())
}
