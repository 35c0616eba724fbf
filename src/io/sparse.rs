//! Sparse output for regular destination files.
//!
//! Decompressed data is scanned in segments of `SPARSE_SEGMENT_SIZE` bytes.
//! A segment's leading zero bytes are not written; they accumulate as pending
//! skips and are turned into a `seek` right before the next non-zero byte, so
//! filesystems that support holes allocate nothing for them. Sparse writes are
//! only compiled where build.rs sets `has_sparse_files`; elsewhere the writer
//! degrades to plain writes.

use std::fs::File;
use std::io::{self, Seek, SeekFrom, Write};

use crate::config::SPARSE_SEGMENT_SIZE;

/// Largest single forward seek issued while skips accumulate.
#[cfg(has_sparse_files)]
const ONE_GB: u64 = 1 << 30;

/// Writes `buf` to `file`, turning leading zero runs of each segment into
/// pending skips. Returns the updated pending-skip count, which must be fed
/// back on the next call and finally to [`fwrite_sparse_end`].
///
/// With `sparse_mode == false` this is a plain `write_all` returning 0.
#[cfg(has_sparse_files)]
pub fn fwrite_sparse(
    file: &mut File,
    buf: &[u8],
    segment_size: usize,
    mut stored_skips: u64,
    sparse_mode: bool,
) -> io::Result<u64> {
    if !sparse_mode {
        file.write_all(buf)?;
        return Ok(0);
    }

    if stored_skips > ONE_GB {
        file.seek(SeekFrom::Current(ONE_GB as i64))?;
        stored_skips -= ONE_GB;
    }

    for segment in buf.chunks(segment_size.max(1)) {
        match segment.iter().position(|&b| b != 0) {
            None => stored_skips += segment.len() as u64,
            Some(first) => {
                stored_skips += first as u64;
                file.seek(SeekFrom::Current(stored_skips as i64))?;
                stored_skips = 0;
                file.write_all(&segment[first..])?;
            }
        }
    }
    Ok(stored_skips)
}

#[cfg(not(has_sparse_files))]
pub fn fwrite_sparse(
    file: &mut File,
    buf: &[u8],
    _segment_size: usize,
    _stored_skips: u64,
    _sparse_mode: bool,
) -> io::Result<u64> {
    file.write_all(buf)?;
    Ok(0)
}

/// Materialises pending skips at end of output: seeks over all but the last
/// byte and writes a single zero so the file gets its full length.
pub fn fwrite_sparse_end(file: &mut File, stored_skips: u64) -> io::Result<()> {
    if stored_skips > 0 {
        file.seek(SeekFrom::Current((stored_skips - 1) as i64))?;
        file.write_all(&[0u8])?;
    }
    Ok(())
}

/// `Write` adapter routing every write through [`fwrite_sparse`].
///
/// [`SparseWriter::finish`] must be called once all data is written.
pub struct SparseWriter {
    file: File,
    stored_skips: u64,
    sparse_mode: bool,
}

impl SparseWriter {
    pub fn new(file: File, sparse_mode: bool) -> Self {
        SparseWriter {
            file,
            stored_skips: 0,
            sparse_mode,
        }
    }

    pub fn sparse_mode(&self) -> bool {
        self.sparse_mode
    }

    /// Writes out pending skips and returns the file.
    pub fn finish(mut self) -> io::Result<File> {
        let skips = std::mem::take(&mut self.stored_skips);
        fwrite_sparse_end(&mut self.file, skips)?;
        self.file.flush()?;
        Ok(self.file)
    }
}

impl Write for SparseWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stored_skips = fwrite_sparse(
            &mut self.file,
            buf,
            SPARSE_SEGMENT_SIZE,
            self.stored_skips,
            self.sparse_mode,
        )?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}
