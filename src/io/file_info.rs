//! File information display for the `--list` flag.
//!
//! A `.Z` file does not record its decompressed size, so each file is fully
//! decoded into a sink to measure it. The table row shows the header's
//! block mode and maximum width next to both sizes and the ratio.

use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::sync::atomic::Ordering;

use crate::io::file_io::{is_stdin, STDIN_MARK};
use crate::io::prefs::DISPLAY_LEVEL;
use crate::lzw::stream::UncompressReader;
use crate::lzw::types::Header;
use crate::util::is_reg_file;

/// Everything `--list` reports about one compressed file.
#[derive(Debug, Clone)]
pub struct CompressedFileInfo {
    /// Display name (basename of the path).
    pub file_name: String,
    pub header: Header,
    /// Bytes read from the file, header included.
    pub compressed_size: u64,
    pub uncompressed_size: u64,
    /// Code width in use when the stream ended.
    pub final_width: u32,
    /// Next free dictionary slot when the stream ended.
    pub final_free_ent: u32,
}

impl CompressedFileInfo {
    /// Compressed size as a percentage of the uncompressed size.
    pub fn ratio(&self) -> Option<f64> {
        if self.uncompressed_size == 0 {
            None
        } else {
            Some(self.compressed_size as f64 / self.uncompressed_size as f64 * 100.0)
        }
    }
}

/// `Read` adapter counting the bytes that pass through it.
struct CountingReader<R> {
    inner: R,
    count: u64,
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.count += n as u64;
        Ok(n)
    }
}

/// Formats a byte count with a binary prefix and two decimals, e.g. `"3.14M"`.
fn to_human(mut size: f64) -> String {
    const UNITS: [&str; 9] = ["", "K", "M", "G", "T", "P", "E", "Z", "Y"];
    let mut i = 0usize;
    while size >= 1024.0 && i + 1 < UNITS.len() {
        size /= 1024.0;
        i += 1;
    }
    format!("{:.2}{}", size, UNITS[i])
}

/// Component after the last `/` or `\`.
fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Decodes `src` to the end and collects its statistics.
pub fn get_compressed_file_info<R: Read>(src: R, name: &str) -> io::Result<CompressedFileInfo> {
    let counting = CountingReader { inner: src, count: 0 };
    let mut reader = UncompressReader::new(counting)?;
    let uncompressed_size = io::copy(&mut reader, &mut io::sink())?;
    let header = *reader.header();
    let final_width = reader.code_width();
    let final_free_ent = reader.free_ent();
    let counting = reader.into_inner();
    Ok(CompressedFileInfo {
        file_name: base_name(name).to_owned(),
        header,
        compressed_size: counting.count,
        uncompressed_size,
        final_width,
        final_free_ent,
    })
}

/// Column headings of the `--list` table.
pub fn table_heading() -> String {
    format!(
        "{:>5} {:>7} {:>11} {:>13} {:>8}   {}",
        "Block", "MaxBits", "Compressed", "Uncompressed", "Ratio", "Filename"
    )
}

/// One `--list` table row.
pub fn table_row(info: &CompressedFileInfo) -> String {
    let block = if info.header.block_mode { "yes" } else { "no" };
    let ratio = match info.ratio() {
        Some(r) => format!("{:>7.2}%", r),
        None => format!("{:>8}", "-"),
    };
    format!(
        "{:>5} {:>7} {:>11} {:>13} {}   {}",
        block,
        info.header.max_bits,
        to_human(info.compressed_size as f64),
        to_human(info.uncompressed_size as f64),
        ratio,
        info.file_name
    )
}

fn verbose_details(info: &CompressedFileInfo) -> String {
    format!(
        "    flags 0x{:02X}, {} bytes -> {} bytes, final width {}, next code {}",
        info.header.flags,
        info.compressed_size,
        info.uncompressed_size,
        info.final_width,
        info.final_free_ent
    )
}

fn open_listed(path: &str) -> io::Result<Box<dyn Read>> {
    if is_stdin(path) {
        return Ok(Box::new(io::stdin()));
    }
    if !is_reg_file(std::path::Path::new(path)) {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"));
    }
    Ok(Box::new(BufReader::new(File::open(path)?)))
}

/// Writes the `--list` table for `paths` to `out`.
///
/// Files that cannot be listed are reported on stderr and skipped; the
/// first such error is returned once the table is complete.
pub fn write_files_info<W: Write>(out: &mut W, paths: &[&str], verbose: bool) -> io::Result<()> {
    writeln!(out, "{}", table_heading())?;
    let mut first_err = None;
    for &path in paths {
        let name = if is_stdin(path) { STDIN_MARK } else { path };
        let info = open_listed(path).and_then(|src| get_compressed_file_info(src, name));
        match info {
            Ok(info) => {
                writeln!(out, "{}", table_row(&info))?;
                if verbose {
                    writeln!(out, "{}", verbose_details(&info))?;
                }
            }
            Err(e) => {
                if DISPLAY_LEVEL.load(Ordering::Relaxed) >= 1 {
                    eprintln!("unlzw: {}: {}", path, e);
                }
                first_err.get_or_insert(io::Error::new(e.kind(), format!("{}: {}", path, e)));
            }
        }
    }
    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Prints the `--list` table on stdout; verbose at notification level 3+.
pub fn display_compressed_files_info(paths: &[&str]) -> io::Result<()> {
    let verbose = DISPLAY_LEVEL.load(Ordering::Relaxed) >= 3;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_files_info(&mut out, paths, verbose)
}
