//! Pull-based `Read` façade over the decoder, plus whole-stream helpers.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::config::TRANSFER_BUFFER_SIZE;
use crate::lzw::buffer::SourceBuffer;
use crate::lzw::decoder::{DecodeState, Decoder};
use crate::lzw::header::read_header;
use crate::lzw::table::CodeTable;
use crate::lzw::types::Header;
use crate::timefn::{clock_span_ns, get_time};

/// Scratch size used by [`UncompressReader::skip`].
const SKIP_CHUNK: usize = 8 * 1024;

/// Decompresses a `.Z` stream read from `R`.
///
/// The header is parsed by [`UncompressReader::new`]; table, stack and source
/// window are allocated once there, sized from the header's maximum width.
///
/// ```no_run
/// use std::io::Read;
/// let file = std::fs::File::open("data.Z")?;
/// let mut reader = unlzw::UncompressReader::new(file)?;
/// let mut text = String::new();
/// reader.read_to_string(&mut text)?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct UncompressReader<R> {
    src: R,
    header: Header,
    input: SourceBuffer,
    table: CodeTable,
    decoder: Decoder,
}

impl<R: Read> UncompressReader<R> {
    /// Reads and validates the 3-byte header of `src`.
    ///
    /// # Errors
    ///
    /// `InvalidData` carrying an [`LzwError`](crate::LzwError) for a bad
    /// header; any error from `src` unchanged.
    pub fn new(mut src: R) -> io::Result<Self> {
        let header = read_header(&mut src)?;
        Ok(UncompressReader {
            src,
            header,
            input: SourceBuffer::new(),
            table: CodeTable::new(&header),
            decoder: Decoder::new(&header),
        })
    }

    /// Reads and discards up to `n` decompressed bytes.
    ///
    /// Returns the number skipped, which is short of `n` only at end of
    /// stream.
    pub fn skip(&mut self, n: u64) -> io::Result<u64> {
        let mut scratch = vec![0u8; (n.min(SKIP_CHUNK as u64)) as usize];
        let mut skipped = 0u64;
        while skipped < n {
            let want = (n - skipped).min(scratch.len() as u64) as usize;
            let got = self.read(&mut scratch[..want])?;
            if got == 0 {
                break;
            }
            skipped += got as u64;
        }
        Ok(skipped)
    }
}

impl<R> UncompressReader<R> {
    /// Lower bound on bytes a `read` can return without blocking on decode.
    ///
    /// 0 only at end of stream; otherwise the pending expansion size, and at
    /// least 1.
    pub fn available(&self) -> usize {
        if self.decoder.is_eof() {
            0
        } else {
            self.decoder.pending().max(1)
        }
    }

    /// Mark/reset is not supported: decoding is strictly forward.
    pub fn mark_supported(&self) -> bool {
        false
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Current code width, 9..=max_bits.
    pub fn code_width(&self) -> u32 {
        self.decoder.n_bits()
    }

    /// Next dictionary slot to be assigned.
    pub fn free_ent(&self) -> u32 {
        self.table.free_ent()
    }

    pub fn state(&self) -> DecodeState {
        self.decoder.state()
    }

    pub fn get_ref(&self) -> &R {
        &self.src
    }

    /// Closes the decompressor and hands back the source, undrained.
    pub fn into_inner(self) -> R {
        self.src
    }
}

impl<R: Read> Read for UncompressReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.decoder
            .decode(&mut self.table, &mut self.input, &mut self.src, buf)
    }
}

/// Decompresses all of `src` into `dst`; returns the decompressed size.
///
/// Neither side is closed; `dst` is not flushed.
pub fn uncompress<R: Read, W: Write>(src: R, mut dst: W) -> io::Result<u64> {
    let mut reader = UncompressReader::new(src)?;
    let mut buffer = vec![0u8; TRANSFER_BUFFER_SIZE];
    let mut total = 0u64;
    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        dst.write_all(&buffer[..n])?;
        total += n as u64;
    }
    Ok(total)
}

/// Decompresses the file at `path` into `dst` and flushes `dst`.
pub fn uncompress_file<P: AsRef<Path>, W: Write>(path: P, mut dst: W) -> io::Result<u64> {
    let time_start = get_time();
    let file = File::open(path.as_ref())?;
    let total = uncompress(file, &mut dst)?;
    dst.flush()?;

    info!(path = %path.as_ref().display(), bytes = total, "decompressed");
    debug!(
        seconds = clock_span_ns(time_start) as f64 / 1_000_000_000.0,
        "decompression time"
    );
    Ok(total)
}
