//! Sliding source window feeding the code reader.
//!
//! Bytes are appended into `data[end..BUF_SIZE]`; the `EXTRA` bytes past
//! `BUF_SIZE` are never filled and only exist so that a 3-byte code window
//! starting inside the valid region stays in bounds.

use std::io::{self, Read};

use crate::lzw::types::{BUF_SIZE, EXTRA};

pub struct SourceBuffer {
    data: Box<[u8]>,
    end: usize,
    got: usize,
}

impl SourceBuffer {
    pub fn new() -> Self {
        SourceBuffer {
            data: vec![0u8; BUF_SIZE + EXTRA].into_boxed_slice(),
            end: 0,
            got: 0,
        }
    }

    /// Number of valid bytes in the window.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Bytes appended by the last refill; 0 once the source is exhausted.
    #[inline]
    pub fn got(&self) -> usize {
        self.got
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Appends whatever one read of `src` yields.
    ///
    /// `Interrupted` is retried. A short read is not exhaustion; only a read
    /// of 0 bytes leaves `got() == 0`.
    pub fn refill<R: Read>(&mut self, src: &mut R) -> io::Result<usize> {
        let room = &mut self.data[self.end..BUF_SIZE];
        if room.is_empty() {
            // Full window: keep the previous `got` so the caller still treats
            // the source as live.
            return Ok(0);
        }
        let n = loop {
            match src.read(room) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };
        self.got = n;
        self.end += n;
        Ok(n)
    }

    /// Refills only while fewer than `EXTRA` bytes are buffered.
    pub fn refill_if_low<R: Read>(&mut self, src: &mut R) -> io::Result<()> {
        if self.end < EXTRA {
            self.refill(src)?;
        }
        Ok(())
    }

    /// Slides the byte holding `bit_pos` down to offset 0 and returns the
    /// rebased bit cursor (its sub-byte part is kept).
    ///
    /// A cursor past `end` (alignment padding that was never written) drops
    /// the whole window.
    pub fn compact(&mut self, bit_pos: usize) -> usize {
        let byte = bit_pos >> 3;
        if byte >= self.end {
            let at_end = byte == self.end;
            self.end = 0;
            return if at_end { bit_pos & 7 } else { 0 };
        }
        self.data.copy_within(byte..self.end, 0);
        self.end -= byte;
        bit_pos & 7
    }
}

impl Default for SourceBuffer {
    fn default() -> Self {
        Self::new()
    }
}
