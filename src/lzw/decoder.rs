//! LZW decoding state machine.
//!
//! The decoder owns the adaptive state (code width, previous code, first
//! character, expansion stack). The dictionary and the source window are
//! separate values handed in by the caller on every call.
//!
//! Codes are consumed in passes. Each pass refills the window if it runs low,
//! then decodes up to `bit_end`:
//! - while the source is live, the last whole 8-code group in the window;
//! - once the source is exhausted, the last whole code.
//!
//! Width changes and clears pad to the end of the current group, compact the
//! window and start a new pass.

use std::io::{self, Read};

use tracing::debug;

use crate::lzw::bits::{align_to_group, read_code};
use crate::lzw::buffer::SourceBuffer;
use crate::lzw::table::CodeTable;
use crate::lzw::types::{Header, LzwError, INIT_BITS, LITERALS, TBL_CLEAR};

/// Decoding phase, derived from the decoder fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeState {
    /// No code read yet, or a clear code was just consumed.
    AwaitFirstCode,
    Steady,
    /// Terminal: input exhausted and no whole code left.
    Eof,
    /// Terminal: a corrupt code was seen.
    Failed,
}

/// How a decoding pass ended.
enum Pass {
    /// The caller's buffer is full.
    OutputFull,
    /// Width change or clear; the window was compacted.
    Realigned,
    /// Reached `bit_end`.
    Drained,
}

pub struct Decoder {
    block_mode: bool,
    max_bits: u32,
    n_bits: u32,
    max_code: u32,
    old_code: Option<u32>,
    /// At least one code has been read since open.
    started: bool,
    fin_char: u8,
    stack: Box<[u8]>,
    stack_ptr: usize,
    bit_pos: usize,
    eof: bool,
    failed: Option<LzwError>,
}

impl Decoder {
    pub fn new(header: &Header) -> Self {
        let stack_len = header.max_max_code() as usize;
        Decoder {
            block_mode: header.block_mode,
            max_bits: header.max_bits,
            n_bits: INIT_BITS,
            max_code: (1 << INIT_BITS) - 1,
            old_code: None,
            started: false,
            fin_char: 0,
            stack: vec![0u8; stack_len].into_boxed_slice(),
            stack_ptr: stack_len,
            bit_pos: 0,
            eof: false,
            failed: None,
        }
    }

    pub fn state(&self) -> DecodeState {
        if self.failed.is_some() {
            DecodeState::Failed
        } else if self.eof && self.pending() == 0 {
            DecodeState::Eof
        } else if self.old_code.is_none() {
            DecodeState::AwaitFirstCode
        } else {
            DecodeState::Steady
        }
    }

    /// Current code width.
    #[inline]
    pub fn n_bits(&self) -> u32 {
        self.n_bits
    }

    /// Expansion bytes decoded but not yet handed out.
    #[inline]
    pub fn pending(&self) -> usize {
        self.stack.len() - self.stack_ptr
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.eof && self.pending() == 0
    }

    /// Fills `out` with decompressed bytes.
    ///
    /// Returns 0 only when `out` is empty or the stream has ended. A corrupt
    /// code after some bytes were produced is reported on the next call, so
    /// output preceding the corruption is never lost. A failing source read
    /// is handled the same way, and the read is retried on the next call.
    pub fn decode<R: Read>(
        &mut self,
        table: &mut CodeTable,
        input: &mut SourceBuffer,
        src: &mut R,
        out: &mut [u8],
    ) -> io::Result<usize> {
        if let Some(e) = self.failed {
            return Err(e.into());
        }
        let mut off = self.drain(out);
        if off == out.len() || self.eof {
            return Ok(off);
        }

        loop {
            if let Err(e) = input.refill_if_low(src) {
                // Nothing was consumed by the failed read; the next call retries it.
                return if off > 0 { Ok(off) } else { Err(e) };
            }
            let n_bits = self.n_bits as usize;
            let end = input.end();
            let bit_end = if input.got() > 0 {
                (end - end % n_bits) * 8
            } else {
                (end * 8).saturating_sub(n_bits - 1)
            };

            match self.pass(table, input, out, &mut off, bit_end) {
                Ok(Pass::OutputFull) => return Ok(off),
                Ok(Pass::Realigned) | Ok(Pass::Drained) => {}
                Err(e) => {
                    self.failed = Some(e);
                    return if off > 0 { Ok(off) } else { Err(e.into()) };
                }
            }

            self.bit_pos = input.compact(self.bit_pos);
            let live = input.got() > 0 || self.bit_pos + self.n_bits as usize <= input.end() * 8;
            if !live {
                self.eof = true;
                return Ok(off);
            }
        }
    }

    fn pass(
        &mut self,
        table: &mut CodeTable,
        input: &mut SourceBuffer,
        out: &mut [u8],
        off: &mut usize,
        bit_end: usize,
    ) -> Result<Pass, LzwError> {
        while self.bit_pos < bit_end {
            if *off == out.len() {
                return Ok(Pass::OutputFull);
            }

            if table.free_ent() > self.max_code && self.n_bits < self.max_bits {
                self.bit_pos = align_to_group(self.bit_pos, self.n_bits);
                self.n_bits += 1;
                self.max_code = (1 << self.n_bits) - 1;
                debug!(n_bits = self.n_bits, "code width expanded");
                self.bit_pos = input.compact(self.bit_pos);
                return Ok(Pass::Realigned);
            }

            let mut code = read_code(input.data(), self.bit_pos, self.n_bits);
            self.bit_pos += self.n_bits as usize;

            let Some(old_code) = self.old_code else {
                if code == TBL_CLEAR && self.block_mode && self.started {
                    return Ok(self.reset(table, input));
                }
                if code >= LITERALS {
                    return Err(LzwError::CorruptCode { code, free_ent: table.free_ent() });
                }
                self.fin_char = code as u8;
                self.old_code = Some(code);
                self.started = true;
                out[*off] = self.fin_char;
                *off += 1;
                continue;
            };

            if code == TBL_CLEAR && self.block_mode {
                return Ok(self.reset(table, input));
            }

            let incode = code;
            let free_ent = table.free_ent();
            if code >= free_ent {
                if code > free_ent {
                    return Err(LzwError::CorruptCode { code, free_ent });
                }
                // KwK: the entry being referenced is the one this code defines.
                self.push(self.fin_char);
                code = old_code;
            }

            while code >= LITERALS {
                self.push(table.suffix(code));
                code = table.prefix(code);
            }
            self.fin_char = table.suffix(code);
            self.push(self.fin_char);

            table.add(old_code, self.fin_char);
            self.old_code = Some(incode);

            *off += self.drain(&mut out[*off..]);
        }
        Ok(Pass::Drained)
    }

    /// Handles a clear code: empties the table and restarts at 9 bits on the
    /// next group boundary.
    fn reset(&mut self, table: &mut CodeTable, input: &mut SourceBuffer) -> Pass {
        table.clear();
        self.bit_pos = align_to_group(self.bit_pos, self.n_bits);
        self.n_bits = INIT_BITS;
        self.max_code = (1 << INIT_BITS) - 1;
        self.old_code = None;
        debug!("code table reset");
        self.bit_pos = input.compact(self.bit_pos);
        Pass::Realigned
    }

    #[inline]
    fn push(&mut self, byte: u8) {
        self.stack_ptr -= 1;
        self.stack[self.stack_ptr] = byte;
    }

    fn drain(&mut self, out: &mut [u8]) -> usize {
        let pending = &self.stack[self.stack_ptr..];
        let n = pending.len().min(out.len());
        out[..n].copy_from_slice(&pending[..n]);
        self.stack_ptr += n;
        n
    }
}
