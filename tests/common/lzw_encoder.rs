//! Reference `.Z` encoder for the test suites, benches and fuzz targets.
//!
//! Produces the same bitstream as the classic `compress`: 9-bit codes to
//! start, one more bit each time the dictionary outgrows the width, and a
//! padded code group at every width change and clear.
#![allow(dead_code)]

use std::collections::HashMap;

pub const CLEAR: u32 = 256;
const FIRST: u32 = 257;
const INIT_BITS: u32 = 9;

#[derive(Debug, Clone, Copy)]
pub struct EncoderOptions {
    pub max_bits: u32,
    pub block_mode: bool,
    /// Emit a clear code when the dictionary is full (block mode only).
    pub clear_when_full: bool,
    /// Also emit a clear code every `n` input bytes (block mode only).
    pub clear_every: Option<usize>,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        EncoderOptions {
            max_bits: 16,
            block_mode: true,
            clear_when_full: true,
            clear_every: None,
        }
    }
}

impl EncoderOptions {
    pub fn bits(max_bits: u32) -> Self {
        EncoderOptions { max_bits, ..Self::default() }
    }
}

struct BitWriter {
    out: Vec<u8>,
    bits: usize,
    /// Start of the current code-group lattice.
    seg_start: usize,
}

impl BitWriter {
    fn put(&mut self, code: u32, n_bits: u32) {
        let mut v = code;
        for _ in 0..n_bits {
            let byte = self.bits >> 3;
            if byte >= self.out.len() {
                self.out.resize(byte + 1, 0);
            }
            if v & 1 != 0 {
                self.out[byte] |= 1 << (self.bits & 7);
            }
            v >>= 1;
            self.bits += 1;
        }
    }

    fn pad_group(&mut self, n_bits: u32) {
        let group = n_bits as usize * 8;
        let rem = (self.bits - self.seg_start) % group;
        if rem != 0 {
            self.bits += group - rem;
        }
        self.seg_start = self.bits;
    }

    fn finish(mut self) -> Vec<u8> {
        self.out.resize((self.bits + 7) / 8, 0);
        self.out
    }
}

/// Encoder state; [`compress`] and [`compress_traced`] drive it.
struct Encoder {
    opts: EncoderOptions,
    n_bits: u32,
    max_code: u32,
    free_ent: u32,
    clear_pending: bool,
    dict: HashMap<(u32, u8), u32>,
    w: BitWriter,
    /// Every code written, with its width.
    trace: Vec<(u32, u32)>,
}

impl Encoder {
    fn new(opts: EncoderOptions) -> Self {
        assert!((9..=16).contains(&opts.max_bits));
        let flags = opts.max_bits as u8 | if opts.block_mode { 0x80 } else { 0 };
        let mut enc = Encoder {
            opts,
            n_bits: INIT_BITS,
            max_code: 0,
            free_ent: if opts.block_mode { FIRST } else { 256 },
            clear_pending: false,
            dict: HashMap::new(),
            w: BitWriter { out: Vec::new(), bits: 0, seg_start: 0 },
            trace: Vec::new(),
        };
        enc.max_code = enc.max_code_for(INIT_BITS);
        enc.w.out.extend_from_slice(&[0x1F, 0x9D, flags]);
        enc.w.bits = 24;
        enc.w.seg_start = 24;
        enc
    }

    fn max_code_for(&self, n_bits: u32) -> u32 {
        if n_bits == self.opts.max_bits {
            1 << self.opts.max_bits
        } else {
            (1 << n_bits) - 1
        }
    }

    fn output(&mut self, code: u32) {
        self.w.put(code, self.n_bits);
        self.trace.push((code, self.n_bits));
        if self.clear_pending || self.free_ent > self.max_code {
            self.w.pad_group(self.n_bits);
            if self.clear_pending {
                self.n_bits = INIT_BITS;
                self.clear_pending = false;
            } else {
                self.n_bits += 1;
            }
            self.max_code = self.max_code_for(self.n_bits);
        }
    }

    fn clear(&mut self) {
        self.dict.clear();
        self.free_ent = FIRST;
        self.clear_pending = true;
        self.output(CLEAR);
    }

    fn run(mut self, data: &[u8]) -> (Vec<u8>, Vec<(u32, u32)>) {
        let cap = 1u32 << self.opts.max_bits;
        let mut ent: Option<u32> = None;
        for (i, &c) in data.iter().enumerate() {
            let Some(e) = ent else {
                ent = Some(c as u32);
                continue;
            };
            if let Some(&code) = self.dict.get(&(e, c)) {
                ent = Some(code);
                continue;
            }
            self.output(e);
            if self.free_ent < cap {
                self.dict.insert((e, c), self.free_ent);
                self.free_ent += 1;
            } else if self.opts.block_mode && self.opts.clear_when_full {
                self.clear();
            }
            let periodic = self.opts.clear_every.is_some_and(|n| n > 0 && i % n == 0);
            if self.opts.block_mode && periodic && self.free_ent > FIRST {
                self.clear();
            }
            ent = Some(c as u32);
        }
        if let Some(e) = ent {
            self.output(e);
        }
        let trace = std::mem::take(&mut self.trace);
        (self.w.finish(), trace)
    }
}

/// Compresses `data` into a complete `.Z` stream.
pub fn compress(data: &[u8], opts: EncoderOptions) -> Vec<u8> {
    Encoder::new(opts).run(data).0
}

/// Like [`compress`], also returning every `(code, width)` written.
pub fn compress_traced(data: &[u8], opts: EncoderOptions) -> (Vec<u8>, Vec<(u32, u32)>) {
    Encoder::new(opts).run(data)
}

/// Hand-assembled stream: codes at explicit widths, with explicit padding.
pub struct RawStream {
    w: BitWriter,
}

impl RawStream {
    pub fn new(flags: u8) -> Self {
        RawStream {
            w: BitWriter { out: vec![0x1F, 0x9D, flags], bits: 24, seg_start: 24 },
        }
    }

    pub fn code(mut self, code: u32, width: u32) -> Self {
        self.w.put(code, width);
        self
    }

    pub fn codes(mut self, codes: &[u32], width: u32) -> Self {
        for &c in codes {
            self.w.put(c, width);
        }
        self
    }

    /// Pads to the end of the current `width`-bit code group.
    pub fn pad(mut self, width: u32) -> Self {
        self.w.pad_group(width);
        self
    }

    pub fn finish(self) -> Vec<u8> {
        self.w.finish()
    }
}

/// Deterministic word salad; compresses well and fills large dictionaries.
pub fn text_corpus(len: usize, seed: u64) -> Vec<u8> {
    const WORDS: [&str; 16] = [
        "the", "decoder", "reads", "codes", "from", "a", "packed", "stream", "and", "writes",
        "bytes", "table", "grows", "until", "full", "width",
    ];
    let mut state = seed | 1;
    let mut out = Vec::with_capacity(len + 16);
    while out.len() < len {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        out.extend_from_slice(WORDS[(state % 16) as usize].as_bytes());
        out.push(if state % 11 == 0 { b'\n' } else { b' ' });
    }
    out.truncate(len);
    out
}

/// Deterministic pseudo-random bytes; barely compressible.
pub fn noise(len: usize, seed: u64) -> Vec<u8> {
    let mut state = seed | 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 24) as u8
        })
        .collect()
}
