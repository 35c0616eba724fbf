#![no_main]
use libfuzzer_sys::fuzz_target;

#[path = "../../tests/common/lzw_encoder.rs"]
mod lzw_encoder;

use lzw_encoder::EncoderOptions;

fuzz_target!(|data: &[u8]| {
    // First byte picks the encoder settings; the rest is the payload.
    let Some((&knobs, payload)) = data.split_first() else {
        return;
    };
    let opts = EncoderOptions {
        max_bits: 9 + u32::from(knobs % 8),
        block_mode: knobs & 0x80 != 0,
        clear_when_full: knobs & 0x40 != 0,
        clear_every: (knobs & 0x08 != 0).then_some(1 + usize::from(knobs >> 4) * 97),
    };

    let compressed = lzw_encoder::compress(payload, opts);
    let mut recovered = Vec::with_capacity(payload.len());
    unlzw::uncompress(&compressed[..], &mut recovered).expect("valid stream must decode");

    assert_eq!(
        recovered, payload,
        "round-trip mismatch: {} bytes compressed to {} with {:?}",
        payload.len(),
        compressed.len(),
        opts
    );
});
