#![no_main]
use std::io::Read;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes through the whole-stream helper. Errors are expected;
    // panics are not.
    let _ = unlzw::uncompress(data, std::io::sink());

    // With a valid header forced on, every byte becomes code data.
    let mut z = vec![0x1F, 0x9D, 0x80 | (9 + data.first().copied().unwrap_or(0) % 8)];
    z.extend_from_slice(data);

    // Odd-sized reads cover the pending-stack and window-compaction paths.
    if let Ok(mut r) = unlzw::UncompressReader::new(&z[..]) {
        let mut buf = [0u8; 37];
        loop {
            match r.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
        }
        // A failed or finished reader must stay that way.
        assert!(matches!(r.read(&mut buf), Ok(0) | Err(_)));
    }
});
