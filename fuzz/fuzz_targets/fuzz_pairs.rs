//! Feeds arbitrary bytes through the pair parser: it must never panic, and
//! the read cursor must strictly advance so iteration always terminates.

#![no_main]

use cookiewire::{ByteBuffer, CodecOptions, PairCodec};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    for spaced in [false, true] {
        let codec = PairCodec::new(CodecOptions {
            space_after_delimiter: spaced,
        });
        let mut source = ByteBuffer::wrap(data);
        let mut name = ByteBuffer::new();
        let mut value = ByteBuffer::new();
        loop {
            let before = source.read_pos();
            match codec.get(&mut source, &mut name, &mut value, true) {
                Ok(false) => break,
                Ok(true) | Err(_) => assert!(source.read_pos() > before),
            }
        }
    }
});
