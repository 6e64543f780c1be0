#![no_main]

use libfuzzer_sys::fuzz_target;
use tlv_codec::{decode, encode};

fuzz_target!(|data: &[u8]| {
    // Fuzz frame decoding - test for panics, oversized allocations, infinite loops
    let mut source = data;
    if let Ok((payload, consumed)) = decode(&mut source) {
        assert_eq!(consumed as usize, data.len() - source.len());

        // Anything that decodes must re-encode to the same bytes
        let mut wire = Vec::new();
        encode(&payload, &mut wire).expect("decoded payload re-encodes");
        assert_eq!(&wire[..], &data[..consumed as usize]);
    }
});
