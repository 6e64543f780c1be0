#![no_main]

use bytes::BytesMut;
use libfuzzer_sys::fuzz_target;
use tlv_codec::FrameCodec;
use tokio_util::codec::Decoder;

fuzz_target!(|data: &[u8]| {
    // Feed the buffering decoder in two uneven pieces
    let split = data.first().map_or(0, |b| *b as usize).min(data.len());
    let mut codec = FrameCodec::new();
    let mut buf = BytesMut::from(&data[..split]);

    while let Ok(Some(_)) = codec.decode(&mut buf) {}
    buf.extend_from_slice(&data[split..]);
    while let Ok(Some(_)) = codec.decode(&mut buf) {}
});
