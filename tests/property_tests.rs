//! Property-based tests using proptest
//!
//! These tests validate framing invariants across a wide range of randomly
//! generated inputs.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use bytes::BytesMut;
use proptest::prelude::*;
use std::io::Cursor;
use tlv_codec::core::frame::{decode, to_bytes};
use tlv_codec::{CodecError, FrameCodec, Payload, PayloadKind};
use tokio_util::codec::{Decoder, Encoder};

fn any_payload() -> impl Strategy<Value = Payload> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 0..4096).prop_map(|v| Payload::binary(v)),
        ".{0,512}".prop_map(|s: String| Payload::text(s)),
    ]
}

// Property: Decode(Encode(p)) == p
proptest! {
    #[test]
    fn prop_frame_roundtrip(payload in any_payload()) {
        let bytes = to_bytes(&payload).expect("encode should not fail");
        let (decoded, n) = decode(&mut Cursor::new(&bytes[..])).expect("decode should not fail");

        prop_assert_eq!(n as usize, bytes.len());
        prop_assert_eq!(decoded, payload);
    }
}

// Property: Header fields describe the content exactly
proptest! {
    #[test]
    fn prop_header_fields_correct(payload in any_payload()) {
        let bytes = to_bytes(&payload).expect("encode should not fail");

        prop_assert_eq!(bytes[0], payload.kind().tag());
        let length = u32::from_be_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]) as usize;
        prop_assert_eq!(length, payload.len());
        prop_assert_eq!(bytes.len(), 5 + payload.len());
        prop_assert_eq!(&bytes[5..], payload.as_bytes());
    }
}

// Property: A frame decodes to the variant its tag names, never the other
proptest! {
    #[test]
    fn prop_variant_identity(content in "[a-z]{0,64}") {
        let as_text = to_bytes(&Payload::text(content.clone())).expect("encode");
        let as_binary = to_bytes(&Payload::binary(content.clone().into_bytes())).expect("encode");

        let (text, _) = decode(&mut Cursor::new(&as_text[..])).expect("decode");
        let (binary, _) = decode(&mut Cursor::new(&as_binary[..])).expect("decode");

        prop_assert_eq!(text.kind(), PayloadKind::Text);
        prop_assert_eq!(binary.kind(), PayloadKind::Binary);
        prop_assert_eq!(text.as_bytes(), binary.as_bytes());
        prop_assert_ne!(text, binary);
    }
}

// Property: Arbitrary input never panics the blocking decoder
proptest! {
    #[test]
    fn prop_decode_arbitrary_never_panics(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode(&mut Cursor::new(&data[..]));
        prop_assert!(true);
    }
}

// Property: Any tag other than 1 or 2 is rejected with exactly that tag
proptest! {
    #[test]
    fn prop_unknown_tags_rejected(tag in any::<u8>(), rest in prop::collection::vec(any::<u8>(), 0..16)) {
        prop_assume!(tag != 1 && tag != 2);

        let mut data = vec![tag];
        data.extend_from_slice(&rest);

        match decode(&mut Cursor::new(&data[..])) {
            Err(CodecError::UnrecognizedType(found)) => prop_assert_eq!(found, tag),
            other => prop_assert!(false, "unexpected result: {:?}", other),
        }
    }
}

// Property: Streaming codec agrees with the blocking encoder
proptest! {
    #[test]
    fn prop_codec_matches_blocking_encoder(payload in any_payload()) {
        let mut buf = BytesMut::new();
        FrameCodec::new().encode(&payload, &mut buf).expect("encode");

        let bytes = to_bytes(&payload).expect("encode");
        prop_assert_eq!(&buf[..], &bytes[..]);
    }
}

// Property: Splitting a frame at any point still decodes the same payload
proptest! {
    #[test]
    fn prop_codec_any_split_point(payload in any_payload(), split in any::<prop::sample::Index>()) {
        let bytes = to_bytes(&payload).expect("encode");
        let at = split.index(bytes.len() + 1);

        let mut codec = FrameCodec::new();
        let mut buf = BytesMut::from(&bytes[..at]);

        let first = codec.decode(&mut buf).expect("partial decode should not error");
        if at < bytes.len() {
            prop_assert!(first.is_none());
            buf.extend_from_slice(&bytes[at..]);
            let decoded = codec.decode(&mut buf).expect("decode").expect("complete frame");
            prop_assert_eq!(decoded, payload);
        } else {
            prop_assert_eq!(first, Some(payload));
        }
        prop_assert!(buf.is_empty());
    }
}

// Property: Every strict prefix of a frame is a truncation, not a short payload
proptest! {
    #[test]
    fn prop_prefix_is_truncated(payload in any_payload(), cut in any::<prop::sample::Index>()) {
        let bytes = to_bytes(&payload).expect("encode");
        let at = cut.index(bytes.len());

        let err = decode(&mut Cursor::new(&bytes[..at])).expect_err("prefix must not decode");
        prop_assert!(err.is_truncated());
    }
}
