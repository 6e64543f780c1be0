//! # Frame Codec
//!
//! `tokio_util` codec that buffers partial TLV frames across reads.
//!
//! The decoder only ever looks at bytes already in the buffer. An incomplete
//! frame yields `Ok(None)` and leaves the buffer untouched; format errors are
//! reported as soon as enough bytes have arrived to detect them, so an
//! oversized length is rejected from the 5-byte header alone.

use crate::config::{CodecConfig, HEADER_LEN, MAX_PAYLOAD_SIZE};
use crate::core::frame::check_len;
use crate::core::payload::{Binary, Payload, PayloadKind, Text};
use crate::error::{CodecError, Result};
use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

#[derive(Debug, Clone, Copy)]
pub struct FrameCodec {
    max_payload_size: usize,
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameCodec {
    /// Codec accepting payloads up to [`MAX_PAYLOAD_SIZE`]
    pub fn new() -> Self {
        Self {
            max_payload_size: MAX_PAYLOAD_SIZE,
        }
    }

    /// Codec using the payload limit from `config`, which must validate.
    pub fn with_config(config: &CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            max_payload_size: config.max_payload_size,
        })
    }

    pub fn max_payload_size(&self) -> usize {
        self.max_payload_size
    }
}

impl Decoder for FrameCodec {
    type Item = Payload;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        let Some(&tag) = src.first() else {
            return Ok(None);
        };
        let kind = PayloadKind::from_tag(tag).ok_or(CodecError::UnrecognizedType(tag))?;

        if src.len() < HEADER_LEN {
            src.reserve(HEADER_LEN - src.len());
            return Ok(None);
        }

        let size = u32::from_be_bytes([src[1], src[2], src[3], src[4]]) as usize;
        check_len(size, self.max_payload_size)?;

        let frame_len = HEADER_LEN + size;
        if src.len() < frame_len {
            src.reserve(frame_len - src.len());
            return Ok(None);
        }

        src.advance(HEADER_LEN);
        let content = src.split_to(size).freeze();

        let payload = match kind {
            PayloadKind::Binary => Payload::Binary(Binary::new(content)),
            PayloadKind::Text => Payload::Text(Text::from_bytes(content)),
        };
        Ok(Some(payload))
    }
}

impl Encoder<&Payload> for FrameCodec {
    type Error = CodecError;

    fn encode(&mut self, item: &Payload, dst: &mut BytesMut) -> Result<()> {
        let content = item.as_bytes();
        check_len(content.len(), self.max_payload_size)?;

        dst.reserve(HEADER_LEN + content.len());
        dst.put_u8(item.kind().tag());
        dst.put_u32(content.len() as u32);
        dst.extend_from_slice(content);
        Ok(())
    }
}

impl Encoder<Payload> for FrameCodec {
    type Error = CodecError;

    fn encode(&mut self, item: Payload, dst: &mut BytesMut) -> Result<()> {
        Encoder::<&Payload>::encode(self, &item, dst)
    }
}
