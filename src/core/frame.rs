//! # Frame Encoding
//!
//! Blocking and async encode/decode of single TLV frames.
//!
//! ## Wire Format
//! ```text
//! [Type(1)] [Length(4, big-endian u32)] [Content(Length)]
//! ```
//!
//! Type is `1` for binary and `2` for text. Length never exceeds
//! [`MAX_PAYLOAD_SIZE`], and is checked before the content buffer is allocated.
//!
//! ## Completion Policy
//! Content is read until the buffer is full. A source that hands back fewer
//! bytes per call is simply read again; a source that ends early fails the
//! decode with an `UnexpectedEof` I/O error. A short payload is never returned.
//!
//! Decoding is stateless: each call consumes exactly one frame from a source
//! positioned at a frame boundary. For buffering across partial reads on a
//! live connection see [`crate::core::codec::FrameCodec`].

use crate::config::{HEADER_LEN, MAX_PAYLOAD_SIZE};
use crate::core::payload::{Binary, Payload, PayloadKind, Text};
use crate::error::{CodecError, Result};
use bytes::Bytes;
use std::io::{self, Read, Write};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Encode `payload` as one frame into `w`.
///
/// Returns the number of bytes written (`5 + content length`). If the sink
/// fails, the error carries how many bytes it accepted first.
pub fn encode<W: Write>(payload: &Payload, w: &mut W) -> Result<u64> {
    encode_with_limit(payload, w, MAX_PAYLOAD_SIZE)
}

/// Encode one frame, rejecting content longer than `limit` before writing.
///
/// `limit` can only tighten the bound; values above [`MAX_PAYLOAD_SIZE`] are clamped.
pub fn encode_with_limit<W: Write>(payload: &Payload, w: &mut W, limit: usize) -> Result<u64> {
    write_frame(w, payload.kind(), payload.as_bytes(), limit)
}

/// Decode the next frame from `r`.
///
/// Returns the payload and the number of bytes consumed.
pub fn decode<R: Read>(r: &mut R) -> Result<(Payload, u64)> {
    decode_with_limit(r, MAX_PAYLOAD_SIZE)
}

/// Decode the next frame, rejecting content longer than `limit`.
///
/// `limit` can only tighten the bound; values above [`MAX_PAYLOAD_SIZE`] are clamped.
pub fn decode_with_limit<R: Read>(r: &mut R, limit: usize) -> Result<(Payload, u64)> {
    let limit = limit.min(MAX_PAYLOAD_SIZE);
    let tag = read_tag(r)?;

    match PayloadKind::from_tag(tag) {
        Some(kind @ PayloadKind::Binary) => {
            let (content, n) = read_body(r, kind, tag, limit)?;
            Ok((Payload::Binary(Binary::new(content)), n))
        }
        Some(kind @ PayloadKind::Text) => {
            let (content, n) = read_body(r, kind, tag, limit)?;
            Ok((Payload::Text(Text::from_bytes(content)), n))
        }
        None => Err(CodecError::UnrecognizedType(tag)),
    }
}

/// Encode `payload` into an async sink. Same contract as [`encode`].
pub async fn encode_async<W: AsyncWrite + Unpin>(payload: &Payload, w: &mut W) -> Result<u64> {
    let content = payload.as_bytes();
    let header = header_for(payload.kind(), content.len(), MAX_PAYLOAD_SIZE)?;

    let mut written = 0u64;
    write_counted_async(w, &header, &mut written).await?;
    write_counted_async(w, content, &mut written).await?;
    Ok(written)
}

/// Decode the next frame from an async source. Same contract as [`decode`].
pub async fn decode_async<R: AsyncRead + Unpin>(r: &mut R) -> Result<(Payload, u64)> {
    let tag = r.read_u8().await?;
    let kind = PayloadKind::from_tag(tag).ok_or(CodecError::UnrecognizedType(tag))?;

    let size = r.read_u32().await? as usize;
    check_len(size, MAX_PAYLOAD_SIZE)?;

    let mut content = vec![0u8; size];
    r.read_exact(&mut content).await?;

    let payload = match kind {
        PayloadKind::Binary => Payload::Binary(Binary::new(content)),
        PayloadKind::Text => Payload::Text(Text::from_bytes(content)),
    };
    Ok((payload, (HEADER_LEN + size) as u64))
}

pub(crate) fn write_frame<W: Write>(
    w: &mut W,
    kind: PayloadKind,
    content: &[u8],
    limit: usize,
) -> Result<u64> {
    let header = header_for(kind, content.len(), limit)?;

    let mut written = 0u64;
    write_counted(w, &header, &mut written)?;
    write_counted(w, content, &mut written)?;
    Ok(written)
}

pub(crate) fn read_tag<R: Read>(r: &mut R) -> Result<u8> {
    let mut tag = [0u8; 1];
    r.read_exact(&mut tag)?;
    Ok(tag[0])
}

/// Read length and content for a frame whose tag byte was already consumed.
///
/// The tag is checked against `expected` before anything else is read.
pub(crate) fn read_body<R: Read>(
    r: &mut R,
    expected: PayloadKind,
    tag: u8,
    limit: usize,
) -> Result<(Vec<u8>, u64)> {
    if tag != expected.tag() {
        return Err(CodecError::TypeMismatch {
            expected,
            found: tag,
        });
    }

    let mut len = [0u8; 4];
    r.read_exact(&mut len)?;
    let size = u32::from_be_bytes(len) as usize;
    check_len(size, limit)?;

    let mut content = vec![0u8; size];
    r.read_exact(&mut content)?;

    Ok((content, (HEADER_LEN + size) as u64))
}

#[inline]
pub(crate) fn check_len(size: usize, limit: usize) -> Result<()> {
    if size > limit {
        return Err(CodecError::PayloadTooLarge { size, max: limit });
    }
    Ok(())
}

fn header_for(kind: PayloadKind, len: usize, limit: usize) -> Result<[u8; HEADER_LEN]> {
    check_len(len, limit.min(MAX_PAYLOAD_SIZE))?;

    let mut header = [0u8; HEADER_LEN];
    header[0] = kind.tag();
    header[1..].copy_from_slice(&(len as u32).to_be_bytes());
    Ok(header)
}

fn write_counted<W: Write>(w: &mut W, mut buf: &[u8], written: &mut u64) -> Result<()> {
    while !buf.is_empty() {
        match w.write(buf) {
            Ok(0) => return Err(write_failed(*written, io::ErrorKind::WriteZero.into())),
            Ok(n) => {
                *written += n as u64;
                buf = &buf[n..];
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(write_failed(*written, e)),
        }
    }
    Ok(())
}

async fn write_counted_async<W: AsyncWrite + Unpin>(
    w: &mut W,
    mut buf: &[u8],
    written: &mut u64,
) -> Result<()> {
    while !buf.is_empty() {
        match w.write(buf).await {
            Ok(0) => return Err(write_failed(*written, io::ErrorKind::WriteZero.into())),
            Ok(n) => {
                *written += n as u64;
                buf = &buf[n..];
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(write_failed(*written, e)),
        }
    }
    Ok(())
}

fn write_failed(written: u64, source: io::Error) -> CodecError {
    CodecError::WriteFailed { written, source }
}

/// Encode `payload` into a freshly allocated buffer.
pub fn to_bytes(payload: &Payload) -> Result<Bytes> {
    let mut buf = Vec::with_capacity(payload.encoded_len());
    encode(payload, &mut buf)?;
    Ok(Bytes::from(buf))
}
