//! # Payload Types
//!
//! The closed set of values a frame can carry.
//!
//! [`Payload`] is a sum type over [`Binary`] and [`Text`]. Both share the same
//! wire shape and differ only in their type tag, which lets a receiver branch
//! on intent. Each variant can write itself to a sink and read itself back
//! from a source; its reader checks that the tag on the wire is its own.

use crate::config::{HEADER_LEN, MAX_PAYLOAD_SIZE, TYPE_BINARY, TYPE_TEXT};
use crate::core::frame;
use crate::error::Result;
use bytes::Bytes;
use std::borrow::Cow;
use std::fmt;
use std::io::{Read, Write};
use std::str::Utf8Error;

/// Type tag of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    /// Opaque bytes
    Binary,
    /// Text, UTF-8 by convention
    Text,
}

impl PayloadKind {
    /// Get the tag byte for the wire
    pub fn tag(self) -> u8 {
        match self {
            PayloadKind::Binary => TYPE_BINARY,
            PayloadKind::Text => TYPE_TEXT,
        }
    }

    /// Detect kind from a tag byte
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            TYPE_BINARY => Some(PayloadKind::Binary),
            TYPE_TEXT => Some(PayloadKind::Text),
            _ => None,
        }
    }

    /// Get human-readable name
    pub fn name(self) -> &'static str {
        match self {
            PayloadKind::Binary => "Binary",
            PayloadKind::Text => "Text",
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Opaque binary payload
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Binary(Bytes);

impl Binary {
    pub fn new(content: impl Into<Bytes>) -> Self {
        Self(content.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    /// Write this payload as a Binary frame, returning the bytes written.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<u64> {
        frame::write_frame(w, PayloadKind::Binary, &self.0, MAX_PAYLOAD_SIZE)
    }

    /// Read one Binary frame, tag included.
    ///
    /// Fails with [`CodecError::TypeMismatch`](crate::error::CodecError::TypeMismatch) if the frame carries any other tag.
    pub fn read_from<R: Read>(r: &mut R) -> Result<(Self, u64)> {
        let tag = frame::read_tag(r)?;
        let (content, n) = frame::read_body(r, PayloadKind::Binary, tag, MAX_PAYLOAD_SIZE)?;
        Ok((Self(Bytes::from(content)), n))
    }
}

/// Text payload
///
/// Content is fixed at construction. It is carried as raw bytes: the wire does
/// not guarantee UTF-8, so the string views are checked or lossy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Text(Bytes);

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self(Bytes::from(content.into()))
    }

    /// Text from bytes that may not be UTF-8, as received from a peer.
    pub fn from_bytes(content: impl Into<Bytes>) -> Self {
        Self(content.into())
    }

    /// Content as a string slice, if it is valid UTF-8.
    pub fn as_str(&self) -> std::result::Result<&str, Utf8Error> {
        std::str::from_utf8(&self.0)
    }

    /// Content as a string, with invalid sequences replaced by U+FFFD.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    /// Write this payload as a Text frame, returning the bytes written.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<u64> {
        frame::write_frame(w, PayloadKind::Text, &self.0, MAX_PAYLOAD_SIZE)
    }

    /// Read one Text frame, tag included.
    ///
    /// Fails with [`CodecError::TypeMismatch`](crate::error::CodecError::TypeMismatch) if the frame carries any other tag.
    pub fn read_from<R: Read>(r: &mut R) -> Result<(Self, u64)> {
        let tag = frame::read_tag(r)?;
        let (content, n) = frame::read_body(r, PayloadKind::Text, tag, MAX_PAYLOAD_SIZE)?;
        Ok((Self::from_bytes(content), n))
    }
}

/// A value carried by one frame
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Payload {
    Binary(Binary),
    Text(Text),
}

impl Payload {
    /// Shorthand for a binary payload
    pub fn binary(content: impl Into<Bytes>) -> Self {
        Payload::Binary(Binary::new(content))
    }

    /// Shorthand for a text payload
    pub fn text(content: impl Into<String>) -> Self {
        Payload::Text(Text::new(content))
    }

    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Binary(_) => PayloadKind::Binary,
            Payload::Text(_) => PayloadKind::Text,
        }
    }

    /// Raw content bytes, without the frame header
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Payload::Binary(b) => b.as_bytes(),
            Payload::Text(t) => t.as_bytes(),
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// Size of this payload once framed
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.len()
    }

    /// Encode this payload to `w`. See [`frame::encode`].
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<u64> {
        frame::encode(self, w)
    }

    /// Decode the next frame from `r`. See [`frame::decode`].
    pub fn read_from<R: Read>(r: &mut R) -> Result<(Self, u64)> {
        frame::decode(r)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Binary(b) => f.write_str(&String::from_utf8_lossy(b.as_bytes())),
            Payload::Text(t) => f.write_str(&t.to_string_lossy()),
        }
    }
}

impl From<Binary> for Payload {
    fn from(b: Binary) -> Self {
        Payload::Binary(b)
    }
}

impl From<Text> for Payload {
    fn from(t: Text) -> Self {
        Payload::Text(t)
    }
}

impl From<Bytes> for Payload {
    fn from(b: Bytes) -> Self {
        Payload::binary(b)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(v: Vec<u8>) -> Self {
        Payload::binary(v)
    }
}

impl From<&[u8]> for Payload {
    fn from(v: &[u8]) -> Self {
        Payload::binary(Bytes::copy_from_slice(v))
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Payload::text(s)
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Payload::text(s)
    }
}
