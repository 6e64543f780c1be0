//! # tlv-codec
//!
//! Tagged, length-prefixed (TLV) framing for discrete payloads over any byte
//! stream.
//!
//! ```text
//! [Type(1)] [Length(4, big-endian)] [Content(Length)]
//! ```
//!
//! ## Quick Start
//! ```rust
//! use tlv_codec::{decode, encode, Payload};
//!
//! let mut wire = Vec::new();
//! encode(&Payload::text("hi"), &mut wire)?;
//! assert_eq!(wire, [0x02, 0x00, 0x00, 0x00, 0x02, b'h', b'i']);
//!
//! let (payload, consumed) = decode(&mut &wire[..])?;
//! assert_eq!(payload, Payload::text("hi"));
//! assert_eq!(consumed, 7);
//! # Ok::<(), tlv_codec::CodecError>(())
//! ```
//!
//! ## Modules
//! - [`core`]: payload types, frame encoding, `tokio_util` codec
//! - [`transport`]: framed payload streams over caller-supplied I/O
//! - [`config`]: wire constants and TOML/env configuration
//! - [`error`]: error taxonomy
//! - [`utils`]: logging setup and per-stream metrics

pub mod config;
pub mod core;
pub mod error;
pub mod transport;
pub mod utils;

pub use crate::config::MAX_PAYLOAD_SIZE;
pub use crate::core::codec::FrameCodec;
pub use crate::core::frame::{
    decode, decode_async, decode_with_limit, encode, encode_async, encode_with_limit,
};
pub use crate::core::payload::{Binary, Payload, PayloadKind, Text};
pub use crate::error::{CodecError, Result};
pub use crate::transport::stream::PayloadStream;
