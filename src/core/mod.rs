//! # Core Framing Components
//!
//! Payload types, frame encoding, and the streaming codec.
//!
//! ## Components
//! - **Payload**: closed set of values a frame can carry (binary, text)
//! - **Frame**: blocking and async encode/decode of a single frame
//! - **Codec**: Tokio codec for framing over byte streams
//!
//! ## Wire Format
//! ```text
//! [Type(1)] [Length(4)] [Content(N)]
//! ```
//!
//! ## Security
//! - Maximum content size: 10 MiB (prevents memory exhaustion)
//! - Length validation before allocation
//! - Unknown type tags are rejected, never skipped

pub mod codec;
pub mod frame;
pub mod payload;
