//! # Transport Layer
//!
//! Framed payload streams over I/O the caller already owns.
//!
//! Socket setup, timeouts and reconnection stay with the caller; this layer
//! only frames bytes in both directions.

pub mod stream;

pub use stream::{framed, PayloadStream};
