//! # Error Types
//!
//! Error handling for the TLV frame codec.
//!
//! Every failure is terminal for the encode or decode call that produced it.
//! Nothing is retried and the codec never attempts to resynchronize: once a
//! decode fails mid-frame, the caller should discard the stream.
//!
//! ## Error Categories
//! - **I/O Errors**: the source failed or ended early (truncation)
//! - **Write Errors**: the sink failed partway through a frame
//! - **Format Errors**: unknown tag, tag mismatch, oversized length
//! - **Setup Errors**: configuration and logging initialization
//!
//! ## Example Usage
//! ```rust
//! use tlv_codec::core::frame::decode;
//! use tlv_codec::error::CodecError;
//!
//! let mut source: &[u8] = &[0x03, 0x00];
//! match decode(&mut source) {
//!     Err(CodecError::UnrecognizedType(tag)) => assert_eq!(tag, 0x03),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use crate::core::payload::PayloadKind;
use std::io;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// Configuration errors
    pub const ERR_CONFIG_READ: &str = "Failed to read config file";
    pub const ERR_CONFIG_PARSE: &str = "Failed to parse TOML";
    pub const ERR_CONFIG_SERIALIZE: &str = "Failed to serialize config";
    pub const ERR_CONFIG_WRITE: &str = "Failed to write config file";

    /// Logging errors
    pub const ERR_LOG_FILE_OPEN: &str = "Failed to open log file";
    pub const ERR_LOG_INIT: &str = "Failed to install tracing subscriber";
}

// CodecError is the single error type for every codec operation
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Write failed after {written} bytes: {source}")]
    WriteFailed {
        written: u64,
        #[source]
        source: io::Error,
    },

    #[error("Unrecognized frame type: {0:#04x}")]
    UnrecognizedType(u8),

    #[error("Invalid {expected}: found type tag {found:#04x}")]
    TypeMismatch { expected: PayloadKind, found: u8 },

    #[error("Payload too large: {size} bytes (maximum {max})")]
    PayloadTooLarge { size: usize, max: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),
}

impl CodecError {
    /// Bytes handed to the sink before an encode failed, if this is a write error.
    pub fn bytes_written(&self) -> Option<u64> {
        match self {
            CodecError::WriteFailed { written, .. } => Some(*written),
            _ => None,
        }
    }

    /// True when the source ended before a full frame was read.
    pub fn is_truncated(&self) -> bool {
        matches!(self, CodecError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
    }

    /// True for errors caused by the bytes on the wire rather than the transport.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            CodecError::UnrecognizedType(_)
                | CodecError::TypeMismatch { .. }
                | CodecError::PayloadTooLarge { .. }
        )
    }
}

/// Type alias for Results using CodecError
pub type Result<T> = std::result::Result<T, CodecError>;
