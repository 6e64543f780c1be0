//! # Payload Stream
//!
//! Framed payload exchange over a caller-supplied async byte stream.
//!
//! `PayloadStream` pairs a [`FrameCodec`] with any `AsyncRead + AsyncWrite`
//! (a TCP stream, a Unix socket, an in-memory duplex) and counts what passes
//! through it. It never opens connections and has no timeouts of its own; a
//! deadline on the underlying stream surfaces here as an ordinary I/O error.
//!
//! Frame boundaries depend on strictly sequential reads, so `recv` takes
//! `&mut self`. After any receive error the stream should be dropped, since
//! alignment with the next frame can no longer be assumed.

use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::Framed;
use tracing::{debug, instrument, warn};

use crate::config::CodecConfig;
use crate::core::codec::FrameCodec;
use crate::core::payload::{Payload, PayloadKind};
use crate::error::Result;
use crate::utils::metrics::{CodecMetrics, Timer};

/// Wrap `io` in a `Framed` using the default codec
pub fn framed<T>(io: T) -> Framed<T, FrameCodec>
where
    T: AsyncRead + AsyncWrite,
{
    Framed::new(io, FrameCodec::new())
}

pub struct PayloadStream<T> {
    framed: Framed<T, FrameCodec>,
    metrics: Arc<CodecMetrics>,
}

impl<T> PayloadStream<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(io: T) -> Self {
        Self {
            framed: framed(io),
            metrics: Arc::new(CodecMetrics::new()),
        }
    }

    /// Stream whose codec enforces the payload limit in `config`
    pub fn with_config(io: T, config: &CodecConfig) -> Result<Self> {
        Ok(Self {
            framed: Framed::new(io, FrameCodec::with_config(config)?),
            metrics: Arc::new(CodecMetrics::new()),
        })
    }

    /// Encode and flush one payload
    #[instrument(skip(self, payload), fields(kind = %payload.kind(), size = payload.len()))]
    pub async fn send(&mut self, payload: &Payload) -> Result<()> {
        let _timer = Timer::start("payload_send");
        match self.framed.send(payload).await {
            Ok(()) => {
                self.metrics.frame_sent(payload.encoded_len() as u64);
                debug!("Frame sent");
                Ok(())
            }
            Err(e) => {
                self.metrics.encode_error();
                warn!(error = %e, "Failed to send frame");
                Err(e)
            }
        }
    }

    /// Receive the next payload.
    ///
    /// Returns `Ok(None)` when the peer closes the stream on a frame boundary.
    /// Closing mid-frame is an error.
    #[instrument(skip(self))]
    pub async fn recv(&mut self) -> Result<Option<Payload>> {
        match self.framed.next().await {
            Some(Ok(payload)) => {
                self.metrics.frame_received(
                    payload.encoded_len() as u64,
                    payload.kind() == PayloadKind::Text,
                );
                debug!(kind = %payload.kind(), size = payload.len(), "Frame received");
                Ok(Some(payload))
            }
            Some(Err(e)) => {
                self.metrics.decode_error();
                warn!(error = %e, "Failed to decode frame");
                Err(e)
            }
            None => {
                debug!("Stream closed");
                Ok(None)
            }
        }
    }

    /// Shared handle to this stream's counters
    pub fn metrics(&self) -> Arc<CodecMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn codec(&self) -> &FrameCodec {
        self.framed.codec()
    }

    /// Release the underlying stream, logging this stream's counters.
    ///
    /// Buffered but undecoded bytes are lost.
    pub fn into_inner(self) -> T {
        self.metrics.log_summary();
        self.framed.into_inner()
    }
}
