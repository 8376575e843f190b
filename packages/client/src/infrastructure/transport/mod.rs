//! Transport abstraction
//!
//! The connection layer only needs to move text frames; this trait keeps the
//! WebSocket specifics out of it and lets tests drive the connection with an
//! in-memory transport.

pub mod websocket;

use async_trait::async_trait;

use crate::error::ClientError;

pub use websocket::WebSocketTransport;

/// Bidirectional text-frame transport
#[async_trait]
pub trait Transport: Send + 'static {
    /// Write one text frame
    async fn send(&mut self, text: String) -> Result<(), ClientError>;

    /// Read the next text frame.
    ///
    /// Returns `None` once the peer has closed the stream. Must be cancel-safe.
    async fn recv(&mut self) -> Option<Result<String, ClientError>>;

    /// Close the stream
    async fn close(&mut self) -> Result<(), ClientError>;
}
