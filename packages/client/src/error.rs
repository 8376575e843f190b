//! Error types for the messenger client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server sent a message type this client does not know
    #[error("Unknown message type: {0}")]
    UnknownMessageType(String),

    /// An inbound frame was not a valid protocol message
    #[error("Malformed message: {0}")]
    MalformedMessage(String),

    /// An action needed an open connection but there is none
    #[error("Not connected to the chat server")]
    NotConnected,

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// An outbound message could not be encoded
    #[error("Failed to serialize message: {0}")]
    Serialization(String),
}
