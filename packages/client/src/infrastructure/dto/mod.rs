//! Data Transfer Objects (DTOs) for the messenger protocol.
//!
//! - `websocket`: JSON frames exchanged over the WebSocket
//! - `conversion`: mapping between frames and domain messages

pub mod conversion;
pub mod websocket;

pub use conversion::{decode_server_message, encode_client_message};
