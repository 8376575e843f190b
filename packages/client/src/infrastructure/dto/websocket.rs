//! WebSocket message DTOs.
//!
//! Every frame is a JSON object `{"type": ..., "data": ...}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Messages sent from the client to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum ClientMessage {
    AddNewPerson(AddNewPersonData),
    ChatMessage(ChatMessageData),
}

/// Payload of `add-new-person`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddNewPersonData {
    pub username: String,
}

/// Payload of `chat-message`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageData {
    pub username: String,
    pub msg: String,
}

/// Types of messages sent from the server to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerMessageType {
    StartMessageSession,
    UpdateMessageSession,
    EndMessageSession,
}

impl ServerMessageType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "start-message-session" => Some(Self::StartMessageSession),
            "update-message-session" => Some(Self::UpdateMessageSession),
            "end-message-session" => Some(Self::EndMessageSession),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StartMessageSession => "start-message-session",
            Self::UpdateMessageSession => "update-message-session",
            Self::EndMessageSession => "end-message-session",
        }
    }
}

/// Raw server frame before the type is checked.
///
/// `data` stays untyped so that an unknown `type` can be reported as such
/// instead of as a payload mismatch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerEnvelope {
    pub r#type: String,
    #[serde(default)]
    pub data: Value,
}
