//! Conversion logic between DTOs and domain messages.

use crate::{
    domain::{InboundMessage, MessageSession, OutboundMessage},
    error::ClientError,
};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// Domain → DTO
// ========================================

impl From<OutboundMessage> for dto::ClientMessage {
    fn from(message: OutboundMessage) -> Self {
        match message {
            OutboundMessage::AddNewPerson { username } => {
                Self::AddNewPerson(dto::AddNewPersonData {
                    username: username.into_string(),
                })
            }
            OutboundMessage::Chat { username, msg } => Self::ChatMessage(dto::ChatMessageData {
                username: username.into_string(),
                msg,
            }),
        }
    }
}

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<dto::ServerEnvelope> for InboundMessage {
    type Error = ClientError;

    fn try_from(envelope: dto::ServerEnvelope) -> Result<Self, Self::Error> {
        let message_type = dto::ServerMessageType::parse(&envelope.r#type)
            .ok_or_else(|| ClientError::UnknownMessageType(envelope.r#type.clone()))?;

        let session: MessageSession = serde_json::from_value(envelope.data).map_err(|e| {
            ClientError::MalformedMessage(format!("{}: {}", message_type.as_str(), e))
        })?;

        Ok(match message_type {
            dto::ServerMessageType::StartMessageSession => Self::SessionStarted(session),
            dto::ServerMessageType::UpdateMessageSession => Self::SessionUpdated(session),
            dto::ServerMessageType::EndMessageSession => Self::SessionEnded(session),
        })
    }
}

// ========================================
// Text frames
// ========================================

/// Encode an outbound message as a JSON text frame
pub fn encode_client_message(message: &OutboundMessage) -> Result<String, ClientError> {
    let dto_message = dto::ClientMessage::from(message.clone());
    serde_json::to_string(&dto_message).map_err(|e| ClientError::Serialization(e.to_string()))
}

/// Decode a JSON text frame from the server.
///
/// Invalid JSON and a missing `type` are [`ClientError::MalformedMessage`];
/// an unrecognized `type` is [`ClientError::UnknownMessageType`].
pub fn decode_server_message(text: &str) -> Result<InboundMessage, ClientError> {
    let envelope: dto::ServerEnvelope =
        serde_json::from_str(text).map_err(|e| ClientError::MalformedMessage(e.to_string()))?;
    InboundMessage::try_from(envelope)
}
