//! Protocol messages as seen by the domain.
//!
//! Wire encoding lives in `infrastructure::dto`.

use super::{session::MessageSession, username::Username};

/// Messages the client sends to the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMessage {
    /// Announce that `username` wants to join (or rejoin) matchmaking
    AddNewPerson { username: Username },
    /// Chat text typed by `username`
    Chat { username: Username, msg: String },
}

/// Messages the server pushes to the client.
///
/// All three carry a full session snapshot that replaces the previous one.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    SessionStarted(MessageSession),
    SessionUpdated(MessageSession),
    SessionEnded(MessageSession),
}

impl InboundMessage {
    pub fn session(&self) -> &MessageSession {
        match self {
            Self::SessionStarted(session)
            | Self::SessionUpdated(session)
            | Self::SessionEnded(session) => session,
        }
    }

    pub fn into_session(self) -> MessageSession {
        match self {
            Self::SessionStarted(session)
            | Self::SessionUpdated(session)
            | Self::SessionEnded(session) => session,
        }
    }
}
