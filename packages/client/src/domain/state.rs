//! Client session state machine.
//!
//! [`ClientState::apply`] is the single entry point for every change: user
//! intents and connection events both arrive as a [`ClientEvent`], and the
//! reducer answers with the [`Command`]s the runtime has to carry out. The
//! reducer itself never touches the network.

use crate::error::ClientError;

use super::{
    message::{InboundMessage, OutboundMessage},
    session::MessageSession,
    username::Username,
};

/// Whether the stored session is still running or is the server's final snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Active,
    Ended,
}

/// Root client state.
///
/// A connection exists if and only if the state is not [`ClientState::LoggedOut`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ClientState {
    /// No username, no connection, no session
    #[default]
    LoggedOut,
    /// Connected and announced, waiting for the server to pair us
    AwaitingSession { username: Username },
    /// Connected with a session snapshot from the server
    InSession {
        username: Username,
        session: MessageSession,
        phase: SessionPhase,
    },
}

/// Everything that can drive a state transition
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// The user submitted the join form
    Join(Username),
    /// The user typed a chat line
    SendChat(String),
    /// The user asked to be matched again
    Rematch,
    /// The user left
    Quit,
    /// The socket finished its handshake
    Opened,
    /// A decoded server message
    Inbound(InboundMessage),
    /// A transport error; diagnostics only
    SocketError(String),
    /// The socket is gone, whatever the cause
    Closed,
}

/// Intents coming from the user interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIntent {
    Join(Username),
    SendChat(String),
    Rematch,
    Quit,
}

impl From<UserIntent> for ClientEvent {
    fn from(intent: UserIntent) -> Self {
        match intent {
            UserIntent::Join(username) => Self::Join(username),
            UserIntent::SendChat(msg) => Self::SendChat(msg),
            UserIntent::Rematch => Self::Rematch,
            UserIntent::Quit => Self::Quit,
        }
    }
}

/// Side effects requested by the reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open the single connection for this username
    Connect(Username),
    /// Write a message on the open connection
    Send(OutboundMessage),
    /// Close the connection
    Disconnect,
}

impl ClientState {
    pub fn username(&self) -> Option<&Username> {
        match self {
            Self::LoggedOut => None,
            Self::AwaitingSession { username } | Self::InSession { username, .. } => {
                Some(username)
            }
        }
    }

    pub fn session(&self) -> Option<&MessageSession> {
        match self {
            Self::InSession { session, .. } => Some(session),
            _ => None,
        }
    }

    pub fn is_logged_out(&self) -> bool {
        matches!(self, Self::LoggedOut)
    }

    /// Apply an event and return the commands to execute, in order.
    ///
    /// On error the state is left untouched.
    pub fn apply(&mut self, event: ClientEvent) -> Result<Vec<Command>, ClientError> {
        match event {
            ClientEvent::Join(username) => Ok(self.join(username)),
            ClientEvent::SendChat(msg) => {
                let username = self.connected_username()?.clone();
                Ok(vec![Command::Send(OutboundMessage::Chat { username, msg })])
            }
            ClientEvent::Rematch => {
                let username = self.connected_username()?.clone();
                tracing::info!("Requesting a new partner for '{}'", username);
                *self = Self::AwaitingSession {
                    username: username.clone(),
                };
                Ok(vec![Command::Send(OutboundMessage::AddNewPerson {
                    username,
                })])
            }
            ClientEvent::Quit => {
                if self.is_logged_out() {
                    return Ok(Vec::new());
                }
                tracing::info!("Quitting");
                *self = Self::LoggedOut;
                Ok(vec![Command::Disconnect])
            }
            ClientEvent::Opened => {
                let username = self.connected_username()?.clone();
                Ok(vec![Command::Send(OutboundMessage::AddNewPerson {
                    username,
                })])
            }
            ClientEvent::Inbound(message) => {
                self.receive(message)?;
                Ok(Vec::new())
            }
            ClientEvent::SocketError(error) => {
                tracing::error!("WebSocket error: {}", error);
                Ok(Vec::new())
            }
            ClientEvent::Closed => {
                tracing::info!("Connection closed");
                *self = Self::LoggedOut;
                Ok(Vec::new())
            }
        }
    }

    fn join(&mut self, username: Username) -> Vec<Command> {
        if let Some(current) = self.username() {
            tracing::warn!(
                "Ignoring join as '{}': already connected as '{}'",
                username,
                current
            );
            return Vec::new();
        }

        tracing::info!("Joining as '{}'", username);
        *self = Self::AwaitingSession {
            username: username.clone(),
        };
        vec![Command::Connect(username)]
    }

    fn receive(&mut self, message: InboundMessage) -> Result<(), ClientError> {
        let username = self.connected_username()?.clone();
        let phase = match message {
            InboundMessage::SessionEnded(_) => SessionPhase::Ended,
            InboundMessage::SessionStarted(_) | InboundMessage::SessionUpdated(_) => {
                SessionPhase::Active
            }
        };
        tracing::debug!(
            "Session {:?}: {} / {}",
            phase,
            message.session().person1.username,
            message.session().person2.username
        );

        *self = Self::InSession {
            username,
            session: message.into_session(),
            phase,
        };
        Ok(())
    }

    fn connected_username(&self) -> Result<&Username, ClientError> {
        self.username().ok_or(ClientError::NotConnected)
    }
}
