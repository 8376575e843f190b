//! Session payload pushed by the matchmaking server.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::username::Username;

/// Participant descriptor inside a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub username: String,
    /// Any additional fields the server attaches to a participant
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Two-person chat session as sent by the server.
///
/// Only `person1` and `person2` are required. Everything else (message list,
/// status, end result, ...) is carried verbatim in `extra` so that the client
/// never drops data it does not understand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageSession {
    pub person1: Person,
    pub person2: Person,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Which side of the session a participant sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    Person1,
    Person2,
}

/// A single chat line extracted from the session's `messages` list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    pub username: String,
    pub msg: String,
}

impl MessageSession {
    /// Seat occupied by `username`, if any.
    ///
    /// `person1` wins when both participants share a name.
    pub fn seat_of(&self, username: &Username) -> Option<Seat> {
        if self.person1.username == username.as_str() {
            Some(Seat::Person1)
        } else if self.person2.username == username.as_str() {
            Some(Seat::Person2)
        } else {
            None
        }
    }

    /// The other participant from the point of view of `username`
    pub fn partner_of(&self, username: &Username) -> Option<&Person> {
        match self.seat_of(username)? {
            Seat::Person1 => Some(&self.person2),
            Seat::Person2 => Some(&self.person1),
        }
    }

    /// Chat lines in server order.
    ///
    /// Entries that are not objects with string `username` and `msg` fields are skipped.
    pub fn transcript(&self) -> Vec<TranscriptLine> {
        let Some(Value::Array(messages)) = self.extra.get("messages") else {
            return Vec::new();
        };

        messages
            .iter()
            .filter_map(|entry| {
                let username = entry.get("username")?.as_str()?;
                let msg = entry.get("msg")?.as_str()?;
                Some(TranscriptLine {
                    username: username.to_string(),
                    msg: msg.to_string(),
                })
            })
            .collect()
    }

    /// Human-readable outcome attached by the server when a session ends
    pub fn result(&self) -> Option<&str> {
        self.extra.get("result").and_then(Value::as_str)
    }
}
