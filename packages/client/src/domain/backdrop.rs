//! Screen colour derived from the client state.

use super::state::ClientState;
use super::session::Seat;

/// Background colour of the messenger window.
///
/// Gray outside a session; inside one, blue for `person1` and green for
/// `person2`, so both sides of a conversation look different.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    LightGray,
    LightBlue,
    LightGreen,
}

impl Backdrop {
    pub fn for_state(state: &ClientState) -> Self {
        match state {
            ClientState::InSession {
                username, session, ..
            } => match session.seat_of(username) {
                Some(Seat::Person1) => Self::LightBlue,
                _ => Self::LightGreen,
            },
            _ => Self::LightGray,
        }
    }

    /// CSS colour name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LightGray => "lightgray",
            Self::LightBlue => "lightblue",
            Self::LightGreen => "lightgreen",
        }
    }

    /// ANSI SGR sequence for a matching terminal background
    pub fn ansi_background(&self) -> &'static str {
        match self {
            Self::LightGray => "\x1b[30;47m",
            Self::LightBlue => "\x1b[30;106m",
            Self::LightGreen => "\x1b[30;102m",
        }
    }
}
