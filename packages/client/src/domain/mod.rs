//! Domain layer for the messenger client.
//!
//! Everything here is free of I/O: the value objects, the session payload
//! pushed by the server, and the client state machine that turns events into
//! commands for the connection layer.

pub mod backdrop;
pub mod message;
pub mod session;
pub mod state;
pub mod username;

pub use backdrop::Backdrop;
pub use message::{InboundMessage, OutboundMessage};
pub use session::{MessageSession, Person, Seat, TranscriptLine};
pub use state::{ClientEvent, ClientState, Command, SessionPhase, UserIntent};
pub use username::{Username, UsernameError};
