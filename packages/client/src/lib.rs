//! Minimum Instant Messenger client library.
//!
//! A terminal client for a two-person matchmaking chat server. The client
//! announces a username over a single WebSocket and then follows the session
//! snapshots the server pushes.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;

pub mod config;
pub mod connection;
pub mod error;
pub mod runner;

pub use runner::Client;
