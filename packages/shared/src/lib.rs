//! Shared utilities for Minimum Instant Messenger binaries.

pub mod logger;
pub mod time;
