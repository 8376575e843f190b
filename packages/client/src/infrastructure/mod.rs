//! Infrastructure layer: wire format and transport.

pub mod dto;
pub mod transport;
