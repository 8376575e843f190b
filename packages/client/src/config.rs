//! Client configuration.

/// Environment variable holding the WebSocket endpoint
pub const WS_URL_ENV: &str = "MIM_WS_URL";

/// Endpoint used when neither the flag nor the environment provides one
pub const DEFAULT_WS_URL: &str = "ws://127.0.0.1:8080/ws";

/// Settings read once at startup and used for every connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// WebSocket endpoint of the matchmaking server
    pub ws_url: String,
}

impl ClientConfig {
    pub fn new(ws_url: impl Into<String>) -> Self {
        Self {
            ws_url: ws_url.into(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WS_URL)
    }
}
