//! Client connection and publishing cadence settings.

use std::time::Duration;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Relay websocket URL, e.g. ws://127.0.0.1:4391/player/ws
    pub server_url: String,
    /// Publish sampling tick.
    pub heartbeat_interval: Duration,
    /// Max gap since the last transmission before a tick forces a republish.
    pub staleness_threshold: Duration,
    /// First reconnect delay; doubles up to `reconnect_max_delay`.
    pub reconnect_initial_delay: Duration,
    /// Reconnect delay ceiling.
    pub reconnect_max_delay: Duration,
}

impl ClientConfig {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            heartbeat_interval: Duration::from_millis(1500),
            staleness_threshold: Duration::from_secs(4),
            reconnect_initial_delay: Duration::from_secs(2),
            reconnect_max_delay: Duration::from_secs(30),
        }
    }
}
