//! Snapshot publishing discipline.
//!
//! A snapshot is transmitted only when its canonical serialized form
//! differs from the last transmitted one, unless the publish is forced.
//! Suppressed duplicates do not count as transmissions, so the staleness
//! clock keeps running and the next heartbeat past the threshold forces a
//! republish even when nothing changed.

use std::time::{Duration, Instant};

use spotify_bridge_types::PlaybackSnapshot;

/// Tracks the last transmitted payload and transmission time.
#[derive(Debug, Default)]
pub struct ChangeTracker {
    last_payload: Option<String>,
    last_sent_at: Option<Instant>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize `snapshot` and decide whether it should be transmitted.
    ///
    /// Returns the payload to send, or `None` when suppressed by change
    /// detection. A returned payload is recorded as transmitted at `now`.
    pub fn prepare(
        &mut self,
        snapshot: &PlaybackSnapshot,
        force: bool,
        now: Instant,
    ) -> Option<String> {
        let payload = match serde_json::to_string(snapshot) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "snapshot serialization failed");
                return None;
            }
        };
        if !force && self.last_payload.as_deref() == Some(payload.as_str()) {
            return None;
        }
        self.last_payload = Some(payload.clone());
        self.last_sent_at = Some(now);
        Some(payload)
    }

    /// True when more than `threshold` has passed since the last
    /// transmission, or when none has happened yet.
    pub fn is_stale(&self, now: Instant, threshold: Duration) -> bool {
        match self.last_sent_at {
            Some(sent_at) => now.duration_since(sent_at) > threshold,
            None => true,
        }
    }
}
