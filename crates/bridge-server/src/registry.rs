//! Single-slot player connection tracking and command dispatch.
//!
//! At most one player channel is authoritative at a time. A new connection
//! retargets the slot (last-connected-wins); a disconnect clears it only
//! when the disconnecting channel still owns the slot, so a late disconnect
//! from a superseded connection cannot evict its replacement.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use actix::prelude::*;

use spotify_bridge_types::CommandMessage;

/// Outbound text frame for the player websocket session.
#[derive(Message)]
#[rtype(result = "()")]
pub struct PlayerOutbound(pub String);

struct PlayerConnection {
    conn_id: u64,
    sender: Recipient<PlayerOutbound>,
    connected_at: Instant,
}

pub struct ConnectionRegistry {
    slot: Mutex<Option<PlayerConnection>>,
    counter: AtomicU64,
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
            counter: AtomicU64::new(1),
        }
    }

    /// Register `sender` as the active player channel, replacing any
    /// previous one. Returns the connection id used to guard `detach`.
    pub fn attach(&self, sender: Recipient<PlayerOutbound>) -> u64 {
        let conn_id = self.counter.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut slot) = self.slot.lock() {
            if slot.is_some() {
                tracing::info!(conn_id, "replacing existing player channel");
            }
            *slot = Some(PlayerConnection {
                conn_id,
                sender,
                connected_at: Instant::now(),
            });
        }
        conn_id
    }

    /// Clear the slot, but only while `conn_id` still owns it.
    pub fn detach(&self, conn_id: u64) {
        let Ok(mut slot) = self.slot.lock() else {
            return;
        };
        if let Some(conn) = slot.as_ref() {
            if conn.conn_id == conn_id {
                tracing::info!(
                    conn_id,
                    connected_secs = conn.connected_at.elapsed().as_secs(),
                    "player channel cleared"
                );
                *slot = None;
            }
        }
    }

    pub fn is_attached(&self) -> bool {
        self.slot
            .lock()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    /// Fire-and-forget dispatch to the active channel.
    ///
    /// No retry, no queuing; delivery is best-effort per the underlying
    /// transport. Fails only when no channel is registered.
    pub fn send(&self, msg: &CommandMessage) -> Result<(), ()> {
        let Ok(slot) = self.slot.lock() else {
            return Err(());
        };
        let Some(conn) = slot.as_ref() else {
            return Err(());
        };
        let payload = serde_json::to_string(msg).map_err(|_| ())?;
        conn.sender.do_send(PlayerOutbound(payload));
        Ok(())
    }
}
