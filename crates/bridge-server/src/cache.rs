//! Cached playback state and optimistic command-side updates.
//!
//! Holds the newest snapshot published by the player. Toggle-style commands
//! mutate it before the player confirms anything; the player's own next
//! publish is the source of truth and overwrites the optimistic value.

use std::sync::{Arc, Mutex};

use spotify_bridge_types::{PlaybackSnapshot, RepeatMode};

/// Step applied by volume up/down commands.
const VOLUME_STEP: u8 = 10;
/// Assumed volume when no snapshot has been received yet.
const VOLUME_UNKNOWN_BASE: u8 = 50;

/// Single-snapshot store, last write wins.
#[derive(Clone, Default)]
pub struct StateCache {
    inner: Arc<Mutex<Option<PlaybackSnapshot>>>,
}

impl StateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the stored snapshot wholesale.
    pub fn replace(&self, snapshot: PlaybackSnapshot) {
        if let Ok(mut slot) = self.inner.lock() {
            *slot = Some(snapshot);
        }
    }

    /// Current snapshot, or the empty default when none has been published.
    pub fn read(&self) -> PlaybackSnapshot {
        self.inner
            .lock()
            .ok()
            .and_then(|slot| slot.clone())
            .unwrap_or_default()
    }

    /// Flip `isPlaying` and return the new value.
    pub fn toggle_playing(&self) -> bool {
        let Ok(mut slot) = self.inner.lock() else {
            return false;
        };
        let snap = slot.get_or_insert_with(PlaybackSnapshot::default);
        snap.is_playing = !snap.is_playing;
        snap.is_playing
    }

    /// Flip `shuffle` and return the new value.
    pub fn toggle_shuffle(&self) -> bool {
        let Ok(mut slot) = self.inner.lock() else {
            return false;
        };
        let snap = slot.get_or_insert_with(PlaybackSnapshot::default);
        snap.shuffle = !snap.shuffle;
        snap.shuffle
    }

    /// Advance the repeat cycle and return the new position.
    pub fn cycle_repeat(&self) -> RepeatMode {
        let Ok(mut slot) = self.inner.lock() else {
            return RepeatMode::Off;
        };
        let snap = slot.get_or_insert_with(PlaybackSnapshot::default);
        snap.repeat_mode = snap.repeat_mode.next();
        snap.repeat_mode
    }

    /// Apply one clamped volume step and return the new percent.
    ///
    /// The base is the stored volume, or 50 when no snapshot has been
    /// received yet.
    pub fn step_volume(&self, up: bool) -> u8 {
        let Ok(mut slot) = self.inner.lock() else {
            return VOLUME_UNKNOWN_BASE;
        };
        let base = slot
            .as_ref()
            .map(|snap| snap.volume_percent)
            .unwrap_or(VOLUME_UNKNOWN_BASE);
        let next = if up {
            base.saturating_add(VOLUME_STEP).min(100)
        } else {
            base.saturating_sub(VOLUME_STEP)
        };
        let snap = slot.get_or_insert_with(PlaybackSnapshot::default);
        snap.volume_percent = next;
        next
    }
}
