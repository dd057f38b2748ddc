//! Maps control requests to outbound player commands.
//!
//! Each command checks that a player channel is attached, validates its
//! parameter where one exists, applies the optimistic cache mutation for
//! toggle-style commands, dispatches, and echoes the result. An invalid
//! parameter is rejected before anything is dispatched. The optimistic
//! value may disagree with the player for a moment; the player's next
//! snapshot publish settles it.

use std::sync::Arc;

use actix_web::HttpResponse;

use spotify_bridge_types::{Command, CommandMessage};

use crate::cache::StateCache;
use crate::models::{CommandAck, ErrorBody};
use crate::registry::ConnectionRegistry;

/// Control-surface failures surfaced to HTTP callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandError {
    /// No player channel is attached.
    NoPlayerAttached,
    /// Seek argument did not parse as non-negative whole seconds.
    InvalidSeconds,
    /// Volume argument did not parse as an integer level.
    InvalidVolume,
}

impl CommandError {
    /// Convert a command error into an HTTP response.
    pub fn into_response(self) -> HttpResponse {
        match self {
            CommandError::NoPlayerAttached => {
                HttpResponse::BadRequest().json(ErrorBody::new("No Spotify connected"))
            }
            CommandError::InvalidSeconds => {
                HttpResponse::BadRequest().json(ErrorBody::new("Invalid seconds"))
            }
            CommandError::InvalidVolume => {
                HttpResponse::BadRequest().json(ErrorBody::new("Invalid volume"))
            }
        }
    }
}

/// Relays control commands to the attached player and answers optimistically.
#[derive(Clone)]
pub struct CommandRouter {
    registry: Arc<ConnectionRegistry>,
    cache: StateCache,
}

impl CommandRouter {
    pub fn new(registry: Arc<ConnectionRegistry>, cache: StateCache) -> Self {
        Self { registry, cache }
    }

    fn ensure_attached(&self) -> Result<(), CommandError> {
        if self.registry.is_attached() {
            Ok(())
        } else {
            Err(CommandError::NoPlayerAttached)
        }
    }

    fn dispatch(&self, msg: CommandMessage) -> Result<(), CommandError> {
        self.registry
            .send(&msg)
            .map_err(|_| CommandError::NoPlayerAttached)
    }

    pub fn playpause(&self) -> Result<CommandAck, CommandError> {
        self.ensure_attached()?;
        let playing = self.cache.toggle_playing();
        self.dispatch(CommandMessage::bare(Command::PlayPause))?;
        let value = if playing { "Playing" } else { "Paused" };
        tracing::info!(value, "play/pause relayed");
        Ok(CommandAck::with_value("playpause", value))
    }

    pub fn next_track(&self) -> Result<CommandAck, CommandError> {
        self.ensure_attached()?;
        self.dispatch(CommandMessage::bare(Command::Next))?;
        tracing::info!("next track relayed");
        Ok(CommandAck::with_value("next", "Next Track"))
    }

    pub fn previous_track(&self) -> Result<CommandAck, CommandError> {
        self.ensure_attached()?;
        self.dispatch(CommandMessage::bare(Command::Previous))?;
        tracing::info!("previous track relayed");
        Ok(CommandAck::with_value("previous", "Previous Track"))
    }

    pub fn shuffle(&self) -> Result<CommandAck, CommandError> {
        self.ensure_attached()?;
        let enabled = self.cache.toggle_shuffle();
        self.dispatch(CommandMessage::bare(Command::Shuffle))?;
        let value = if enabled { "Enabled" } else { "Disabled" };
        tracing::info!(value, "shuffle relayed");
        Ok(CommandAck::with_value("shuffle", value))
    }

    pub fn repeat_mode(&self) -> Result<CommandAck, CommandError> {
        self.ensure_attached()?;
        let mode = self.cache.cycle_repeat();
        self.dispatch(CommandMessage::bare(Command::RepeatMode))?;
        tracing::info!(mode = mode.as_str(), "repeat mode relayed");
        Ok(CommandAck::with_value("repeatmode", mode.as_str()))
    }

    pub fn mute(&self) -> Result<CommandAck, CommandError> {
        self.ensure_attached()?;
        self.dispatch(CommandMessage::bare(Command::Mute))?;
        tracing::info!("mute relayed");
        Ok(CommandAck::bare())
    }

    pub fn unmute(&self) -> Result<CommandAck, CommandError> {
        self.ensure_attached()?;
        self.dispatch(CommandMessage::bare(Command::Unmute))?;
        tracing::info!("unmute relayed");
        Ok(CommandAck::bare())
    }

    pub fn seek(&self, raw_seconds: &str) -> Result<CommandAck, CommandError> {
        self.ensure_attached()?;
        let seconds: u64 = raw_seconds
            .parse()
            .map_err(|_| CommandError::InvalidSeconds)?;
        self.dispatch(CommandMessage::seek(seconds))?;
        tracing::info!(seconds, "seek relayed");
        Ok(CommandAck::with_value("seek", seconds))
    }

    pub fn set_volume(&self, raw_level: &str) -> Result<CommandAck, CommandError> {
        self.ensure_attached()?;
        // The level is passed through unclamped; the player clamps to its
        // own scale on execution.
        let level: i64 = raw_level.parse().map_err(|_| CommandError::InvalidVolume)?;
        self.dispatch(CommandMessage::set_volume(level))?;
        tracing::info!(level, "volume relayed");
        Ok(CommandAck::with_value("volume", level))
    }

    pub fn volume_step(&self, up: bool) -> Result<CommandAck, CommandError> {
        self.ensure_attached()?;
        let percent = self.cache.step_volume(up);
        let cmd = if up { Command::VolUp } else { Command::VolDown };
        self.dispatch(CommandMessage::bare(cmd))?;
        tracing::info!(percent, up, "volume step relayed");
        Ok(CommandAck::with_value("volume", percent))
    }
}
