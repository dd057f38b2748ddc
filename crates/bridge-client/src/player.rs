//! Live player seam and command execution.

use anyhow::Result;

use spotify_bridge_types::{Command, CommandMessage, PlaybackSnapshot};

/// Volume restored by an unmute when no better value is known.
const UNMUTE_VOLUME: f32 = 0.5;
/// Step applied by volume up/down commands (player-internal scale).
const VOLUME_STEP: f32 = 0.1;

/// Control seam to the live player object inside the host application.
///
/// Volume uses the player-internal [0, 1] scale; published snapshots carry
/// percent. Mutations report failure through `Result` so the client loop
/// can log and move on without crashing.
pub trait PlayerControl {
    /// Capture the current playback state. Implementations typically derive
    /// `muted` from a zero volume at capture time.
    fn snapshot(&self) -> PlaybackSnapshot;
    fn toggle_play(&mut self) -> Result<()>;
    fn next_track(&mut self) -> Result<()>;
    fn previous_track(&mut self) -> Result<()>;
    fn toggle_repeat(&mut self) -> Result<()>;
    fn toggle_shuffle(&mut self) -> Result<()>;
    /// Seek to an absolute offset in whole seconds.
    fn seek_to(&mut self, seconds: u64) -> Result<()>;
    /// Current volume in [0, 1].
    fn volume(&self) -> f32;
    fn set_volume(&mut self, level: f32) -> Result<()>;
}

/// Execute one relayed command against the player.
///
/// A command missing its parameter is a no-op, not an error. The caller
/// forces a publish after Ok so control clients see the authoritative
/// post-mutation state.
pub fn apply_command<P: PlayerControl + ?Sized>(
    player: &mut P,
    msg: &CommandMessage,
) -> Result<()> {
    match msg.cmd {
        Command::PlayPause => player.toggle_play(),
        Command::Next => player.next_track(),
        Command::Previous => player.previous_track(),
        Command::RepeatMode => player.toggle_repeat(),
        Command::Shuffle => player.toggle_shuffle(),
        Command::Seek => match msg.seconds {
            Some(seconds) => player.seek_to(seconds),
            None => Ok(()),
        },
        Command::SetVolume => match msg.level {
            Some(level) => player.set_volume((level as f32 / 100.0).clamp(0.0, 1.0)),
            None => Ok(()),
        },
        Command::VolUp => {
            let level = (player.volume() + VOLUME_STEP).min(1.0);
            player.set_volume(level)
        }
        Command::VolDown => {
            let level = (player.volume() - VOLUME_STEP).max(0.0);
            player.set_volume(level)
        }
        Command::Mute => player.set_volume(0.0),
        Command::Unmute => player.set_volume(UNMUTE_VOLUME),
    }
}
