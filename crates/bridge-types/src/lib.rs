use serde::{Deserialize, Deserializer, Serialize};

/// Repeat cycle position reported by the player.
///
/// The canonical wire form is the capitalized string (`"Off"`, `"Context"`,
/// `"Track"`). Deserialization is liberal: it also accepts lowercase
/// strings and the numeric 0/1/2 form emitted by older player builds, and
/// maps anything unrecognized to `Off` (the start of the cycle).
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub enum RepeatMode {
    #[default]
    Off,
    Context,
    Track,
}

impl RepeatMode {
    /// Next position in the Off -> Context -> Track -> Off cycle.
    pub fn next(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::Context,
            RepeatMode::Context => RepeatMode::Track,
            RepeatMode::Track => RepeatMode::Off,
        }
    }

    /// Canonical wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            RepeatMode::Off => "Off",
            RepeatMode::Context => "Context",
            RepeatMode::Track => "Track",
        }
    }
}

impl<'de> Deserialize<'de> for RepeatMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(u64),
            Text(String),
        }

        let mode = match Raw::deserialize(deserializer)? {
            Raw::Num(1) => RepeatMode::Context,
            Raw::Num(2) => RepeatMode::Track,
            Raw::Num(_) => RepeatMode::Off,
            Raw::Text(s) => match s.to_ascii_lowercase().as_str() {
                "context" => RepeatMode::Context,
                "track" => RepeatMode::Track,
                _ => RepeatMode::Off,
            },
        };
        Ok(mode)
    }
}

/// Full playback state published by the player client.
///
/// The wire form keeps the dashboard's JSON keys. The relay caches the
/// newest snapshot wholesale and never merges partial updates; merging,
/// where it happens, happens client-side before publish.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlaybackSnapshot {
    /// Current track artist ("" when nothing is loaded).
    pub artist: String,
    /// Current track title.
    pub title: String,
    /// Current album title.
    pub album: String,
    /// Elapsed playback time in whole seconds.
    #[serde(rename = "progress")]
    pub progress_secs: u64,
    /// Track duration in whole seconds.
    #[serde(rename = "duration")]
    pub duration_secs: u64,
    /// `true` while the player is actively playing.
    #[serde(rename = "isPlaying")]
    pub is_playing: bool,
    /// Shuffle toggle state.
    pub shuffle: bool,
    /// Repeat cycle position.
    #[serde(rename = "repeatMode")]
    pub repeat_mode: RepeatMode,
    /// Volume percent in [0, 100].
    #[serde(rename = "volume")]
    pub volume_percent: u8,
    /// `true` when volume was zero at capture time.
    pub muted: bool,
    /// Cover art URL, possibly empty.
    pub cover: String,
}

/// Command names understood by the player client.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    PlayPause,
    Next,
    Previous,
    RepeatMode,
    Shuffle,
    Mute,
    Unmute,
    Seek,
    SetVolume,
    VolUp,
    VolDown,
}

/// Outbound instruction relayed to the player.
///
/// Dispatch is fire-and-forget; no acknowledgment is produced or awaited.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandMessage {
    pub cmd: Command,
    /// Absolute seek target in whole seconds (seek only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds: Option<u64>,
    /// Absolute volume level (setvolume only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<i64>,
}

impl CommandMessage {
    /// A command with no parameter.
    pub fn bare(cmd: Command) -> Self {
        Self {
            cmd,
            seconds: None,
            level: None,
        }
    }

    /// An absolute seek command.
    pub fn seek(seconds: u64) -> Self {
        Self {
            cmd: Command::Seek,
            seconds: Some(seconds),
            level: None,
        }
    }

    /// An absolute volume command.
    pub fn set_volume(level: i64) -> Self {
        Self {
            cmd: Command::SetVolume,
            seconds: None,
            level: Some(level),
        }
    }
}
