//! In-host player client for the Spotify bridge.
//!
//! Lives inside the host player application. Connects out to the relay
//! server, publishes playback snapshots with change detection and
//! heartbeat-driven staleness recovery, and executes relayed commands
//! against the live player behind the [`PlayerControl`] seam.

pub mod client;
pub mod config;
pub mod player;
pub mod publisher;

pub use client::{PlayerEvent, run};
pub use config::ClientConfig;
pub use player::PlayerControl;
