//! Relay connection loop.
//!
//! One cooperative task owns the player, the websocket, the heartbeat
//! timer, and the host event channel; nothing here blocks on anything
//! else completing. The transport reconnects forever with bounded
//! backoff, and every (re)connect forces a publish so a freshly attached
//! relay cache is not left empty.

use std::time::{Duration, Instant};

use anyhow::Result;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use spotify_bridge_types::CommandMessage;

use crate::config::ClientConfig;
use crate::player::{PlayerControl, apply_command};
use crate::publisher::ChangeTracker;

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Host application notifications that trigger a publish.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerEvent {
    /// Track changed; forces a publish.
    TrackChanged,
    /// Play/pause toggled in the host; forces a publish.
    PlayPauseToggled,
    /// Playback progressed; publishes through change detection only.
    Progress,
    /// Host surface became visible again; forces a publish.
    VisibilityGained,
    /// Host window regained focus; forces a publish.
    FocusGained,
}

impl PlayerEvent {
    fn forces_publish(self) -> bool {
        !matches!(self, PlayerEvent::Progress)
    }
}

enum SessionEnd {
    /// Host dropped the event channel; the client is done.
    EventsClosed,
    Disconnected,
}

/// Run the bridge client until the host closes the event channel.
pub async fn run<P: PlayerControl>(
    config: ClientConfig,
    mut player: P,
    mut events: mpsc::Receiver<PlayerEvent>,
) -> Result<()> {
    let mut reconnect_delay = config.reconnect_initial_delay;

    loop {
        let stream = match connect_async(config.server_url.as_str()).await {
            Ok((stream, _)) => stream,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    delay_secs = reconnect_delay.as_secs(),
                    "bridge connect failed"
                );
                tokio::time::sleep(reconnect_delay).await;
                reconnect_delay = next_delay(reconnect_delay, config.reconnect_max_delay);
                continue;
            }
        };
        reconnect_delay = config.reconnect_initial_delay;
        tracing::info!(url = %config.server_url, "connected to bridge");

        match serve_connection(&config, &mut player, &mut events, stream).await {
            SessionEnd::EventsClosed => return Ok(()),
            SessionEnd::Disconnected => {
                tracing::warn!("bridge disconnected; reconnecting");
            }
        }
    }
}

async fn serve_connection<P: PlayerControl>(
    config: &ClientConfig,
    player: &mut P,
    events: &mut mpsc::Receiver<PlayerEvent>,
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
) -> SessionEnd {
    let (mut ws_tx, mut ws_rx) = stream.split();
    let mut tracker = ChangeTracker::new();
    let mut heartbeat = tokio::time::interval(config.heartbeat_interval);
    heartbeat.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    if publish(player, &mut tracker, &mut ws_tx, true).await.is_err() {
        return SessionEnd::Disconnected;
    }

    loop {
        tokio::select! {
            message = ws_rx.next() => {
                let message = match message {
                    Some(Ok(message)) => message,
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "bridge receive error");
                        return SessionEnd::Disconnected;
                    }
                    None => return SessionEnd::Disconnected,
                };
                match message {
                    Message::Text(text) => {
                        let msg = match serde_json::from_str::<CommandMessage>(&text) {
                            Ok(msg) => msg,
                            Err(e) => {
                                tracing::warn!(error = %e, "ignoring unparseable command");
                                continue;
                            }
                        };
                        match apply_command(player, &msg) {
                            Ok(()) => {
                                if publish(player, &mut tracker, &mut ws_tx, true).await.is_err() {
                                    return SessionEnd::Disconnected;
                                }
                            }
                            // Caught and logged; the next command still runs.
                            Err(e) => {
                                tracing::warn!(cmd = ?msg.cmd, error = %e, "player mutation failed");
                            }
                        }
                    }
                    Message::Ping(payload) => {
                        if ws_tx.send(Message::Pong(payload)).await.is_err() {
                            return SessionEnd::Disconnected;
                        }
                    }
                    Message::Close(_) => return SessionEnd::Disconnected,
                    _ => {}
                }
            }
            _ = heartbeat.tick() => {
                let force = tracker.is_stale(Instant::now(), config.staleness_threshold);
                if publish(player, &mut tracker, &mut ws_tx, force).await.is_err() {
                    return SessionEnd::Disconnected;
                }
            }
            event = events.recv() => {
                let Some(event) = event else {
                    return SessionEnd::EventsClosed;
                };
                if publish(player, &mut tracker, &mut ws_tx, event.forces_publish())
                    .await
                    .is_err()
                {
                    return SessionEnd::Disconnected;
                }
            }
        }
    }
}

async fn publish<P: PlayerControl>(
    player: &P,
    tracker: &mut ChangeTracker,
    ws_tx: &mut WsSink,
    force: bool,
) -> Result<(), ()> {
    let snapshot = player.snapshot();
    let Some(payload) = tracker.prepare(&snapshot, force, Instant::now()) else {
        return Ok(());
    };
    ws_tx.send(Message::Text(payload.into())).await.map_err(|e| {
        tracing::warn!(error = %e, "bridge publish failed");
    })
}

fn next_delay(current: Duration, max: Duration) -> Duration {
    (current * 2).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconnect_backoff_doubles_up_to_the_ceiling() {
        let max = Duration::from_secs(30);
        let mut delay = Duration::from_secs(2);
        let mut seen = Vec::new();
        for _ in 0..6 {
            delay = next_delay(delay, max);
            seen.push(delay.as_secs());
        }
        assert_eq!(seen, [4, 8, 16, 30, 30, 30]);
    }

    #[test]
    fn progress_events_do_not_force() {
        assert!(PlayerEvent::TrackChanged.forces_publish());
        assert!(PlayerEvent::PlayPauseToggled.forces_publish());
        assert!(PlayerEvent::VisibilityGained.forces_publish());
        assert!(PlayerEvent::FocusGained.forces_publish());
        assert!(!PlayerEvent::Progress.forces_publish());
    }
}
