//! HTTP API handlers.
//!
//! Defines the Actix routes for the control surface and the status read.

pub mod commands;
pub mod status_handler;

pub use commands::{
    mute, next_track, playpause, previous_track, repeat_mode, seek, shuffle, unmute, volume,
    volume_down, volume_up,
};
pub use status_handler::status;

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use actix::{Actor, Handler, Recipient};
    use actix_web::{App, test, web};

    use spotify_bridge_types::{PlaybackSnapshot, RepeatMode};

    use crate::api;
    use crate::models::{CommandAck, ErrorBody};
    use crate::registry::PlayerOutbound;
    use crate::state::AppState;

    const TEST_TOKEN: &str = "sekrit";

    fn make_state() -> web::Data<AppState> {
        web::Data::new(AppState::new(TEST_TOKEN.to_string()))
    }

    /// Captures frames the registry delivers to the player channel.
    struct Collector(Arc<Mutex<Vec<String>>>);

    impl Actor for Collector {
        type Context = actix::Context<Self>;
    }

    impl Handler<PlayerOutbound> for Collector {
        type Result = ();

        fn handle(&mut self, msg: PlayerOutbound, _ctx: &mut Self::Context) {
            if let Ok(mut frames) = self.0.lock() {
                frames.push(msg.0);
            }
        }
    }

    fn attach_player(state: &web::Data<AppState>) -> Arc<Mutex<Vec<String>>> {
        let frames = Arc::new(Mutex::new(Vec::new()));
        let addr = Collector(frames.clone()).start();
        let recipient: Recipient<PlayerOutbound> = addr.recipient();
        state.registry.attach(recipient);
        frames
    }

    async fn drain() {
        actix_web::rt::time::sleep(Duration::from_millis(20)).await;
    }

    fn published_snapshot() -> PlaybackSnapshot {
        PlaybackSnapshot {
            artist: "A".to_string(),
            title: "T".to_string(),
            album: "Al".to_string(),
            progress_secs: 10,
            duration_secs: 200,
            is_playing: true,
            shuffle: false,
            repeat_mode: RepeatMode::Off,
            volume_percent: 50,
            muted: false,
            cover: String::new(),
        }
    }

    #[actix_web::test]
    async fn status_is_open_and_defaults_before_first_publish() {
        let state = make_state();
        let app =
            test::init_service(App::new().app_data(state.clone()).service(api::status)).await;

        let req = test::TestRequest::get().uri("/status").to_request();
        let snapshot: PlaybackSnapshot = test::call_and_read_body_json(&app, req).await;
        assert_eq!(snapshot, PlaybackSnapshot::default());
    }

    #[actix_web::test]
    async fn status_reflects_last_publish() {
        let state = make_state();
        state.cache.replace(published_snapshot());
        let app =
            test::init_service(App::new().app_data(state.clone()).service(api::status)).await;

        let req = test::TestRequest::get().uri("/status").to_request();
        let snapshot: PlaybackSnapshot = test::call_and_read_body_json(&app, req).await;
        assert_eq!(snapshot, published_snapshot());
    }

    #[actix_web::test]
    async fn command_without_token_is_forbidden() {
        let state = make_state();
        let app =
            test::init_service(App::new().app_data(state.clone()).service(api::playpause)).await;

        let req = test::TestRequest::get().uri("/command/playpause").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn command_with_wrong_token_is_forbidden() {
        let state = make_state();
        let app =
            test::init_service(App::new().app_data(state.clone()).service(api::next_track)).await;

        let req = test::TestRequest::get()
            .uri("/command/next?auth=nope")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::FORBIDDEN);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.error, "Forbidden");
    }

    #[actix_web::test]
    async fn command_with_no_player_is_rejected() {
        let state = make_state();
        let app =
            test::init_service(App::new().app_data(state.clone()).service(api::next_track)).await;

        let req = test::TestRequest::get()
            .uri(&format!("/command/next?auth={TEST_TOKEN}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.error, "No Spotify connected");
    }

    #[actix_web::test]
    async fn seek_echoes_and_dispatches_seconds() {
        let state = make_state();
        let frames = attach_player(&state);
        state.cache.replace(published_snapshot());
        let app = test::init_service(App::new().app_data(state.clone()).service(api::seek)).await;

        let req = test::TestRequest::get()
            .uri(&format!("/command/seek/30?auth={TEST_TOKEN}"))
            .to_request();
        let ack: CommandAck = test::call_and_read_body_json(&app, req).await;
        assert!(ack.ok);
        assert_eq!(ack.kind.as_deref(), Some("seek"));
        assert_eq!(ack.value, Some(serde_json::json!(30)));

        drain().await;
        assert_eq!(
            frames.lock().unwrap().as_slice(),
            [r#"{"cmd":"seek","seconds":30}"#]
        );
    }

    #[actix_web::test]
    async fn invalid_seek_seconds_sends_nothing() {
        let state = make_state();
        let frames = attach_player(&state);
        let app = test::init_service(App::new().app_data(state.clone()).service(api::seek)).await;

        let req = test::TestRequest::get()
            .uri(&format!("/command/seek/abc?auth={TEST_TOKEN}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.error, "Invalid seconds");

        drain().await;
        assert!(frames.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn invalid_volume_level_sends_nothing() {
        let state = make_state();
        let frames = attach_player(&state);
        let app = test::init_service(App::new().app_data(state.clone()).service(api::volume)).await;

        let req = test::TestRequest::get()
            .uri(&format!("/command/volume/abc?auth={TEST_TOKEN}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.error, "Invalid volume");

        drain().await;
        assert!(frames.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn playpause_answers_with_optimistic_state() {
        let state = make_state();
        let _frames = attach_player(&state);
        state.cache.replace(published_snapshot());
        let app =
            test::init_service(App::new().app_data(state.clone()).service(api::playpause)).await;

        // Snapshot says playing, so the optimistic echo is the pause.
        let req = test::TestRequest::get()
            .uri(&format!("/command/playpause?auth={TEST_TOKEN}"))
            .to_request();
        let ack: CommandAck = test::call_and_read_body_json(&app, req).await;
        assert_eq!(ack.value, Some(serde_json::json!("Paused")));
        assert!(!state.cache.read().is_playing);
    }

    #[actix_web::test]
    async fn volume_up_clamps_and_reports_percent() {
        let state = make_state();
        let frames = attach_player(&state);
        let mut snapshot = published_snapshot();
        snapshot.volume_percent = 95;
        state.cache.replace(snapshot);
        let app =
            test::init_service(App::new().app_data(state.clone()).service(api::volume_up)).await;

        let req = test::TestRequest::get()
            .uri(&format!("/command/volup?auth={TEST_TOKEN}"))
            .to_request();
        let ack: CommandAck = test::call_and_read_body_json(&app, req).await;
        assert_eq!(ack.kind.as_deref(), Some("volume"));
        assert_eq!(ack.value, Some(serde_json::json!(100)));

        drain().await;
        assert_eq!(frames.lock().unwrap().as_slice(), [r#"{"cmd":"volup"}"#]);
    }

    #[actix_web::test]
    async fn mute_returns_bare_ack() {
        let state = make_state();
        let frames = attach_player(&state);
        let app = test::init_service(App::new().app_data(state.clone()).service(api::mute)).await;

        let req = test::TestRequest::get()
            .uri(&format!("/command/mute?auth={TEST_TOKEN}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let body = test::read_body(resp).await;
        assert_eq!(body, r#"{"ok":true}"#.as_bytes());

        drain().await;
        assert_eq!(frames.lock().unwrap().as_slice(), [r#"{"cmd":"mute"}"#]);
    }
}
