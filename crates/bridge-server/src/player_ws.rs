//! Player websocket channel.
//!
//! Accepts the player client's persistent connection, stores inbound
//! snapshot frames, and forwards relayed commands as outbound text frames.
//! Publishing is fire-and-forget in both directions: unparseable snapshots
//! are dropped without surfacing an error to the publisher.

use actix::prelude::*;
use actix_web::{Error, HttpRequest, HttpResponse, get, web};
use actix_web_actors::ws;

use spotify_bridge_types::PlaybackSnapshot;

use crate::cache::StateCache;
use crate::registry::PlayerOutbound;
use crate::state::AppState;

/// Store one published frame, or drop it when it does not parse as a
/// snapshot. The previous snapshot stays; the publisher is not told.
fn handle_snapshot_frame(cache: &StateCache, text: &str) {
    match serde_json::from_str::<PlaybackSnapshot>(text) {
        Ok(snapshot) => cache.replace(snapshot),
        Err(e) => tracing::debug!(error = %e, "dropping malformed snapshot"),
    }
}

pub struct PlayerWs {
    conn_id: Option<u64>,
    state: web::Data<AppState>,
}

impl PlayerWs {
    pub fn new(state: web::Data<AppState>) -> Self {
        Self {
            conn_id: None,
            state,
        }
    }
}

impl Actor for PlayerWs {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let addr = ctx.address().recipient::<PlayerOutbound>();
        let conn_id = self.state.registry.attach(addr);
        self.conn_id = Some(conn_id);
        tracing::info!(conn_id, "spotify player connected");
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if let Some(conn_id) = self.conn_id.take() {
            self.state.registry.detach(conn_id);
        }
    }
}

impl Handler<PlayerOutbound> for PlayerWs {
    type Result = ();

    fn handle(&mut self, msg: PlayerOutbound, ctx: &mut Self::Context) -> Self::Result {
        ctx.text(msg.0);
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for PlayerWs {
    fn handle(&mut self, item: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        let msg = match item {
            Ok(msg) => msg,
            Err(_) => {
                ctx.stop();
                return;
            }
        };
        match msg {
            ws::Message::Text(text) => handle_snapshot_frame(&self.state.cache, &text),
            ws::Message::Ping(bytes) => ctx.pong(&bytes),
            ws::Message::Pong(_) => {}
            ws::Message::Close(_) => ctx.stop(),
            ws::Message::Binary(_) => {}
            ws::Message::Continuation(_) => ctx.stop(),
            ws::Message::Nop => {}
        }
    }
}

#[get("/player/ws")]
pub async fn player_ws(
    req: HttpRequest,
    stream: web::Payload,
    state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    ws::start(PlayerWs::new(state), &req, stream)
}
