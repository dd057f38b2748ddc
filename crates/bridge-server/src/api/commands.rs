//! Command relay handlers.
//!
//! One GET route per command, as the dashboard expects. Every `/command/*`
//! path requires the shared-secret `auth` query parameter; the root page
//! and `/status` stay open.

use actix_web::{HttpResponse, Responder, get, web};
use serde::Deserialize;

use crate::models::{CommandAck, ErrorBody};
use crate::router::{CommandError, CommandRouter};
use crate::state::AppState;

/// Shared-secret query parameter.
#[derive(Deserialize)]
pub struct AuthQuery {
    auth: Option<String>,
}

fn forbidden() -> HttpResponse {
    HttpResponse::Forbidden().json(ErrorBody::new("Forbidden"))
}

fn authorized(state: &AppState, query: &AuthQuery) -> bool {
    query.auth.as_deref() == Some(state.auth_token.as_str())
}

// Shared handler shape: gate on the shared secret, run the router, echo
// the result.
fn relay(
    state: &web::Data<AppState>,
    query: &AuthQuery,
    run: impl FnOnce(&CommandRouter) -> Result<CommandAck, CommandError>,
) -> HttpResponse {
    if !authorized(state, query) {
        return forbidden();
    }
    match run(&state.router) {
        Ok(ack) => HttpResponse::Ok().json(ack),
        Err(err) => err.into_response(),
    }
}

#[get("/command/playpause")]
pub async fn playpause(
    state: web::Data<AppState>,
    query: web::Query<AuthQuery>,
) -> impl Responder {
    relay(&state, &query, |router| router.playpause())
}

#[get("/command/next")]
pub async fn next_track(
    state: web::Data<AppState>,
    query: web::Query<AuthQuery>,
) -> impl Responder {
    relay(&state, &query, |router| router.next_track())
}

#[get("/command/previous")]
pub async fn previous_track(
    state: web::Data<AppState>,
    query: web::Query<AuthQuery>,
) -> impl Responder {
    relay(&state, &query, |router| router.previous_track())
}

#[get("/command/shuffle")]
pub async fn shuffle(state: web::Data<AppState>, query: web::Query<AuthQuery>) -> impl Responder {
    relay(&state, &query, |router| router.shuffle())
}

#[get("/command/repeatmode")]
pub async fn repeat_mode(
    state: web::Data<AppState>,
    query: web::Query<AuthQuery>,
) -> impl Responder {
    relay(&state, &query, |router| router.repeat_mode())
}

#[get("/command/mute")]
pub async fn mute(state: web::Data<AppState>, query: web::Query<AuthQuery>) -> impl Responder {
    relay(&state, &query, |router| router.mute())
}

#[get("/command/unmute")]
pub async fn unmute(state: web::Data<AppState>, query: web::Query<AuthQuery>) -> impl Responder {
    relay(&state, &query, |router| router.unmute())
}

#[get("/command/seek/{seconds}")]
pub async fn seek(
    state: web::Data<AppState>,
    query: web::Query<AuthQuery>,
    path: web::Path<String>,
) -> impl Responder {
    let raw = path.into_inner();
    relay(&state, &query, |router| router.seek(&raw))
}

#[get("/command/volume/{level}")]
pub async fn volume(
    state: web::Data<AppState>,
    query: web::Query<AuthQuery>,
    path: web::Path<String>,
) -> impl Responder {
    let raw = path.into_inner();
    relay(&state, &query, |router| router.set_volume(&raw))
}

#[get("/command/volup")]
pub async fn volume_up(
    state: web::Data<AppState>,
    query: web::Query<AuthQuery>,
) -> impl Responder {
    relay(&state, &query, |router| router.volume_step(true))
}

#[get("/command/voldown")]
pub async fn volume_down(
    state: web::Data<AppState>,
    query: web::Query<AuthQuery>,
) -> impl Responder {
    relay(&state, &query, |router| router.volume_step(false))
}
