//! Status read handler.

use actix_web::{HttpResponse, Responder, get, web};

use crate::state::AppState;

#[get("/status")]
/// Return the latest cached snapshot (empty default before first publish).
pub async fn status(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.cache.read())
}
