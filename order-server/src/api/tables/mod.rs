//! Dining Table API
//!
//! `GET /api/tables/by-qr` is public: the mini-app resolves the scanned
//! QR code before a session exists.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::{require_admin, require_staff};
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new().nest("/api/tables", routes(state))
}

fn routes(state: &ServerState) -> Router<ServerState> {
    let public_routes = Router::new().route("/by-qr", get(handler::by_qr));

    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn_with_state(state.clone(), require_staff));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), require_staff));

    public_routes.merge(read_routes).merge(manage_routes)
}
