//! Staff Call API

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_staff;
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new().nest("/api/staff-calls", routes(state))
}

fn routes(state: &ServerState) -> Router<ServerState> {
    let diner_routes = Router::new().route("/", post(handler::create));

    let staff_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}/respond", post(handler::respond))
        .route("/{id}/resolve", post(handler::resolve))
        .layer(middleware::from_fn_with_state(state.clone(), require_staff));

    diner_routes.merge(staff_routes)
}
