//! Staff account API (admin only)

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::{require_admin, require_staff};
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new().nest(
        "/api/users",
        Router::new()
            .route("/", get(handler::list).post(handler::create))
            .route("/{id}", get(handler::get_by_id).put(handler::update))
            .layer(middleware::from_fn(require_admin))
            .layer(middleware::from_fn_with_state(state.clone(), require_staff)),
    )
}
