//! Order Item API (staff only)

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_staff;
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new().nest(
        "/api/order-items",
        Router::new()
            .route("/{id}", get(handler::get_by_id))
            .route("/{id}/status", post(handler::update_status))
            .layer(middleware::from_fn_with_state(state.clone(), require_staff)),
    )
}
