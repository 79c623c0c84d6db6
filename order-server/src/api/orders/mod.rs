//! Order API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/orders | POST | none |
//! | /api/orders | GET | staff |
//! | /api/orders/dashboard | GET | staff |
//! | /api/orders/{id} | GET | staff |
//! | /api/orders/{id}/status | POST | staff |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_staff;
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new().nest("/api/orders", routes(state))
}

fn routes(state: &ServerState) -> Router<ServerState> {
    let diner_routes = Router::new().route("/", post(handler::create));

    let staff_routes = Router::new()
        .route("/", get(handler::list))
        .route("/dashboard", get(handler::dashboard))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", post(handler::update_status))
        .layer(middleware::from_fn_with_state(state.clone(), require_staff));

    diner_routes.merge(staff_routes)
}
