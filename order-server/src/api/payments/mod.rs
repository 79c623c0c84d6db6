//! Payment API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/payments | POST | none (bill request) |
//! | /api/payments | GET | staff |
//! | /api/payments/{id} | GET | staff |
//! | /api/payments/{id}/complete | POST | staff |
//! | /api/payments/{id}/cancel | POST | staff |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_staff;
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new().nest("/api/payments", routes(state))
}

fn routes(state: &ServerState) -> Router<ServerState> {
    let diner_routes = Router::new().route("/", post(handler::request));

    let staff_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/complete", post(handler::complete))
        .route("/{id}/cancel", post(handler::cancel))
        .layer(middleware::from_fn_with_state(state.clone(), require_staff));

    diner_routes.merge(staff_routes)
}
