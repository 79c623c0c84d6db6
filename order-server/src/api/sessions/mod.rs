//! Session API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/sessions | GET | none |
//! | /api/sessions | POST | none (create-or-resume) |
//! | /api/sessions/{id} | GET | none |
//! | /api/sessions/{id}/orders | GET | none |
//! | /api/sessions/{id}/complete | POST | staff |
//! | /api/sessions/{id}/cancel | POST | staff |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_staff;
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new().nest("/api/sessions", routes(state))
}

fn routes(state: &ServerState) -> Router<ServerState> {
    let diner_routes = Router::new()
        .route("/", get(handler::list).post(handler::open))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/orders", get(handler::orders));

    let staff_routes = Router::new()
        .route("/{id}/complete", post(handler::complete))
        .route("/{id}/cancel", post(handler::cancel))
        .layer(middleware::from_fn_with_state(state.clone(), require_staff));

    diner_routes.merge(staff_routes)
}
