//! Staff authentication routes
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/auth/login | POST | none |
//! | /api/auth/me | GET | staff |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_staff;
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    let public = Router::new().route("/api/auth/login", post(handler::login));
    let protected = Router::new()
        .route("/api/auth/me", get(handler::me))
        .layer(middleware::from_fn_with_state(state.clone(), require_staff));
    public.merge(protected)
}
