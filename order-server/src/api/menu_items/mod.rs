//! Menu Item API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/menu-items | GET | none |
//! | /api/menu-items/{id} | GET | none |
//! | /api/menu-items | POST | staff |
//! | /api/menu-items/{id} | PUT | staff |
//! | /api/menu-items/{id}/toggle-availability | POST | staff |
//! | /api/menu-items/{id}/images | POST | staff |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_staff;
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new().nest("/api/menu-items", routes(state))
}

fn routes(state: &ServerState) -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update))
        .route("/{id}/toggle-availability", post(handler::toggle_availability))
        .route("/{id}/images", post(handler::upsert_image))
        .layer(middleware::from_fn_with_state(state.clone(), require_staff));

    read_routes.merge(manage_routes)
}
