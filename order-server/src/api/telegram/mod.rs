//! Bot webhook
//!
//! Always answers `{"status": "ok"}` unless decoding or replying fails,
//! in which case the error text is returned with a 500.

use axum::{
    Json, Router, body::Bytes, extract::State, http::StatusCode, response::IntoResponse,
    routing::post,
};
use serde_json::json;

use crate::bot;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/telegram/webhook", post(webhook))
}

async fn webhook(State(state): State<ServerState>, body: Bytes) -> impl IntoResponse {
    let result = match serde_json::from_slice::<serde_json::Value>(&body) {
        Ok(payload) => bot::handle_update(&state, payload).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => {
            tracing::error!(error = %e, "Webhook update failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        }
    }
}
