//! Order Item API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::AppResult;
use shared::models::{OrderItem, StatusUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::ordering;

/// GET /api/order-items/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderItem>> {
    Ok(Json(ordering::get_item(&state.pool, id).await?))
}

/// POST /api/order-items/{id}/status - may roll the parent order forward
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<Json<OrderItem>> {
    Ok(Json(
        ordering::update_item_status(&state.pool, id, &payload.status, user.id).await?,
    ))
}
