//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use shared::AppResult;
use shared::models::{OrderCreate, OrderStatus, OrderWithItems, StatusUpdate, parse_enum};

use crate::api::created;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::order::OrderFilter;
use crate::services::ordering;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub session_id: Option<i64>,
    pub status: Option<String>,
}

/// GET /api/orders
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<OrderWithItems>>> {
    let status = query
        .status
        .as_deref()
        .map(|s| parse_enum(s, "status", OrderStatus::ALL))
        .transpose()?;
    let filter = OrderFilter {
        session_id: query.session_id,
        status,
    };
    Ok(Json(ordering::list(&state.pool, filter).await?))
}

/// GET /api/orders/dashboard - kitchen queue
pub async fn dashboard(State(state): State<ServerState>) -> AppResult<Json<Vec<OrderWithItems>>> {
    Ok(Json(ordering::dashboard(&state.pool).await?))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderWithItems>> {
    Ok(Json(ordering::get(&state.pool, id).await?))
}

/// POST /api/orders - submit a cart
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<impl IntoResponse> {
    let (session, order) = ordering::create(&state.pool, &payload).await?;
    state.notifications.order_created(&session, &order);
    Ok(created(order))
}

/// POST /api/orders/{id}/status
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<Json<OrderWithItems>> {
    Ok(Json(
        ordering::update_status(&state.pool, id, &payload.status, user.id).await?,
    ))
}
