//! Payment API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use shared::AppResult;
use shared::models::{Payment, PaymentComplete, PaymentCreate, PaymentStatus, PaymentSummary, parse_enum};

use crate::api::created;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::payment;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    #[serde(default)]
    pub pending_only: bool,
}

/// GET /api/payments - `pending_only` wins over `status`
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<PaymentSummary>>> {
    let status = if query.pending_only {
        Some(PaymentStatus::Pending)
    } else {
        query
            .status
            .as_deref()
            .map(|s| parse_enum(s, "status", PaymentStatus::ALL))
            .transpose()?
    };
    Ok(Json(payment::list(&state.pool, status).await?))
}

/// GET /api/payments/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PaymentSummary>> {
    Ok(Json(payment::get(&state.pool, id).await?))
}

/// POST /api/payments - diner asks for the bill
pub async fn request(
    State(state): State<ServerState>,
    Json(payload): Json<PaymentCreate>,
) -> AppResult<impl IntoResponse> {
    Ok(created(payment::request(&state.pool, &payload).await?))
}

/// POST /api/payments/{id}/complete
pub async fn complete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<PaymentComplete>,
) -> AppResult<Json<Payment>> {
    tracing::debug!(payment_id = id, staff_id = user.id, "Settling payment");
    Ok(Json(
        payment::complete(&state.pool, id, &payload.payment_method).await?,
    ))
}

/// POST /api/payments/{id}/cancel
pub async fn cancel(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Payment>> {
    tracing::debug!(payment_id = id, staff_id = user.id, "Cancelling payment");
    Ok(Json(payment::cancel(&state.pool, id).await?))
}
