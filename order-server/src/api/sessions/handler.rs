//! Session API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use shared::AppResult;
use shared::models::{OrderWithItems, SessionCreate, SessionDetail, SessionOpened};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::session::SessionFilter;
use crate::services::{ordering, session as session_service};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub session_code: Option<String>,
    pub table_id: Option<i64>,
    #[serde(default)]
    pub active_only: bool,
}

/// GET /api/sessions
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<SessionDetail>>> {
    let filter = SessionFilter {
        session_code: query.session_code,
        table_id: query.table_id,
        active_only: query.active_only,
    };
    Ok(Json(session_service::list(&state.pool, &filter).await?))
}

/// POST /api/sessions - 201 for a new session, 200 when resuming
pub async fn open(
    State(state): State<ServerState>,
    Json(payload): Json<SessionCreate>,
) -> AppResult<(StatusCode, Json<SessionOpened>)> {
    let opened = session_service::open(&state.pool, &payload).await?;
    let status = if opened.is_new {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(opened)))
}

/// GET /api/sessions/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<SessionDetail>> {
    Ok(Json(session_service::get_detail(&state.pool, id).await?))
}

/// GET /api/sessions/{id}/orders
pub async fn orders(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<OrderWithItems>>> {
    Ok(Json(ordering::by_session(&state.pool, id).await?))
}

/// POST /api/sessions/{id}/complete
pub async fn complete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<SessionDetail>> {
    tracing::info!(session_id = id, staff_id = user.id, "Completing session");
    Ok(Json(session_service::complete(&state.pool, id).await?))
}

/// POST /api/sessions/{id}/cancel
pub async fn cancel(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<SessionDetail>> {
    tracing::info!(session_id = id, staff_id = user.id, "Cancelling session");
    Ok(Json(session_service::cancel(&state.pool, id).await?))
}
