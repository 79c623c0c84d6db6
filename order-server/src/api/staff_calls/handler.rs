//! Staff Call API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use shared::AppResult;
use shared::models::{StaffCall, StaffCallCreate};

use crate::api::created;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::staff_call;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub session_id: Option<i64>,
    #[serde(default)]
    pub pending_only: bool,
}

/// GET /api/staff-calls
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<StaffCall>>> {
    Ok(Json(
        staff_call::list(&state.pool, query.session_id, query.pending_only).await?,
    ))
}

/// POST /api/staff-calls
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<StaffCallCreate>,
) -> AppResult<impl IntoResponse> {
    let created_call = staff_call::create(&state.pool, &payload).await?;
    state.notifications.staff_call_created(
        &created_call.session,
        &created_call.table_number,
        &created_call.call,
    );
    Ok(created(created_call.call))
}

/// POST /api/staff-calls/{id}/respond
pub async fn respond(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<StaffCall>> {
    tracing::debug!(staff_call_id = id, staff_id = user.id, "Responding to staff call");
    Ok(Json(staff_call::respond(&state.pool, id).await?))
}

/// POST /api/staff-calls/{id}/resolve
pub async fn resolve(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<StaffCall>> {
    tracing::debug!(staff_call_id = id, staff_id = user.id, "Resolving staff call");
    Ok(Json(staff_call::resolve(&state.pool, id).await?))
}
