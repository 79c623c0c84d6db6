//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use shared::{AppError, AppResult, ErrorCode};

use crate::api::created;
use crate::core::ServerState;
use crate::db::repository::{dining_table as table_repo, store as store_repo};
use crate::utils::validation::{MAX_NAME_LEN, MAX_URL_LEN, validate_required_text};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub store_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct QrQuery {
    pub qr_code_url: Option<String>,
}

fn table_not_found() -> AppError {
    AppError::new(ErrorCode::TableNotFound)
}

fn validate_capacity(capacity: Option<i32>) -> AppResult<()> {
    match capacity {
        Some(c) if c < 1 => Err(AppError::validation("capacity must be at least 1")
            .with_detail("field", "capacity")),
        _ => Ok(()),
    }
}

/// GET /api/tables
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<DiningTable>>> {
    Ok(Json(table_repo::find_all(&state.pool, query.store_id).await?))
}

/// GET /api/tables/by-qr?qr_code_url=
pub async fn by_qr(
    State(state): State<ServerState>,
    Query(query): Query<QrQuery>,
) -> AppResult<Json<DiningTable>> {
    let qr = query
        .qr_code_url
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| {
            AppError::validation("qr_code_url is required").with_detail("field", "qr_code_url")
        })?;

    let table = table_repo::find_by_qr(&state.pool, &qr)
        .await?
        .filter(|t| t.is_available)
        .ok_or_else(table_not_found)?;
    Ok(Json(table))
}

/// GET /api/tables/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DiningTable>> {
    let table = table_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(table_not_found)?;
    Ok(Json(table))
}

/// POST /api/tables
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<impl IntoResponse> {
    validate_required_text(&payload.table_number, "table_number", MAX_NAME_LEN)?;
    validate_required_text(&payload.qr_code_url, "qr_code_url", MAX_URL_LEN)?;
    validate_capacity(payload.capacity)?;
    if store_repo::find_by_id(&state.pool, payload.store_id)
        .await?
        .is_none()
    {
        return Err(AppError::validation("Store does not exist").with_detail("field", "store_id"));
    }

    let table = table_repo::create(&state.pool, &payload).await?;
    tracing::info!(table_id = table.id, table_number = %table.table_number, "Table created");
    Ok(created(table))
}

/// PUT /api/tables/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    if let Some(number) = &payload.table_number {
        validate_required_text(number, "table_number", MAX_NAME_LEN)?;
    }
    if let Some(qr) = &payload.qr_code_url {
        validate_required_text(qr, "qr_code_url", MAX_URL_LEN)?;
    }
    validate_capacity(payload.capacity)?;

    let table = table_repo::update(&state.pool, id, &payload)
        .await?
        .ok_or_else(table_not_found)?;
    Ok(Json(table))
}
