//! Store API Handlers

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use shared::models::{Store, StoreCreate, StoreUpdate};
use shared::{AppError, AppResult, ErrorCode};

use crate::api::created;
use crate::core::ServerState;
use crate::db::repository::store as store_repo;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};

fn store_not_found() -> AppError {
    AppError::new(ErrorCode::StoreNotFound)
}

/// GET /api/stores
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Store>>> {
    Ok(Json(store_repo::find_all(&state.pool).await?))
}

/// GET /api/stores/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Store>> {
    let store = store_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(store_not_found)?;
    Ok(Json(store))
}

/// POST /api/stores
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<StoreCreate>,
) -> AppResult<impl IntoResponse> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_NAME_LEN)?;
    validate_optional_text(&payload.business_hours, "business_hours", MAX_NAME_LEN)?;

    let store = store_repo::create(&state.pool, &payload).await?;
    tracing::info!(store_id = store.id, name = %store.name, "Store created");
    Ok(created(store))
}

/// PUT /api/stores/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<StoreUpdate>,
) -> AppResult<Json<Store>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.address, "address", MAX_NOTE_LEN)?;

    let store = store_repo::update(&state.pool, id, &payload)
        .await?
        .ok_or_else(store_not_found)?;
    Ok(Json(store))
}
