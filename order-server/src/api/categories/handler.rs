//! Category API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use shared::models::{Category, CategoryCreate, CategoryUpdate};
use shared::{AppError, AppResult, ErrorCode};

use crate::api::created;
use crate::core::ServerState;
use crate::db::repository::{category as category_repo, store as store_repo};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub store_id: Option<i64>,
}

/// GET /api/categories - active categories in display order
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(category_repo::find_active(&state.pool, query.store_id).await?))
}

/// GET /api/categories/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Category>> {
    let category = category_repo::find_by_id(&state.pool, id)
        .await?
        .filter(|c| c.is_active)
        .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;
    Ok(Json(category))
}

/// POST /api/categories
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<impl IntoResponse> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    if store_repo::find_by_id(&state.pool, payload.store_id)
        .await?
        .is_none()
    {
        return Err(AppError::validation("Store does not exist").with_detail("field", "store_id"));
    }

    let category = category_repo::create(&state.pool, &payload).await?;
    Ok(created(category))
}

/// PUT /api/categories/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    let category = category_repo::update(&state.pool, id, &payload)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;
    Ok(Json(category))
}
