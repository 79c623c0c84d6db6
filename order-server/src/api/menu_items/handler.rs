//! Menu Item API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use shared::models::{
    ImageType, MenuItem, MenuItemCreate, MenuItemDetail, MenuItemImage, MenuItemImageUpsert,
    MenuItemSummary, MenuItemUpdate, Money, parse_enum,
};
use shared::{AppError, AppResult, ErrorCode};
use sqlx::SqlitePool;

use crate::api::created;
use crate::core::ServerState;
use crate::db::repository::{
    category as category_repo, menu_item as menu_repo, store as store_repo,
};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub store_id: Option<i64>,
    pub category_id: Option<i64>,
    #[serde(default)]
    pub available_only: bool,
}

fn item_not_found() -> AppError {
    AppError::new(ErrorCode::MenuItemNotFound)
}

fn validate_price(price: Money) -> AppResult<()> {
    if price.is_negative() {
        return Err(AppError::validation("price must not be negative").with_detail("field", "price"));
    }
    if price.exceeds_limit() {
        return Err(AppError::validation(format!("price must not exceed {}", Money::MAX))
            .with_detail("field", "price"));
    }
    Ok(())
}

fn validate_cap(cap: Option<i32>) -> AppResult<()> {
    match cap {
        Some(c) if c < 1 => Err(AppError::validation("max_quantity_per_order must be at least 1")
            .with_detail("field", "max_quantity_per_order")),
        _ => Ok(()),
    }
}

/// The category must exist and belong to the item's store
async fn check_category(pool: &SqlitePool, store_id: i64, category_id: Option<i64>) -> AppResult<()> {
    let Some(category_id) = category_id else {
        return Ok(());
    };
    match category_repo::find_by_id(pool, category_id).await? {
        Some(c) if c.store_id == store_id => Ok(()),
        _ => Err(AppError::validation("Category does not exist")
            .with_detail("field", "category_id")),
    }
}

/// GET /api/menu-items
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<MenuItemSummary>>> {
    let filter = menu_repo::MenuFilter {
        store_id: query.store_id,
        category_id: query.category_id,
        available_only: query.available_only,
    };
    Ok(Json(menu_repo::find_summaries(&state.pool, filter).await?))
}

/// GET /api/menu-items/{id} - active items only, with category name and images
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuItemDetail>> {
    let item = menu_repo::find_by_id(&state.pool, id)
        .await?
        .filter(|m| m.is_active)
        .ok_or_else(item_not_found)?;
    let category_name = menu_repo::category_name(&state.pool, item.category_id).await?;
    let images = menu_repo::find_images(&state.pool, id).await?;
    Ok(Json(MenuItemDetail {
        item,
        category_name,
        images,
    }))
}

/// POST /api/menu-items
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<impl IntoResponse> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image_path, "image_path", MAX_URL_LEN)?;
    validate_optional_text(&payload.image_thumbnail_path, "image_thumbnail_path", MAX_URL_LEN)?;
    validate_price(payload.price)?;
    validate_cap(payload.max_quantity_per_order)?;
    if store_repo::find_by_id(&state.pool, payload.store_id)
        .await?
        .is_none()
    {
        return Err(AppError::validation("Store does not exist").with_detail("field", "store_id"));
    }
    check_category(&state.pool, payload.store_id, payload.category_id).await?;

    let item = menu_repo::create(&state.pool, &payload).await?;
    tracing::info!(menu_item_id = item.id, name = %item.name, price = %item.price, "Menu item created");
    Ok(created(item))
}

/// PUT /api/menu-items/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    let existing = menu_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(item_not_found)?;
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    if let Some(price) = payload.price {
        validate_price(price)?;
    }
    validate_cap(payload.max_quantity_per_order)?;
    check_category(&state.pool, existing.store_id, payload.category_id).await?;

    let item = menu_repo::update(&state.pool, id, &payload)
        .await?
        .ok_or_else(item_not_found)?;
    Ok(Json(item))
}

/// POST /api/menu-items/{id}/toggle-availability
pub async fn toggle_availability(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuItem>> {
    let item = menu_repo::toggle_availability(&state.pool, id)
        .await?
        .ok_or_else(item_not_found)?;
    tracing::info!(menu_item_id = id, is_available = item.is_available, "Availability toggled");
    Ok(Json(item))
}

/// POST /api/menu-items/{id}/images - register or replace one image variant
pub async fn upsert_image(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemImageUpsert>,
) -> AppResult<Json<MenuItemImage>> {
    let image_type: ImageType = parse_enum(&payload.image_type, "image_type", ImageType::ALL)?;
    validate_required_text(&payload.file_path, "file_path", MAX_URL_LEN)?;
    validate_required_text(&payload.mime_type, "mime_type", MAX_NAME_LEN)?;
    if payload.file_size < 0 {
        return Err(AppError::validation("file_size must not be negative")
            .with_detail("field", "file_size"));
    }
    if menu_repo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(item_not_found());
    }

    let image = menu_repo::upsert_image(&state.pool, id, image_type, &payload).await?;
    Ok(Json(image))
}
