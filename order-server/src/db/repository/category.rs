//! Category Repository

use shared::models::{Category, CategoryCreate, CategoryUpdate};
use shared::util::now_millis;
use sqlx::SqliteExecutor;

use super::RepoResult;

const COLUMNS: &str = "id, store_id, name, display_order, is_active, created_at, updated_at";

/// Active categories in display order
pub async fn find_active(
    db: impl SqliteExecutor<'_>,
    store_id: Option<i64>,
) -> RepoResult<Vec<Category>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM categories \
         WHERE is_active = 1 AND (?1 IS NULL OR store_id = ?1) \
         ORDER BY display_order, id"
    );
    Ok(sqlx::query_as(&sql).bind(store_id).fetch_all(db).await?)
}

pub async fn find_by_id(db: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Category>> {
    let sql = format!("SELECT {COLUMNS} FROM categories WHERE id = ?");
    Ok(sqlx::query_as(&sql).bind(id).fetch_optional(db).await?)
}

pub async fn create(db: impl SqliteExecutor<'_>, data: &CategoryCreate) -> RepoResult<Category> {
    let now = now_millis();
    let sql = format!(
        "INSERT INTO categories (store_id, name, display_order, is_active, created_at, updated_at) \
         VALUES (?, ?, ?, 1, ?, ?) RETURNING {COLUMNS}"
    );
    Ok(sqlx::query_as(&sql)
        .bind(data.store_id)
        .bind(&data.name)
        .bind(data.display_order.unwrap_or(0))
        .bind(now)
        .bind(now)
        .fetch_one(db)
        .await?)
}

pub async fn update(
    db: impl SqliteExecutor<'_>,
    id: i64,
    data: &CategoryUpdate,
) -> RepoResult<Option<Category>> {
    let sql = format!(
        r#"
        UPDATE categories SET
            name = COALESCE(?, name),
            display_order = COALESCE(?, display_order),
            is_active = COALESCE(?, is_active),
            updated_at = ?
        WHERE id = ?
        RETURNING {COLUMNS}
        "#
    );
    Ok(sqlx::query_as(&sql)
        .bind(&data.name)
        .bind(data.display_order)
        .bind(data.is_active)
        .bind(now_millis())
        .bind(id)
        .fetch_optional(db)
        .await?)
}
