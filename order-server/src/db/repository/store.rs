//! Store Repository

use shared::models::{Store, StoreCreate, StoreUpdate};
use shared::util::now_millis;
use sqlx::SqliteExecutor;

use super::RepoResult;

const COLUMNS: &str =
    "id, name, address, phone, business_hours, is_active, created_at, updated_at";

pub async fn find_all(db: impl SqliteExecutor<'_>) -> RepoResult<Vec<Store>> {
    let sql = format!("SELECT {COLUMNS} FROM stores ORDER BY id");
    Ok(sqlx::query_as(&sql).fetch_all(db).await?)
}

pub async fn find_by_id(db: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Store>> {
    let sql = format!("SELECT {COLUMNS} FROM stores WHERE id = ?");
    Ok(sqlx::query_as(&sql).bind(id).fetch_optional(db).await?)
}

pub async fn create(db: impl SqliteExecutor<'_>, data: &StoreCreate) -> RepoResult<Store> {
    let now = now_millis();
    let sql = format!(
        "INSERT INTO stores (name, address, phone, business_hours, is_active, created_at, updated_at) \
         VALUES (?, ?, ?, ?, 1, ?, ?) RETURNING {COLUMNS}"
    );
    Ok(sqlx::query_as(&sql)
        .bind(&data.name)
        .bind(&data.address)
        .bind(&data.phone)
        .bind(&data.business_hours)
        .bind(now)
        .bind(now)
        .fetch_one(db)
        .await?)
}

pub async fn update(
    db: impl SqliteExecutor<'_>,
    id: i64,
    data: &StoreUpdate,
) -> RepoResult<Option<Store>> {
    let sql = format!(
        r#"
        UPDATE stores SET
            name = COALESCE(?, name),
            address = COALESCE(?, address),
            phone = COALESCE(?, phone),
            business_hours = COALESCE(?, business_hours),
            is_active = COALESCE(?, is_active),
            updated_at = ?
        WHERE id = ?
        RETURNING {COLUMNS}
        "#
    );
    Ok(sqlx::query_as(&sql)
        .bind(&data.name)
        .bind(&data.address)
        .bind(&data.phone)
        .bind(&data.business_hours)
        .bind(data.is_active)
        .bind(now_millis())
        .bind(id)
        .fetch_optional(db)
        .await?)
}
