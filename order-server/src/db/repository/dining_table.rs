//! Dining Table Repository

use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use shared::util::now_millis;
use sqlx::SqliteExecutor;

use super::RepoResult;

const COLUMNS: &str =
    "id, store_id, table_number, qr_code_url, capacity, is_available, created_at, updated_at";

/// All tables, optionally limited to one store
pub async fn find_all(
    db: impl SqliteExecutor<'_>,
    store_id: Option<i64>,
) -> RepoResult<Vec<DiningTable>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM dining_tables \
         WHERE (?1 IS NULL OR store_id = ?1) \
         ORDER BY store_id, table_number"
    );
    Ok(sqlx::query_as(&sql).bind(store_id).fetch_all(db).await?)
}

pub async fn find_by_id(db: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<DiningTable>> {
    let sql = format!("SELECT {COLUMNS} FROM dining_tables WHERE id = ?");
    Ok(sqlx::query_as(&sql).bind(id).fetch_optional(db).await?)
}

/// Lookup by the identifier encoded in the table's QR code
pub async fn find_by_qr(
    db: impl SqliteExecutor<'_>,
    qr_code_url: &str,
) -> RepoResult<Option<DiningTable>> {
    let sql = format!("SELECT {COLUMNS} FROM dining_tables WHERE qr_code_url = ?");
    Ok(sqlx::query_as(&sql)
        .bind(qr_code_url)
        .fetch_optional(db)
        .await?)
}

pub async fn create(
    db: impl SqliteExecutor<'_>,
    data: &DiningTableCreate,
) -> RepoResult<DiningTable> {
    let now = now_millis();
    let sql = format!(
        "INSERT INTO dining_tables \
         (store_id, table_number, qr_code_url, capacity, is_available, created_at, updated_at) \
         VALUES (?, ?, ?, ?, 1, ?, ?) RETURNING {COLUMNS}"
    );
    Ok(sqlx::query_as(&sql)
        .bind(data.store_id)
        .bind(&data.table_number)
        .bind(&data.qr_code_url)
        .bind(data.capacity)
        .bind(now)
        .bind(now)
        .fetch_one(db)
        .await?)
}

pub async fn update(
    db: impl SqliteExecutor<'_>,
    id: i64,
    data: &DiningTableUpdate,
) -> RepoResult<Option<DiningTable>> {
    let sql = format!(
        r#"
        UPDATE dining_tables SET
            table_number = COALESCE(?, table_number),
            qr_code_url = COALESCE(?, qr_code_url),
            capacity = COALESCE(?, capacity),
            is_available = COALESCE(?, is_available),
            updated_at = ?
        WHERE id = ?
        RETURNING {COLUMNS}
        "#
    );
    Ok(sqlx::query_as(&sql)
        .bind(&data.table_number)
        .bind(&data.qr_code_url)
        .bind(data.capacity)
        .bind(data.is_available)
        .bind(now_millis())
        .bind(id)
        .fetch_optional(db)
        .await?)
}
