//! Staff Call Repository

use shared::models::{StaffCall, StaffCallReason, StaffCallStatus};
use shared::util::now_millis;
use sqlx::SqliteExecutor;

use super::RepoResult;

const COLUMNS: &str = "id, session_id, reason, message, status, called_at, responded_at, \
                       resolved_at, created_at, updated_at";

pub async fn insert(
    db: impl SqliteExecutor<'_>,
    session_id: i64,
    reason: StaffCallReason,
    message: Option<&str>,
) -> RepoResult<StaffCall> {
    let sql = format!(
        "INSERT INTO staff_calls \
         (session_id, reason, message, status, called_at, created_at, updated_at) \
         VALUES (?1, ?2, ?3, 'pending', ?4, ?4, ?4) RETURNING {COLUMNS}"
    );
    Ok(sqlx::query_as(&sql)
        .bind(session_id)
        .bind(reason)
        .bind(message)
        .bind(now_millis())
        .fetch_one(db)
        .await?)
}

pub async fn find_by_id(db: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<StaffCall>> {
    let sql = format!("SELECT {COLUMNS} FROM staff_calls WHERE id = ?");
    Ok(sqlx::query_as(&sql).bind(id).fetch_optional(db).await?)
}

/// Calls newest first, optionally for one session and/or pending only
pub async fn find_all(
    db: impl SqliteExecutor<'_>,
    session_id: Option<i64>,
    pending_only: bool,
) -> RepoResult<Vec<StaffCall>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM staff_calls \
         WHERE (?1 IS NULL OR session_id = ?1) AND (?2 = 0 OR status = 'pending') \
         ORDER BY called_at DESC, id DESC"
    );
    Ok(sqlx::query_as(&sql)
        .bind(session_id)
        .bind(pending_only)
        .fetch_all(db)
        .await?)
}

/// Move a call to `in_progress` or `resolved`, stamping the matching time
pub async fn set_status(
    db: impl SqliteExecutor<'_>,
    id: i64,
    status: StaffCallStatus,
) -> RepoResult<StaffCall> {
    let sql = format!(
        r#"
        UPDATE staff_calls SET
            status = ?1,
            responded_at = CASE WHEN ?1 = 'in_progress' THEN COALESCE(responded_at, ?2) ELSE responded_at END,
            resolved_at = CASE WHEN ?1 = 'resolved' THEN COALESCE(resolved_at, ?2) ELSE resolved_at END,
            updated_at = ?2
        WHERE id = ?3
        RETURNING {COLUMNS}
        "#
    );
    Ok(sqlx::query_as(&sql)
        .bind(status)
        .bind(now_millis())
        .bind(id)
        .fetch_one(db)
        .await?)
}
