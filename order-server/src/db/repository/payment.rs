//! Payment Repository

use shared::models::{Money, Payment, PaymentMethod, PaymentStatus, PaymentSummary};
use shared::util::now_millis;
use sqlx::SqliteExecutor;

use super::RepoResult;

const COLUMNS: &str = "id, session_id, total_amount, payment_method, status, requested_at, \
                       paid_at, created_at, updated_at";

const SUMMARY_SELECT: &str = "SELECT p.id, p.session_id, p.total_amount, p.payment_method, \
     p.status, p.requested_at, p.paid_at, p.created_at, p.updated_at, \
     t.table_number, s.session_code \
     FROM payments p \
     JOIN sessions s ON s.id = p.session_id \
     JOIN dining_tables t ON t.id = s.table_id";

pub async fn find_by_id(db: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Payment>> {
    let sql = format!("SELECT {COLUMNS} FROM payments WHERE id = ?");
    Ok(sqlx::query_as(&sql).bind(id).fetch_optional(db).await?)
}

pub async fn find_summary(
    db: impl SqliteExecutor<'_>,
    id: i64,
) -> RepoResult<Option<PaymentSummary>> {
    let sql = format!("{SUMMARY_SELECT} WHERE p.id = ?");
    Ok(sqlx::query_as(&sql).bind(id).fetch_optional(db).await?)
}

pub async fn find_summaries(
    db: impl SqliteExecutor<'_>,
    status: Option<PaymentStatus>,
) -> RepoResult<Vec<PaymentSummary>> {
    let sql = format!(
        "{SUMMARY_SELECT} WHERE (?1 IS NULL OR p.status = ?1) \
         ORDER BY p.requested_at DESC, p.id DESC"
    );
    Ok(sqlx::query_as(&sql).bind(status).fetch_all(db).await?)
}

pub async fn find_pending_by_session(
    db: impl SqliteExecutor<'_>,
    session_id: i64,
) -> RepoResult<Option<Payment>> {
    let sql = format!("SELECT {COLUMNS} FROM payments WHERE session_id = ? AND status = 'pending'");
    Ok(sqlx::query_as(&sql)
        .bind(session_id)
        .fetch_optional(db)
        .await?)
}

/// Mark every non-cancelled payment of a session as cancelled
pub async fn cancel_live(db: impl SqliteExecutor<'_>, session_id: i64) -> RepoResult<u64> {
    let result = sqlx::query(
        "UPDATE payments SET status = 'cancelled', updated_at = ? \
         WHERE session_id = ? AND status <> 'cancelled'",
    )
    .bind(now_millis())
    .bind(session_id)
    .execute(db)
    .await?;
    Ok(result.rows_affected())
}

pub async fn insert(
    db: impl SqliteExecutor<'_>,
    session_id: i64,
    total_amount: Money,
) -> RepoResult<Payment> {
    let sql = format!(
        "INSERT INTO payments (session_id, total_amount, status, requested_at, created_at, updated_at) \
         VALUES (?1, ?2, 'pending', ?3, ?3, ?3) RETURNING {COLUMNS}"
    );
    Ok(sqlx::query_as(&sql)
        .bind(session_id)
        .bind(total_amount)
        .bind(now_millis())
        .fetch_one(db)
        .await?)
}

pub async fn mark_paid(
    db: impl SqliteExecutor<'_>,
    id: i64,
    method: PaymentMethod,
) -> RepoResult<Payment> {
    let sql = format!(
        "UPDATE payments SET status = 'paid', payment_method = ?1, paid_at = ?2, updated_at = ?2 \
         WHERE id = ?3 RETURNING {COLUMNS}"
    );
    Ok(sqlx::query_as(&sql)
        .bind(method)
        .bind(now_millis())
        .bind(id)
        .fetch_one(db)
        .await?)
}

pub async fn mark_cancelled(db: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Payment> {
    let sql = format!(
        "UPDATE payments SET status = 'cancelled', updated_at = ? WHERE id = ? RETURNING {COLUMNS}"
    );
    Ok(sqlx::query_as(&sql)
        .bind(now_millis())
        .bind(id)
        .fetch_one(db)
        .await?)
}
