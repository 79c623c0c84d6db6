//! Dining Session Repository

use shared::models::{Session, SessionStatus};
use shared::util::now_millis;
use sqlx::SqliteExecutor;

use super::RepoResult;

const COLUMNS: &str = "id, store_id, table_id, session_code, party_size, telegram_chat_id, \
                       status, started_at, ended_at, created_at, updated_at";

const OPEN_STATUSES: &str = "('active', 'calling_staff', 'payment_requested')";

/// Listing filters for `GET /api/sessions`
#[derive(Debug, Default, Clone)]
pub struct SessionFilter {
    pub session_code: Option<String>,
    pub table_id: Option<i64>,
    pub active_only: bool,
}

pub struct NewSession<'a> {
    pub store_id: i64,
    pub table_id: i64,
    pub session_code: &'a str,
    pub party_size: i32,
    pub telegram_chat_id: Option<&'a str>,
}

pub async fn find_by_id(db: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Session>> {
    let sql = format!("SELECT {COLUMNS} FROM sessions WHERE id = ?");
    Ok(sqlx::query_as(&sql).bind(id).fetch_optional(db).await?)
}

pub async fn find_by_code(
    db: impl SqliteExecutor<'_>,
    session_code: &str,
) -> RepoResult<Option<Session>> {
    let sql = format!("SELECT {COLUMNS} FROM sessions WHERE session_code = ?");
    Ok(sqlx::query_as(&sql)
        .bind(session_code)
        .fetch_optional(db)
        .await?)
}

/// The table's open session, if any
pub async fn find_open_by_table(
    db: impl SqliteExecutor<'_>,
    table_id: i64,
) -> RepoResult<Option<Session>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM sessions WHERE table_id = ? AND status IN {OPEN_STATUSES}"
    );
    Ok(sqlx::query_as(&sql)
        .bind(table_id)
        .fetch_optional(db)
        .await?)
}

/// Most recent open session bound to a chat
pub async fn find_open_by_chat(
    db: impl SqliteExecutor<'_>,
    chat_id: &str,
) -> RepoResult<Option<Session>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM sessions \
         WHERE telegram_chat_id = ? AND status IN {OPEN_STATUSES} \
         ORDER BY started_at DESC, id DESC LIMIT 1"
    );
    Ok(sqlx::query_as(&sql)
        .bind(chat_id)
        .fetch_optional(db)
        .await?)
}

pub async fn find_all(
    db: impl SqliteExecutor<'_>,
    filter: &SessionFilter,
) -> RepoResult<Vec<Session>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM sessions \
         WHERE (?1 IS NULL OR session_code = ?1) \
           AND (?2 IS NULL OR table_id = ?2) \
           AND (?3 = 0 OR status IN {OPEN_STATUSES}) \
         ORDER BY started_at DESC, id DESC"
    );
    Ok(sqlx::query_as(&sql)
        .bind(&filter.session_code)
        .bind(filter.table_id)
        .bind(filter.active_only)
        .fetch_all(db)
        .await?)
}

/// Insert an `active` session.
///
/// Fails with `Duplicate` when the table already has an open session or
/// the code is taken.
pub async fn insert(db: impl SqliteExecutor<'_>, data: NewSession<'_>) -> RepoResult<Session> {
    let now = now_millis();
    let sql = format!(
        "INSERT INTO sessions \
         (store_id, table_id, session_code, party_size, telegram_chat_id, status, \
          started_at, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, 'active', ?6, ?6, ?6) RETURNING {COLUMNS}"
    );
    Ok(sqlx::query_as(&sql)
        .bind(data.store_id)
        .bind(data.table_id)
        .bind(data.session_code)
        .bind(data.party_size)
        .bind(data.telegram_chat_id)
        .bind(now)
        .fetch_one(db)
        .await?)
}

/// Write a new status; terminal statuses also stamp `ended_at`.
///
/// Callers check the transition table first.
pub async fn set_status(
    db: impl SqliteExecutor<'_>,
    id: i64,
    status: SessionStatus,
) -> RepoResult<()> {
    let now = now_millis();
    let ended_at = status.is_terminal().then_some(now);
    sqlx::query(
        "UPDATE sessions SET status = ?, ended_at = COALESCE(?, ended_at), updated_at = ? \
         WHERE id = ?",
    )
    .bind(status)
    .bind(ended_at)
    .bind(now)
    .bind(id)
    .execute(db)
    .await?;
    Ok(())
}

/// Table number and store name shown alongside a session
pub async fn find_labels(
    db: impl SqliteExecutor<'_>,
    session_id: i64,
) -> RepoResult<Option<(String, String)>> {
    Ok(sqlx::query_as(
        "SELECT t.table_number, st.name FROM sessions s \
         JOIN dining_tables t ON t.id = s.table_id \
         JOIN stores st ON st.id = s.store_id \
         WHERE s.id = ?",
    )
    .bind(session_id)
    .fetch_optional(db)
    .await?)
}
