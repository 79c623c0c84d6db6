//! Staff User Repository

use shared::models::{User, UserInfo, UserRole};
use shared::util::now_millis;
use sqlx::SqliteExecutor;

use super::RepoResult;

const COLUMNS: &str = "id, username, password_hash, email, role, store_id, is_active, \
                       last_login_at, created_at, updated_at";

const INFO_SELECT: &str = "SELECT u.id, u.username, u.email, u.role, u.store_id, \
                           s.name AS store_name, u.is_active \
                           FROM users u LEFT JOIN stores s ON s.id = u.store_id";

/// Fields written when creating a user; password already hashed
pub struct NewUser<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub email: Option<&'a str>,
    pub role: UserRole,
    pub store_id: Option<i64>,
}

/// Partial update; `None` keeps the stored value
#[derive(Default)]
pub struct UserChanges {
    pub password_hash: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub store_id: Option<i64>,
    pub is_active: Option<bool>,
}

pub async fn find_by_id(db: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<User>> {
    let sql = format!("SELECT {COLUMNS} FROM users WHERE id = ?");
    Ok(sqlx::query_as(&sql).bind(id).fetch_optional(db).await?)
}

pub async fn find_by_username(
    db: impl SqliteExecutor<'_>,
    username: &str,
) -> RepoResult<Option<User>> {
    let sql = format!("SELECT {COLUMNS} FROM users WHERE username = ?");
    Ok(sqlx::query_as(&sql)
        .bind(username)
        .fetch_optional(db)
        .await?)
}

pub async fn find_all_info(db: impl SqliteExecutor<'_>) -> RepoResult<Vec<UserInfo>> {
    let sql = format!("{INFO_SELECT} ORDER BY u.id");
    Ok(sqlx::query_as(&sql).fetch_all(db).await?)
}

pub async fn find_info(db: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<UserInfo>> {
    let sql = format!("{INFO_SELECT} WHERE u.id = ?");
    Ok(sqlx::query_as(&sql).bind(id).fetch_optional(db).await?)
}

/// Insert a user, returning its id. Username clashes surface as `Duplicate`.
pub async fn create(db: impl SqliteExecutor<'_>, user: NewUser<'_>) -> RepoResult<i64> {
    let now = now_millis();
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO users (username, password_hash, email, role, store_id, is_active, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, 1, ?, ?) RETURNING id",
    )
    .bind(user.username)
    .bind(user.password_hash)
    .bind(user.email)
    .bind(user.role)
    .bind(user.store_id)
    .bind(now)
    .bind(now)
    .fetch_one(db)
    .await?;
    Ok(id)
}

/// Returns false when no user has this id
pub async fn update(db: impl SqliteExecutor<'_>, id: i64, changes: UserChanges) -> RepoResult<bool> {
    let result = sqlx::query(
        r#"
        UPDATE users SET
            password_hash = COALESCE(?, password_hash),
            email = COALESCE(?, email),
            role = COALESCE(?, role),
            store_id = COALESCE(?, store_id),
            is_active = COALESCE(?, is_active),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(changes.password_hash)
    .bind(changes.email)
    .bind(changes.role)
    .bind(changes.store_id)
    .bind(changes.is_active)
    .bind(now_millis())
    .bind(id)
    .execute(db)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn touch_last_login(db: impl SqliteExecutor<'_>, id: i64) -> RepoResult<()> {
    let now = now_millis();
    sqlx::query("UPDATE users SET last_login_at = ?, updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(now)
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}

/// Number of user accounts, used to decide whether to seed an admin
pub async fn count(db: impl SqliteExecutor<'_>) -> RepoResult<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(db)
        .await?)
}
