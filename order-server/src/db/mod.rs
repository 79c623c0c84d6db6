//! Database layer: SQLite pool, migrations and repositories

pub mod repository;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

pub use repository::{RepoError, RepoResult};

/// Open the pool and apply pending migrations
pub async fn connect(database_url: &str) -> Result<SqlitePool, crate::core::ServerError> {
    let in_memory = database_url.contains(":memory:");
    let mut options = SqliteConnectOptions::from_str(database_url)?
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));
    if !in_memory {
        options = options
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);
    }

    // An in-memory database lives inside a single connection that must never be recycled
    let pool = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(8)
    }
    .connect_with(options)
    .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!(database_url, "Database ready");

    Ok(pool)
}
