//! Domain services
//!
//! Each service function owns one use case: it validates input, checks
//! the status tables in `shared::models`, and runs every write of the use
//! case inside a single transaction.

pub mod ordering;
pub mod payment;
pub mod session;
pub mod staff_call;

use shared::AppResult;
use sqlx::{Sqlite, SqlitePool, Transaction, pool::PoolConnection};

use crate::db::RepoError;

/// Start a write transaction.
///
/// `IMMEDIATE` takes the write lock up front, so a concurrent writer waits
/// on `busy_timeout` instead of failing with `SQLITE_BUSY` when it upgrades
/// from its first read.
pub(crate) async fn begin(pool: &SqlitePool) -> AppResult<Transaction<'static, Sqlite>> {
    Ok(pool
        .begin_with("BEGIN IMMEDIATE")
        .await
        .map_err(RepoError::from)?)
}

pub(crate) async fn commit(tx: Transaction<'static, Sqlite>) -> AppResult<()> {
    Ok(tx.commit().await.map_err(RepoError::from)?)
}

pub(crate) async fn acquire(pool: &SqlitePool) -> AppResult<PoolConnection<Sqlite>> {
    Ok(pool.acquire().await.map_err(RepoError::from)?)
}
