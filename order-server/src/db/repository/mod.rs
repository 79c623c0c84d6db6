//! Repository Module
//!
//! Plain async functions over sqlx. Single-statement lookups accept any
//! executor (`&SqlitePool` or `&mut *tx`); multi-statement writes take a
//! `&mut SqliteConnection` so callers decide the transaction boundary.

pub mod category;
pub mod dining_table;
pub mod menu_item;
pub mod order;
pub mod payment;
pub mod session;
pub mod staff_call;
pub mod store;
pub mod user;

use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// A UNIQUE constraint rejected the write
    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepoError::NotFound("row not found".into()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            other => RepoError::Database(other.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_repo_error_status_mapping() {
        let err: AppError = RepoError::Duplicate("UNIQUE constraint failed".into()).into();
        assert_eq!(err.http_status(), StatusCode::CONFLICT);

        let err: AppError = RepoError::Database("disk I/O error".into()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);

        let err: AppError = RepoError::NotFound("order 9".into()).into();
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);
    }
}
