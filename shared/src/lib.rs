//! Shared types for the table-ordering platform
//!
//! Domain models, status state machines, money arithmetic and the unified
//! error system used by the order server and its clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::Money;
