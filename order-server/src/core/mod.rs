//! Core module: configuration, shared state, server bootstrap
//!
//! - [`Config`] - server configuration
//! - [`ServerState`] - state handed to every handler
//! - [`Server`] - HTTP server
//! - [`ServerError`] - start-up errors

pub mod config;
pub mod server;
pub mod state;

pub use config::{BootstrapAdmin, Config, TelegramConfig};
pub use server::{Server, build_router};
pub use state::ServerState;

/// Errors that abort start-up
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Notifier error: {0}")]
    Notifier(String),
}

pub type Result<T> = std::result::Result<T, ServerError>;
