//! Inbound chat-bot updates
//!
//! The webhook hands raw update JSON to [`handle_update`]; commands only
//! read from the database and answer through the injected notifier.

pub mod commands;
pub mod update;

pub use commands::{BotCommand, Reply, handle_update, reply_for};
pub use update::{Inbound, Update};

use crate::db::RepoError;
use crate::notify::NotifyError;

#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("Malformed update: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error("Reply failed: {0}")]
    Notify(#[from] NotifyError),
}
