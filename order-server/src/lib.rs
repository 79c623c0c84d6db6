//! Table-ordering server
//!
//! Diners scan a table's QR code, open the mini-app, order, call staff and
//! ask for the bill; kitchen and floor staff follow along on a dashboard
//! and through chat notifications.
//!
//! ```text
//! order-server/src/
//! ├── core/       # config, state, router and server bootstrap
//! ├── auth/       # JWT + Argon2 staff authentication
//! ├── db/         # SQLite pool, migrations, repositories
//! ├── services/   # session / ordering / staff call / payment rules
//! ├── notify/     # chat notifier port + Telegram adapter
//! ├── bot/        # inbound bot updates and slash commands
//! ├── api/        # HTTP routes and handlers
//! └── utils/      # logging, input validation
//! ```

pub mod api;
pub mod auth;
pub mod bot;
pub mod core;
pub mod db;
pub mod notify;
pub mod services;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use shared::{AppError, AppResult, ErrorCode};

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
