//! Server state shared by every handler

use std::sync::Arc;

use shared::models::UserRole;
use sqlx::SqlitePool;

use crate::auth::{JwtService, hash_password};
use crate::core::{Config, Result, ServerError};
use crate::db::{self, repository::user as user_repo};
use crate::notify::{ChatNotifier, NoopNotifier, Notifications, TelegramNotifier};

/// Cheap to clone; every field is reference counted
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
    pub notifications: Notifications,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("environment", &self.config.environment)
            .field("jwt_service", &self.jwt_service)
            .finish_non_exhaustive()
    }
}

impl ServerState {
    /// Assemble state from already constructed parts
    pub fn new(config: Config, pool: SqlitePool, notifier: Arc<dyn ChatNotifier>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config: Arc::new(config),
            pool,
            jwt_service,
            notifications: Notifications::new(notifier),
        }
    }

    /// Open the database, pick the chat notifier and seed the first admin
    pub async fn initialize(config: &Config) -> Result<Self> {
        if let Some(parent) = sqlite_file_parent(&config.database_url) {
            std::fs::create_dir_all(parent)?;
        }
        let pool = db::connect(&config.database_url).await?;

        let notifier: Arc<dyn ChatNotifier> = match TelegramNotifier::from_config(&config.telegram)
            .map_err(|e| ServerError::Notifier(e.to_string()))?
        {
            Some(telegram) => {
                tracing::info!("Telegram notifications enabled");
                Arc::new(telegram)
            }
            None => {
                tracing::warn!("TELEGRAM_BOT_TOKEN not set, chat notifications disabled");
                Arc::new(NoopNotifier)
            }
        };

        let state = Self::new(config.clone(), pool, notifier);
        state.seed_admin().await?;
        Ok(state)
    }

    async fn seed_admin(&self) -> Result<()> {
        let Some(admin) = &self.config.bootstrap_admin else {
            return Ok(());
        };
        let existing = user_repo::count(&self.pool)
            .await
            .map_err(|e| ServerError::Config(e.to_string()))?;
        if existing > 0 {
            return Ok(());
        }

        let password_hash =
            hash_password(&admin.password).map_err(|e| ServerError::Config(e.message))?;
        user_repo::create(
            &self.pool,
            user_repo::NewUser {
                username: &admin.username,
                password_hash: &password_hash,
                email: None,
                role: UserRole::Admin,
                store_id: None,
            },
        )
        .await
        .map_err(|e| ServerError::Config(e.to_string()))?;
        tracing::info!(username = %admin.username, "Seeded initial admin account");
        Ok(())
    }

    /// Mini-app entry point advertised by the bot
    pub fn miniapp_url(&self) -> String {
        format!("{}/miniapp", self.config.public_base_url)
    }
}

/// Directory holding a file-backed SQLite database
fn sqlite_file_parent(database_url: &str) -> Option<&std::path::Path> {
    if database_url.contains(":memory:") {
        return None;
    }
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = path.split('?').next()?;
    std::path::Path::new(path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
}
