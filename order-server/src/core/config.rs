use crate::auth::JwtConfig;

use super::{Result, ServerError};

/// Order server configuration
///
/// # Environment variables
///
/// | Variable | Default | Notes |
/// |----------|---------|-------|
/// | DATABASE_URL | sqlite://data/table-order.db?mode=rwc | SQLite file, created on demand |
/// | HTTP_PORT | 8000 | |
/// | ENVIRONMENT | development | development / staging / production |
/// | JWT_SECRET | generated in development | at least 32 chars elsewhere |
/// | JWT_EXPIRATION_MINUTES | 720 | |
/// | JWT_ISSUER | table-order | |
/// | TELEGRAM_BOT_TOKEN | unset | unset disables chat notifications |
/// | TELEGRAM_API_BASE | https://api.telegram.org | |
/// | PUBLIC_BASE_URL | http://localhost:8000 | used for the mini-app button |
/// | LOG_LEVEL | info | |
/// | LOG_DIR | unset | daily rolling files when set |
/// | REQUEST_TIMEOUT_MS | 30000 | |
/// | ADMIN_USERNAME / ADMIN_PASSWORD | unset | seeds the first admin on an empty user table |
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    pub jwt: JwtConfig,
    pub telegram: TelegramConfig,
    /// Externally reachable origin of this server, without trailing slash
    pub public_base_url: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub request_timeout_ms: u64,
    /// First admin account, created only while no user exists
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// Credentials for the initial admin account
#[derive(Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Bot API access
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: Option<String>,
    pub api_base: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            api_base: "https://api.telegram.org".into(),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Outside development a missing or short `JWT_SECRET` is fatal.
    pub fn from_env() -> Result<Self> {
        let environment = env_or("ENVIRONMENT", "development");
        let jwt = JwtConfig {
            secret: Self::require_jwt_secret(&environment)?,
            expiration_minutes: env_parse("JWT_EXPIRATION_MINUTES", 720),
            issuer: env_or("JWT_ISSUER", "table-order"),
        };
        let http_port = env_parse("HTTP_PORT", 8000);

        Ok(Self {
            database_url: env_or("DATABASE_URL", "sqlite://data/table-order.db?mode=rwc"),
            http_port,
            environment,
            jwt,
            telegram: TelegramConfig {
                bot_token: std::env::var("TELEGRAM_BOT_TOKEN")
                    .ok()
                    .filter(|t| !t.is_empty()),
                api_base: env_or("TELEGRAM_API_BASE", "https://api.telegram.org"),
            },
            public_base_url: env_or("PUBLIC_BASE_URL", &format!("http://localhost:{http_port}"))
                .trim_end_matches('/')
                .to_string(),
            log_level: env_or("LOG_LEVEL", "info"),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS", 30_000),
            bootstrap_admin: match (
                std::env::var("ADMIN_USERNAME").ok().filter(|v| !v.is_empty()),
                std::env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty()),
            ) {
                (Some(username), Some(password)) => Some(BootstrapAdmin { username, password }),
                _ => None,
            },
        })
    }

    fn require_jwt_secret(environment: &str) -> Result<String> {
        match std::env::var("JWT_SECRET") {
            Ok(secret) if secret.len() >= 32 => Ok(secret),
            Ok(_) if environment != "development" => Err(ServerError::Config(
                "JWT_SECRET must be at least 32 characters long".into(),
            )),
            Err(_) if environment != "development" => Err(ServerError::Config(format!(
                "JWT_SECRET must be set in {environment} environment"
            ))),
            _ => {
                tracing::warn!("JWT_SECRET not set or too short, generating a temporary key");
                Ok(crate::auth::jwt::generate_printable_secret())
            }
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    /// Development defaults without reading the environment
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            http_port: 8000,
            environment: "development".into(),
            jwt: JwtConfig::default(),
            telegram: TelegramConfig::default(),
            public_base_url: "http://localhost:8000".into(),
            log_level: "info".into(),
            log_dir: None,
            request_timeout_ms: 30_000,
            bootstrap_admin: None,
        }
    }
}
