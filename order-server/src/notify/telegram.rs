//! Telegram Bot API adapter

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::{ChatNotifier, InlineKeyboard, NotifyError};
use crate::core::TelegramConfig;

/// `sendMessage` over HTTPS
#[derive(Clone)]
pub struct TelegramNotifier {
    client: reqwest::Client,
    /// `{api_base}/bot{token}`
    endpoint: String,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("endpoint", &"[REDACTED]")
            .finish()
    }
}

#[derive(Deserialize)]
struct ApiReply {
    ok: bool,
    description: Option<String>,
}

impl TelegramNotifier {
    pub fn new(api_base: &str, token: &str, timeout: std::time::Duration) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/bot{}", api_base.trim_end_matches('/'), token),
        })
    }

    /// `None` when the config carries no token
    pub fn from_config(config: &TelegramConfig) -> Result<Option<Self>, NotifyError> {
        match &config.bot_token {
            Some(token) => Ok(Some(Self::new(
                &config.api_base,
                token,
                std::time::Duration::from_secs(10),
            )?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl ChatNotifier for TelegramNotifier {
    async fn send_text(
        &self,
        chat_id: &str,
        text: &str,
        keyboard: Option<InlineKeyboard>,
    ) -> Result<(), NotifyError> {
        let mut body = json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "Markdown",
        });
        if let Some(keyboard) = keyboard {
            body["reply_markup"] = json!({ "inline_keyboard": keyboard });
        }

        let reply: ApiReply = self
            .client
            .post(format!("{}/sendMessage", self.endpoint))
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        if !reply.ok {
            return Err(NotifyError::Api(
                reply.description.unwrap_or_else(|| "unknown error".into()),
            ));
        }
        tracing::debug!(chat_id, "Chat message delivered");
        Ok(())
    }
}
