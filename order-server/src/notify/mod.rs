//! Chat notification bridge
//!
//! [`ChatNotifier`] is the outbound port; [`TelegramNotifier`] talks to the
//! Bot API and [`NoopNotifier`] stands in when no bot token is configured.
//! [`Notifications`] turns domain events into messages and delivers them
//! off the request path.

pub mod messages;
pub mod telegram;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use shared::models::{OrderWithItems, Session, StaffCall};

pub use telegram::TelegramNotifier;

/// Delivery errors; never surfaced to the request that caused them
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Bot API rejected the request: {0}")]
    Api(String),
}

/// One inline button under a chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineButton {
    pub text: String,
    #[serde(flatten)]
    pub action: ButtonAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonAction {
    /// Opens the mini-app inside the chat client
    WebApp { url: String },
    /// Sends the payload back as a callback query
    CallbackData(String),
}

impl InlineButton {
    pub fn web_app(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            action: ButtonAction::WebApp { url: url.into() },
        }
    }

    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            action: ButtonAction::CallbackData(data.into()),
        }
    }
}

/// Rows of inline buttons
pub type InlineKeyboard = Vec<Vec<InlineButton>>;

/// Outbound chat port
#[async_trait]
pub trait ChatNotifier: Send + Sync {
    /// Deliver Markdown text to a chat
    async fn send_text(
        &self,
        chat_id: &str,
        text: &str,
        keyboard: Option<InlineKeyboard>,
    ) -> Result<(), NotifyError>;
}

/// Notifier used when no bot token is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

#[async_trait]
impl ChatNotifier for NoopNotifier {
    async fn send_text(
        &self,
        chat_id: &str,
        text: &str,
        _keyboard: Option<InlineKeyboard>,
    ) -> Result<(), NotifyError> {
        tracing::debug!(chat_id, text, "Chat delivery disabled, message dropped");
        Ok(())
    }
}

/// Fire-and-forget delivery of domain events
#[derive(Clone)]
pub struct Notifications {
    notifier: Arc<dyn ChatNotifier>,
}

impl Notifications {
    pub fn new(notifier: Arc<dyn ChatNotifier>) -> Self {
        Self { notifier }
    }

    pub fn notifier(&self) -> &Arc<dyn ChatNotifier> {
        &self.notifier
    }

    /// A diner submitted an order
    pub fn order_created(&self, session: &Session, order: &OrderWithItems) {
        let Some(chat_id) = session.telegram_chat_id.clone() else {
            return;
        };
        let text = messages::order_created(order);
        self.dispatch(chat_id, text, "order_created");
    }

    /// A diner called for staff
    pub fn staff_call_created(&self, session: &Session, table_number: &str, call: &StaffCall) {
        let Some(chat_id) = session.telegram_chat_id.clone() else {
            return;
        };
        let text = messages::staff_call_created(table_number, call);
        self.dispatch(chat_id, text, "staff_call_created");
    }

    fn dispatch(&self, chat_id: String, text: String, event: &'static str) {
        let notifier = self.notifier.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.send_text(&chat_id, &text, None).await {
                tracing::warn!(event, chat_id = %chat_id, error = %e, "Chat notification failed");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_serialize_in_bot_api_shape() {
        let keyboard: InlineKeyboard = vec![
            vec![InlineButton::web_app("Open menu", "https://example.com/miniapp")],
            vec![InlineButton::callback("Help", "help")],
        ];
        let json = serde_json::to_value(&keyboard).unwrap();
        assert_eq!(json[0][0]["text"], "Open menu");
        assert_eq!(json[0][0]["web_app"]["url"], "https://example.com/miniapp");
        assert_eq!(json[1][0]["callback_data"], "help");
    }
}
