//! Slash commands: /start /help /menu /order /status

use shared::models::OrderStatus;
use sqlx::SqlitePool;

use super::{BotError, Inbound, Update};
use crate::core::ServerState;
use crate::db::RepoResult;
use crate::db::repository::{order as order_repo, session as session_repo};
use crate::notify::{InlineButton, InlineKeyboard, messages};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Help,
    Menu,
    Order,
    Status,
}

impl BotCommand {
    /// Parse `/cmd`, `/cmd@BotName` or `/cmd args`
    pub fn parse(text: &str) -> Option<Self> {
        let word = text.trim().split_whitespace().next()?;
        let name = word.strip_prefix('/')?;
        let name = name.split('@').next()?;
        match name.to_ascii_lowercase().as_str() {
            "start" => Some(Self::Start),
            "help" => Some(Self::Help),
            "menu" => Some(Self::Menu),
            "order" => Some(Self::Order),
            "status" => Some(Self::Status),
            _ => None,
        }
    }

    /// Inline button payloads
    pub fn from_callback(data: &str) -> Option<Self> {
        match data {
            "help" => Some(Self::Help),
            "menu" => Some(Self::Menu),
            "order" => Some(Self::Order),
            _ => None,
        }
    }
}

/// Text and optional buttons sent back to the chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<InlineKeyboard>,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }
}

/// Build the answer to one command; read-only
pub async fn reply_for(pool: &SqlitePool, miniapp_url: &str, inbound: &Inbound) -> RepoResult<Reply> {
    let reply = match inbound.command {
        BotCommand::Start => Reply {
            text: messages::welcome(inbound.first_name.as_deref()),
            keyboard: Some(vec![
                vec![InlineButton::web_app("🍽️ Start ordering", miniapp_url)],
                vec![InlineButton::callback("ℹ️ Help", "help")],
            ]),
        },
        BotCommand::Help => Reply::text(messages::HELP),
        BotCommand::Menu => Reply {
            text: messages::MENU.to_string(),
            keyboard: Some(vec![vec![InlineButton::web_app("🍽️ View menu", miniapp_url)]]),
        },
        BotCommand::Order => {
            let Some(session) = session_repo::find_open_by_chat(pool, &inbound.user_id).await? else {
                return Ok(Reply::text(messages::NO_OPEN_SESSION));
            };
            let mut conn = pool.acquire().await?;
            let orders = order_repo::find_by_session(&mut conn, session.id).await?;
            let mut billable: Vec<_> = orders
                .iter()
                .map(|o| &o.order)
                .filter(|o| o.status != OrderStatus::Cancelled)
                .collect();
            if billable.is_empty() {
                return Ok(Reply::text(messages::NO_ORDERS_YET));
            }
            billable.sort_by(|a, b| b.ordered_at.cmp(&a.ordered_at).then(b.id.cmp(&a.id)));
            let table_number = orders
                .first()
                .map(|o| o.table_number.as_str())
                .unwrap_or_default();
            Reply::text(messages::order_history(table_number, &billable))
        }
        BotCommand::Status => {
            let Some(session) = session_repo::find_open_by_chat(pool, &inbound.user_id).await? else {
                return Ok(Reply::text(messages::NO_OPEN_SESSION));
            };
            let mut conn = pool.acquire().await?;
            let orders = order_repo::find_by_session(&mut conn, session.id).await?;
            let mut waiting: Vec<_> = orders
                .iter()
                .map(|o| &o.order)
                .filter(|o| !o.status.is_terminal())
                .collect();
            if waiting.is_empty() {
                return Ok(Reply::text(messages::ALL_SERVED));
            }
            waiting.sort_by_key(|o| (o.ordered_at, o.id));
            Reply::text(messages::kitchen_status(&waiting))
        }
    };
    Ok(reply)
}

/// Decode a webhook payload, run its command and send the reply
pub async fn handle_update(state: &ServerState, payload: serde_json::Value) -> Result<(), BotError> {
    let update: Update = serde_json::from_value(payload)?;
    let update_id = update.update_id;
    let Some(inbound) = update.into_inbound() else {
        tracing::debug!(update_id, "Update without command ignored");
        return Ok(());
    };

    let reply = reply_for(&state.pool, &state.miniapp_url(), &inbound).await?;
    state
        .notifications
        .notifier()
        .send_text(&inbound.chat_id, &reply.text, reply.keyboard)
        .await?;
    tracing::info!(update_id, command = ?inbound.command, "Bot command answered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(BotCommand::parse("/start"), Some(BotCommand::Start));
        assert_eq!(BotCommand::parse("/menu@TableOrderBot"), Some(BotCommand::Menu));
        assert_eq!(BotCommand::parse("  /STATUS now"), Some(BotCommand::Status));
        assert_eq!(BotCommand::parse("/pay"), None);
        assert_eq!(BotCommand::parse("order"), None);
        assert_eq!(BotCommand::parse(""), None);
    }

    #[test]
    fn test_callback_payloads() {
        assert_eq!(BotCommand::from_callback("order"), Some(BotCommand::Order));
        assert_eq!(BotCommand::from_callback("start"), None);
    }
}
