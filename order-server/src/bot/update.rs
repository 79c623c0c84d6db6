//! Bot API update payloads, reduced to the fields the commands use

use serde::Deserialize;

use super::commands::BotCommand;

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub message: Option<Message>,
    pub data: Option<String>,
}

/// A recognised command and who sent it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
    /// Where the reply goes
    pub chat_id: String,
    /// Sender id, matched against `sessions.telegram_chat_id`
    pub user_id: String,
    pub first_name: Option<String>,
    pub command: BotCommand,
}

impl Update {
    /// `None` for updates that carry no command (plain text, stickers, ...)
    pub fn into_inbound(self) -> Option<Inbound> {
        if let Some(message) = self.message {
            let command = BotCommand::parse(message.text.as_deref()?)?;
            let from = message.from.as_ref();
            return Some(Inbound {
                chat_id: message.chat.id.to_string(),
                user_id: from.map_or(message.chat.id, |u| u.id).to_string(),
                first_name: from.map(|u| u.first_name.clone()),
                command,
            });
        }

        let query = self.callback_query?;
        let command = BotCommand::from_callback(query.data.as_deref()?)?;
        let chat_id = query
            .message
            .as_ref()
            .map_or(query.from.id, |m| m.chat.id);
        Some(Inbound {
            chat_id: chat_id.to_string(),
            user_id: query.from.id.to_string(),
            first_name: Some(query.from.first_name),
            command,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_command() {
        let update: Update = serde_json::from_value(json!({
            "update_id": 10,
            "message": {
                "message_id": 1,
                "from": {"id": 42, "first_name": "Aiko", "is_bot": false},
                "chat": {"id": 42, "type": "private"},
                "date": 1700000000,
                "text": "/order"
            }
        }))
        .unwrap();
        let inbound = update.into_inbound().unwrap();
        assert_eq!(inbound.chat_id, "42");
        assert_eq!(inbound.user_id, "42");
        assert_eq!(inbound.first_name.as_deref(), Some("Aiko"));
        assert_eq!(inbound.command, BotCommand::Order);
    }

    #[test]
    fn test_callback_query() {
        let update: Update = serde_json::from_value(json!({
            "update_id": 11,
            "callback_query": {
                "id": "cb-1",
                "from": {"id": 7, "first_name": "Ren"},
                "message": {"message_id": 3, "chat": {"id": -100}},
                "data": "help"
            }
        }))
        .unwrap();
        let inbound = update.into_inbound().unwrap();
        assert_eq!(inbound.chat_id, "-100");
        assert_eq!(inbound.user_id, "7");
        assert_eq!(inbound.command, BotCommand::Help);
    }

    #[test]
    fn test_plain_text_is_ignored() {
        let update: Update = serde_json::from_value(json!({
            "update_id": 12,
            "message": {"message_id": 4, "chat": {"id": 1}, "text": "hello"}
        }))
        .unwrap();
        assert!(update.into_inbound().is_none());
    }
}
