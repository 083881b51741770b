use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{ConversationLog, DomainError, Message, Sender};

/// Role of a message in a completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One entry of the ordered history sent to a completion API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    /// Translates a log into request order, one entry per message.
    pub fn from_log(log: &ConversationLog) -> Vec<ChatMessage> {
        log.iter().map(ChatMessage::from).collect()
    }
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        let role = match message.sender() {
            Sender::User => ChatRole::User,
            Sender::Assistant => ChatRole::Assistant,
        };
        Self {
            role,
            content: message.text().to_string(),
        }
    }
}

/// An interface for sending a conversation to an LLM and receiving the reply.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details. Any failure (network, auth, quota, malformed response) is reported
/// as [`DomainError::UpstreamError`].
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send the full ordered history and return the assistant's reply text.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_log_maps_roles_in_order() {
        let log = ConversationLog::from(vec![
            Message::user("Hello").unwrap(),
            Message::assistant("Hi there").unwrap(),
            Message::user("How are you?").unwrap(),
        ]);

        let messages = ChatMessage::from_log(&log);
        let roles: Vec<ChatRole> = messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![ChatRole::User, ChatRole::Assistant, ChatRole::User]);
        assert_eq!(messages[1].content, "Hi there");
    }

    #[test]
    fn roles_serialize_lowercase() {
        let msg = ChatMessage {
            role: ChatRole::Assistant,
            content: "ok".to_string(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json, serde_json::json!({ "role": "assistant", "content": "ok" }));
    }
}
