use async_trait::async_trait;
use tracing::debug;

use crate::application::{ChatClient, ChatMessage, ChatRole};
use crate::domain::DomainError;

/// Offline [`ChatClient`] that echoes the latest user message.
pub struct MockChatClient;

impl MockChatClient {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, DomainError> {
        let last_user = messages
            .iter()
            .rev()
            .find(|m| m.role == ChatRole::User)
            .ok_or_else(|| DomainError::upstream("MockChatClient: no user message"))?;

        debug!("MockChatClient replying to {} messages", messages.len());
        Ok(format!("Echo: {}", last_user.content))
    }
}
