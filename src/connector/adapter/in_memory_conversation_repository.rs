use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::ConversationRepository;
use crate::domain::ConversationLog;

pub struct InMemoryConversationRepository {
    log: Arc<Mutex<ConversationLog>>,
}

impl InMemoryConversationRepository {
    pub fn new() -> Self {
        Self::with_log(ConversationLog::new())
    }

    pub fn with_log(log: ConversationLog) -> Self {
        Self {
            log: Arc::new(Mutex::new(log)),
        }
    }
}

impl Default for InMemoryConversationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn load(&self) -> ConversationLog {
        self.log.lock().await.clone()
    }

    async fn save(&self, log: &ConversationLog) {
        *self.log.lock().await = log.clone();
        debug!("Saved {} messages to memory", log.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Message;

    #[tokio::test]
    async fn starts_empty() {
        let repo = InMemoryConversationRepository::new();
        assert!(repo.load().await.is_empty());
    }

    #[tokio::test]
    async fn load_returns_a_copy() {
        let repo = InMemoryConversationRepository::new();
        let mut log = repo.load().await;
        log.append(Message::user("not saved").unwrap());

        assert!(repo.load().await.is_empty());

        repo.save(&log).await;
        assert_eq!(repo.load().await, log);
    }
}
