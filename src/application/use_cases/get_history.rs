use std::sync::Arc;

use crate::application::ConversationRepository;
use crate::domain::ConversationLog;

pub struct GetHistoryUseCase {
    conversation_repo: Arc<dyn ConversationRepository>,
}

impl GetHistoryUseCase {
    pub fn new(conversation_repo: Arc<dyn ConversationRepository>) -> Self {
        Self { conversation_repo }
    }

    pub async fn execute(&self) -> ConversationLog {
        self.conversation_repo.load().await
    }
}
