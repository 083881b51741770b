use async_trait::async_trait;

use crate::domain::ConversationLog;

/// Whole-log persistence for the conversation.
///
/// Neither operation reports failure. `load` returns an empty log when nothing
/// usable is stored; `save` may silently fail, so callers must not assume the
/// log was written.
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    async fn load(&self) -> ConversationLog;

    async fn save(&self, log: &ConversationLog);
}
