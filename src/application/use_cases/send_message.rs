use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::application::{ChatClient, ChatMessage, ConversationRepository};
use crate::domain::{ConversationLog, DomainError, Message};

/// Relays one user message to the completion API and records the exchange.
///
/// The load, append, complete, append, save cycle runs under a write lock so
/// concurrent requests cannot overwrite each other's turns. Share the lock
/// (see [`SendMessageUseCase::with_write_lock`]) between every instance that
/// writes to the same store.
pub struct SendMessageUseCase {
    conversation_repo: Arc<dyn ConversationRepository>,
    chat_client: Arc<dyn ChatClient>,
    write_lock: Arc<Mutex<()>>,
}

impl SendMessageUseCase {
    /// Creates a use case with its own private write lock.
    ///
    /// Two instances built this way do not exclude each other. When several
    /// instances write to one store, give them a common lock with
    /// [`with_write_lock`](Self::with_write_lock), or obtain them from
    /// `Container::send_message_use_case`, which does so.
    pub fn new(
        conversation_repo: Arc<dyn ConversationRepository>,
        chat_client: Arc<dyn ChatClient>,
    ) -> Self {
        Self {
            conversation_repo,
            chat_client,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn with_write_lock(mut self, write_lock: Arc<Mutex<()>>) -> Self {
        self.write_lock = write_lock;
        self
    }

    /// Returns the updated log on success.
    ///
    /// Blank input fails with [`DomainError::InvalidInput`] before the store is
    /// touched. If the completion call fails the error is returned and nothing
    /// is saved, so the user's turn is not persisted either.
    pub async fn execute(&self, raw_text: &str) -> Result<ConversationLog, DomainError> {
        let text = raw_text.trim();
        let user_message = Message::user(text)?;

        let _guard = self.write_lock.lock().await;

        let mut log = self.conversation_repo.load().await;
        log.append(user_message);
        info!("User: {}", text);

        let request = ChatMessage::from_log(&log);
        debug!("Requesting completion with {} messages", request.len());

        let reply = match self.chat_client.complete(&request).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Completion failed, user turn not persisted: {}", e);
                return Err(into_upstream(e));
            }
        };

        let assistant_message = Message::assistant(reply).map_err(|_| {
            warn!("Completion returned an empty reply");
            DomainError::upstream("empty reply from completion API")
        })?;
        info!("AI: {} chars", assistant_message.text().len());

        log.append(assistant_message);
        self.conversation_repo.save(&log).await;

        Ok(log)
    }
}

fn into_upstream(err: DomainError) -> DomainError {
    match err {
        DomainError::UpstreamError(_) => err,
        other => DomainError::upstream(other.to_string()),
    }
}
