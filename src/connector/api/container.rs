use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::{
    ChatClient, ConversationRepository, GetHistoryUseCase, JsonFileConversationRepository,
    MockChatClient, OpenAiClient, SendMessageUseCase,
};

pub struct ContainerConfig {
    /// JSON file holding the conversation log.
    pub data_file: PathBuf,
    /// Built frontend served for every non-API path, when the directory exists.
    pub web_dir: PathBuf,
    /// Credential for the completion API. Empty sends no `Authorization` header.
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
    /// Reply with [`MockChatClient`] instead of calling the completion API.
    pub mock_llm: bool,
}

pub struct Container {
    conversation_repo: Arc<dyn ConversationRepository>,
    chat_client: Arc<dyn ChatClient>,
    write_lock: Arc<Mutex<()>>,
    web_dir: Option<PathBuf>,
}

impl Container {
    pub async fn new(config: ContainerConfig) -> Self {
        let repo = JsonFileConversationRepository::new(&config.data_file);
        // Startup init only; every load re-checks the file.
        if let Err(e) = repo.initialize().await {
            warn!(
                "Failed to initialize conversation log at {}: {}",
                config.data_file.display(),
                e
            );
        }
        debug!("Using conversation log at {}", config.data_file.display());

        let chat_client: Arc<dyn ChatClient> = if config.mock_llm {
            debug!("Using mock chat client");
            Arc::new(MockChatClient::new())
        } else {
            if config.api_key.is_empty() {
                warn!("OPENAI_API_KEY is not set; completion requests will likely fail");
            }
            let client = OpenAiClient::new(
                config.api_key,
                config.model,
                config.base_url,
                Duration::from_secs(config.timeout_secs),
            );
            debug!("Using model {} at {}", client.model(), client.url());
            Arc::new(client)
        };

        let web_dir = config.web_dir.is_dir().then_some(config.web_dir);

        Self {
            conversation_repo: Arc::new(repo),
            chat_client,
            write_lock: Arc::new(Mutex::new(())),
            web_dir,
        }
    }

    /// Wires the given components directly, without a frontend directory.
    pub fn with_components(
        conversation_repo: Arc<dyn ConversationRepository>,
        chat_client: Arc<dyn ChatClient>,
    ) -> Self {
        Self {
            conversation_repo,
            chat_client,
            write_lock: Arc::new(Mutex::new(())),
            web_dir: None,
        }
    }

    pub fn send_message_use_case(&self) -> SendMessageUseCase {
        SendMessageUseCase::new(self.conversation_repo.clone(), self.chat_client.clone())
            .with_write_lock(self.write_lock.clone())
    }

    pub fn get_history_use_case(&self) -> GetHistoryUseCase {
        GetHistoryUseCase::new(self.conversation_repo.clone())
    }

    pub fn web_dir(&self) -> Option<&Path> {
        self.web_dir.as_deref()
    }
}
