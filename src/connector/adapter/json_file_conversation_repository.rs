use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, error};

use crate::application::ConversationRepository;
use crate::domain::{ConversationLog, DomainError};

/// Stores the conversation as a pretty-printed JSON array in a single file.
///
/// Every save rewrites the whole file, replacing it by rename so readers never
/// observe a partial write. A missing file is an empty log and is
/// created on first access.
pub struct JsonFileConversationRepository {
    path: PathBuf,
}

impl JsonFileConversationRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file a save is written to before replacing the log.
    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Creates the file holding an empty log if it does not exist yet.
    pub async fn initialize(&self) -> Result<(), DomainError> {
        if fs::try_exists(&self.path).await? {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&self.path, "[]").await?;
        debug!("Initialized empty conversation log at {}", self.path.display());
        Ok(())
    }

    pub async fn try_load(&self) -> Result<ConversationLog, DomainError> {
        self.initialize().await?;

        let data = fs::read_to_string(&self.path).await?;
        if data.trim().is_empty() {
            return Err(DomainError::storage(format!(
                "{} is empty",
                self.path.display()
            )));
        }

        let log: ConversationLog = serde_json::from_str(&data).map_err(|e| {
            DomainError::storage(format!("failed to parse {}: {}", self.path.display(), e))
        })?;
        debug!("Loaded {} messages from {}", log.len(), self.path.display());
        Ok(log)
    }

    pub async fn try_save(&self, log: &ConversationLog) -> Result<(), DomainError> {
        let json = serde_json::to_string_pretty(log)
            .map_err(|e| DomainError::internal(format!("failed to encode log: {e}")))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, json).await?;
        fs::rename(&tmp_path, &self.path).await?;
        debug!("Saved {} messages to {}", log.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl ConversationRepository for JsonFileConversationRepository {
    async fn load(&self) -> ConversationLog {
        match self.try_load().await {
            Ok(log) => log,
            Err(e) => {
                error!("Error reading chat history: {}", e);
                ConversationLog::new()
            }
        }
    }

    async fn save(&self, log: &ConversationLog) {
        if let Err(e) = self.try_save(log).await {
            error!("Error saving chat history: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Message;

    fn sample_log() -> ConversationLog {
        ConversationLog::from(vec![
            Message::user("Hello").unwrap(),
            Message::assistant("Hi there").unwrap(),
        ])
    }

    #[tokio::test]
    async fn load_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.json");
        let repo = JsonFileConversationRepository::new(&path);

        assert!(repo.load().await.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[tokio::test]
    async fn initialize_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data").join("chat.json");
        let repo = JsonFileConversationRepository::new(&path);

        repo.initialize().await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn initialize_keeps_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.json");
        let repo = JsonFileConversationRepository::new(&path);
        repo.save(&sample_log()).await;

        repo.initialize().await.unwrap();
        assert_eq!(repo.load().await, sample_log());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileConversationRepository::new(dir.path().join("chat.json"));

        repo.save(&sample_log()).await;
        assert_eq!(repo.load().await, sample_log());
    }

    #[tokio::test]
    async fn save_writes_pretty_printed_wire_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.json");
        let repo = JsonFileConversationRepository::new(&path);

        repo.save(&sample_log()).await;

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains('\n'), "expected pretty-printed output");
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                { "sender": "user", "text": "Hello" },
                { "sender": "ai", "text": "Hi there" }
            ])
        );
    }

    #[tokio::test]
    async fn corrupt_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.json");
        std::fs::write(&path, "{ not json").unwrap();
        let repo = JsonFileConversationRepository::new(&path);

        assert!(repo.load().await.is_empty());
        assert!(repo.try_load().await.unwrap_err().is_storage_error());
    }

    #[tokio::test]
    async fn unknown_sender_keeps_the_rest_of_the_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.json");
        std::fs::write(
            &path,
            r#"[
                {"sender": "user", "text": "keep me"},
                {"sender": "ai", "text": "kept"},
                {"sender": "system", "text": "x"}
            ]"#,
        )
        .unwrap();
        let repo = JsonFileConversationRepository::new(&path);

        let log = repo.try_load().await.unwrap();
        assert_eq!(log.len(), 3);
        assert_eq!(log.messages()[0].text(), "keep me");
        assert_eq!(log.messages()[2].sender(), crate::domain::Sender::User);
    }

    #[tokio::test]
    async fn blank_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.json");
        std::fs::write(&path, "  \n").unwrap();
        let repo = JsonFileConversationRepository::new(&path);

        assert!(repo.load().await.is_empty());
    }

    #[tokio::test]
    async fn save_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the parent directory should be.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let repo = JsonFileConversationRepository::new(blocker.join("chat.json"));

        repo.save(&sample_log()).await;
        assert!(repo.try_save(&sample_log()).await.is_err());
    }
}
