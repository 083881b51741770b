pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    ChatClient, ChatMessage, ChatRole, ConversationRepository, GetHistoryUseCase,
    SendMessageUseCase,
};

pub use cli::{Cli, Commands};

pub use connector::{
    InMemoryConversationRepository, JsonFileConversationRepository, MockChatClient, OpenAiClient,
};

pub use domain::{ConversationLog, DomainError, Message, Sender};
