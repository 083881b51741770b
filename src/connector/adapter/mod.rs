mod in_memory_conversation_repository;
mod json_file_conversation_repository;
mod mock_chat_client;
mod openai_client;

pub use in_memory_conversation_repository::*;
pub use json_file_conversation_repository::*;
pub use mock_chat_client::*;
pub use openai_client::*;
