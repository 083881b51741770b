mod chat_client;
mod conversation_repository;

pub use chat_client::*;
pub use conversation_repository::*;
