mod conversation_log;
mod message;

pub use conversation_log::*;
pub use message::*;
