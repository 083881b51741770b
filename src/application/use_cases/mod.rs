mod get_history;
mod send_message;

pub use get_history::*;
pub use send_message::*;
