pub mod chat_controller;
pub mod health_controller;
pub mod history_controller;

pub use chat_controller::send_message;
pub use health_controller::health_check;
pub use history_controller::get_history;
