pub mod history;
pub mod send_message;

pub use history::{get_history, HISTORY_LIMIT};
pub use send_message::{submit_message, ChatReply, CONTEXT_TURNS};
