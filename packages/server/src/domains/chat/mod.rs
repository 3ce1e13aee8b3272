//! Chat domain - AI support conversations grouped by client session.

pub mod actions;
pub mod models;
pub mod prompts;

pub use actions::*;
pub use models::ChatMessage;
