//! Forum domain - pseudonymous posts and replies grouped by channel.

pub mod actions;
pub mod models;
pub mod pseudonym;

pub use actions::*;
pub use models::{ForumPost, ForumReply};
