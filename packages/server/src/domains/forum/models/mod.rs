pub mod forum_post;

pub use forum_post::{ForumPost, ForumReply};
