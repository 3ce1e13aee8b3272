pub mod channels;
pub mod posts;
pub mod replies;

pub use channels::{list_channels, DEFAULT_CHANNELS};
pub use posts::{create_post, list_posts, POSTS_LIMIT};
pub use replies::add_reply;
