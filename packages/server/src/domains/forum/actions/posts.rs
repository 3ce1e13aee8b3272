use tracing::info;

use crate::common::{ServiceError, ServiceResult};
use crate::domains::forum::models::ForumPost;
use crate::domains::forum::pseudonym::resolve_author;
use crate::kernel::ServerDeps;

/// Most posts returned for one channel.
pub const POSTS_LIMIT: i64 = 100;

/// Posts in `channel`, newest first.
pub async fn list_posts(channel: &str, deps: &ServerDeps) -> ServiceResult<Vec<ForumPost>> {
    deps.store
        .posts_in_channel(channel, POSTS_LIMIT)
        .await
        .map_err(ServiceError::Storage)
}

/// Create a post in `channel`, assigning a pseudonym when no author is given.
///
/// Blank `title` or `content` is rejected as a validation error even though
/// the request body itself is well-formed.
pub async fn create_post(
    channel: &str,
    title: &str,
    content: &str,
    author: Option<&str>,
    deps: &ServerDeps,
) -> ServiceResult<ForumPost> {
    if title.trim().is_empty() {
        return Err(ServiceError::Validation("title must not be empty".into()));
    }
    if content.trim().is_empty() {
        return Err(ServiceError::Validation("content must not be empty".into()));
    }

    let post = ForumPost::new(channel, title, content, resolve_author(author));
    deps.store
        .insert_post(&post)
        .await
        .map_err(ServiceError::Storage)?;

    info!(channel, post_id = %post.id, "Forum post created");
    Ok(post)
}
