use tracing::info;

use crate::common::{ForumPostId, ServiceError, ServiceResult};
use crate::domains::forum::models::ForumReply;
use crate::domains::forum::pseudonym::resolve_author;
use crate::kernel::ServerDeps;

/// Append a reply to the post `post_id` in `channel`.
///
/// A malformed id is reported the same as a missing post. Blank `content` is
/// rejected as a validation error.
pub async fn add_reply(
    channel: &str,
    post_id: &str,
    content: &str,
    author: Option<&str>,
    deps: &ServerDeps,
) -> ServiceResult<ForumReply> {
    if content.trim().is_empty() {
        return Err(ServiceError::Validation("content must not be empty".into()));
    }
    let post_id = ForumPostId::parse(post_id).map_err(|_| ServiceError::NotFound("Post"))?;

    let reply = ForumReply::new(content, resolve_author(author));
    let appended = deps
        .store
        .append_reply(channel, post_id, &reply)
        .await
        .map_err(ServiceError::Storage)?;

    if !appended {
        return Err(ServiceError::NotFound("Post"));
    }

    info!(channel, %post_id, reply_id = %reply.id, "Reply added");
    Ok(reply)
}
