use axum::extract::{Extension, Path};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domains::forum::{self, ForumPost, ForumReply};
use crate::server::app::AppState;
use crate::server::error::{ApiError, ServiceResultExt};
use crate::server::extract::AppJson;

#[derive(Debug, Serialize)]
pub struct ChannelsResponse {
    pub channels: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateReplyRequest {
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
}

#[instrument(skip(state))]
pub async fn list_channels_handler(
    Extension(state): Extension<AppState>,
) -> Result<AppJson<ChannelsResponse>, ApiError> {
    let channels = forum::list_channels(&state.deps)
        .await
        .or_api("Failed to retrieve channels")?;
    Ok(AppJson(ChannelsResponse { channels }))
}

#[instrument(skip(state))]
pub async fn list_posts_handler(
    Extension(state): Extension<AppState>,
    Path(channel): Path<String>,
) -> Result<AppJson<Vec<ForumPost>>, ApiError> {
    let posts = forum::list_posts(&channel, &state.deps)
        .await
        .or_api("Failed to retrieve forum posts")?;
    Ok(AppJson(posts))
}

#[instrument(skip(state, request))]
pub async fn create_post_handler(
    Extension(state): Extension<AppState>,
    Path(channel): Path<String>,
    AppJson(request): AppJson<CreatePostRequest>,
) -> Result<AppJson<ForumPost>, ApiError> {
    create_post_in(&state, &channel, request).await
}

/// `POST /api/forum/channels`: the static channel-list path shadows the
/// `:channel` capture, so a channel literally named `channels` lands here.
#[instrument(skip(state, request))]
pub async fn create_channels_post_handler(
    Extension(state): Extension<AppState>,
    AppJson(request): AppJson<CreatePostRequest>,
) -> Result<AppJson<ForumPost>, ApiError> {
    create_post_in(&state, "channels", request).await
}

async fn create_post_in(
    state: &AppState,
    channel: &str,
    request: CreatePostRequest,
) -> Result<AppJson<ForumPost>, ApiError> {
    let post = forum::create_post(
        channel,
        &request.title,
        &request.content,
        request.author.as_deref(),
        &state.deps,
    )
    .await
    .or_api("Failed to create forum post")?;
    Ok(AppJson(post))
}

#[instrument(skip(state, request))]
pub async fn add_reply_handler(
    Extension(state): Extension<AppState>,
    Path((channel, post_id)): Path<(String, String)>,
    AppJson(request): AppJson<CreateReplyRequest>,
) -> Result<AppJson<ForumReply>, ApiError> {
    let reply = forum::add_reply(
        &channel,
        &post_id,
        &request.content,
        request.author.as_deref(),
        &state.deps,
    )
    .await
    .or_api("Failed to add reply")?;
    Ok(AppJson(reply))
}
