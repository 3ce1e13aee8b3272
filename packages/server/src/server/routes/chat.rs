use axum::extract::{Extension, Path};
use serde::Deserialize;
use tracing::instrument;

use crate::domains::chat::{self, ChatMessage, ChatReply};
use crate::server::app::AppState;
use crate::server::error::{ApiError, ServiceResultExt};
use crate::server::extract::AppJson;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

#[instrument(skip(state, request), fields(session_id = %request.session_id))]
pub async fn chat_handler(
    Extension(state): Extension<AppState>,
    AppJson(request): AppJson<ChatRequest>,
) -> Result<AppJson<ChatReply>, ApiError> {
    let reply = chat::submit_message(&request.session_id, &request.message, &state.deps)
        .await
        .or_api("Chat service error")?;
    Ok(AppJson(reply))
}

#[instrument(skip(state))]
pub async fn chat_history_handler(
    Extension(state): Extension<AppState>,
    Path(session_id): Path<String>,
) -> Result<AppJson<Vec<ChatMessage>>, ApiError> {
    let history = chat::get_history(&session_id, &state.deps)
        .await
        .or_api("Failed to retrieve chat history")?;
    Ok(AppJson(history))
}
