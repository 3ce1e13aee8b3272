//! Chat turn: screen, ask the provider, annotate, persist.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::common::{ChatMessageId, ServiceError, ServiceResult};
use crate::domains::chat::models::ChatMessage;
use crate::domains::chat::prompts::build_conversation;
use crate::domains::safety::models::CrisisAlert;
use crate::domains::safety::{detect_crisis, with_crisis_resources};
use crate::kernel::ServerDeps;

/// Prior turns sent to the provider for continuity.
pub const CONTEXT_TURNS: i64 = 20;

/// What the caller gets back for a chat turn.
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub id: ChatMessageId,
    pub response: String,
    pub is_crisis: bool,
    pub timestamp: DateTime<Utc>,
}

impl From<ChatMessage> for ChatReply {
    fn from(turn: ChatMessage) -> Self {
        Self {
            id: turn.id,
            response: turn.response,
            is_crisis: turn.is_crisis,
            timestamp: turn.timestamp,
        }
    }
}

/// Handle one user message in `session_id`.
///
/// A flagged message gets the crisis-resources notice appended to the reply
/// and an open `CrisisAlert`, recorded together with the turn. Provider and
/// store failures abort the turn before anything is written.
///
/// An empty or whitespace-only `session_id` or `text` is a validation error,
/// stricter than the wire format, which only requires both to be strings.
pub async fn submit_message(
    session_id: &str,
    text: &str,
    deps: &ServerDeps,
) -> ServiceResult<ChatReply> {
    if session_id.trim().is_empty() {
        return Err(ServiceError::Validation(
            "session_id must not be empty".into(),
        ));
    }
    if text.trim().is_empty() {
        return Err(ServiceError::Validation("message must not be empty".into()));
    }

    let history = deps
        .store
        .recent_turns(session_id, CONTEXT_TURNS)
        .await
        .map_err(ServiceError::Storage)?;

    let is_crisis = detect_crisis(text);

    let conversation = build_conversation(&history, text);
    debug!(
        session_id,
        prior_turns = history.len(),
        "Sending conversation to provider"
    );
    let reply = deps
        .ai
        .chat(session_id, conversation)
        .await
        .map_err(ServiceError::Provider)?;

    let (response, alert) = if is_crisis {
        (
            with_crisis_resources(reply),
            Some(CrisisAlert::open(session_id, text)),
        )
    } else {
        (reply, None)
    };

    let turn = ChatMessage::new(session_id, text, response, is_crisis);
    deps.store
        .record_turn(&turn, alert.as_ref())
        .await
        .map_err(ServiceError::Storage)?;

    if let Some(alert) = &alert {
        warn!(session_id, alert_id = %alert.id, "Crisis language detected, alert opened");
    }

    Ok(ChatReply::from(turn))
}
