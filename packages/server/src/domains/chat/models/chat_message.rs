use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::common::{utc_now, ChatMessageId};

/// ChatMessage - one user message and the assistant reply it received
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct ChatMessage {
    pub id: ChatMessageId,
    pub session_id: String,
    pub message: String,
    /// Reply as returned to the user, including any crisis-resources notice
    pub response: String,
    pub is_crisis: bool,
    #[sqlx(rename = "created_at")]
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(
        session_id: impl Into<String>,
        message: impl Into<String>,
        response: impl Into<String>,
        is_crisis: bool,
    ) -> Self {
        Self {
            id: ChatMessageId::new(),
            session_id: session_id.into(),
            message: message.into(),
            response: response.into(),
            is_crisis,
            timestamp: utc_now(),
        }
    }
}
