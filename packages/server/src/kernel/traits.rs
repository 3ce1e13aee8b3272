// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (crisis screening, pseudonyms, ordering caps) lives in domain
// functions that use these traits.
//
// Naming convention: Base* for external services, *Store for persistence.

use anyhow::Result;
use async_trait::async_trait;
use openai_client::Message;

use crate::common::ForumPostId;
use crate::domains::chat::models::ChatMessage;
use crate::domains::forum::models::{ForumPost, ForumReply};
use crate::domains::safety::models::CrisisAlert;

// =============================================================================
// AI Trait (Infrastructure - chat completion)
// =============================================================================

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// Run a chat completion over `messages` and return the assistant text.
    ///
    /// `session_id` is forwarded as the provider's end-user tag so requests
    /// from one conversation can be correlated upstream.
    async fn chat(&self, session_id: &str, messages: Vec<Message>) -> Result<String>;
}

// =============================================================================
// Store Traits (Infrastructure - persistence)
// =============================================================================

#[async_trait]
pub trait ChatStore: Send + Sync {
    /// Persist one chat turn, plus its crisis alert when the turn was flagged.
    ///
    /// Both records are written or neither is.
    async fn record_turn(&self, message: &ChatMessage, alert: Option<&CrisisAlert>) -> Result<()>;

    /// Oldest-first history for a session, at most `limit` turns.
    async fn session_history(&self, session_id: &str, limit: i64) -> Result<Vec<ChatMessage>>;

    /// The most recent `limit` turns of a session, returned oldest-first.
    async fn recent_turns(&self, session_id: &str, limit: i64) -> Result<Vec<ChatMessage>>;
}

#[async_trait]
pub trait ForumStore: Send + Sync {
    async fn insert_post(&self, post: &ForumPost) -> Result<()>;

    /// Newest-first posts in a channel, at most `limit`.
    async fn posts_in_channel(&self, channel: &str, limit: i64) -> Result<Vec<ForumPost>>;

    /// Every channel name that has at least one post.
    async fn distinct_channels(&self) -> Result<Vec<String>>;

    /// Append `reply` to the post matching both `channel` and `post_id`.
    ///
    /// Returns `false` when no such post exists; nothing is written then.
    async fn append_reply(
        &self,
        channel: &str,
        post_id: ForumPostId,
        reply: &ForumReply,
    ) -> Result<bool>;
}

#[async_trait]
pub trait AlertStore: Send + Sync {
    /// Newest-first alerts with status `open`, at most `limit`.
    async fn open_alerts(&self, limit: i64) -> Result<Vec<CrisisAlert>>;
}

/// Everything the service persists, behind one handle.
#[async_trait]
pub trait Store: ChatStore + ForumStore + AlertStore {
    /// Cheap round-trip used by the health check.
    async fn ping(&self) -> Result<()>;
}
