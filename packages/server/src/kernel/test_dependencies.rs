// Test dependencies - mock implementations for testing
//
// These are simple in-memory doubles that return canned responses.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use async_trait::async_trait;
use openai_client::Message;

use crate::common::ForumPostId;
use crate::domains::chat::models::ChatMessage;
use crate::domains::forum::models::{ForumPost, ForumReply};
use crate::domains::safety::models::CrisisAlert;

use super::stores::MemoryStore;
use super::{AlertStore, BaseAI, ChatStore, ForumStore, ServerDeps, Store};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// Mock AI
// =============================================================================

/// One recorded provider call.
#[derive(Debug, Clone)]
pub struct RecordedChat {
    pub session_id: String,
    pub messages: Vec<Message>,
}

pub struct MockAI {
    responses: Arc<Mutex<Vec<String>>>,
    calls: Arc<Mutex<Vec<RecordedChat>>>,
}

impl MockAI {
    pub const DEFAULT_RESPONSE: &'static str =
        "Thank you for sharing that with me. It sounds like a lot to carry right now.";

    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a text response to the queue
    pub fn with_response(self, response: impl Into<String>) -> Self {
        lock(&self.responses).push(response.into());
        self
    }

    /// Get all calls that were sent to the AI
    pub fn calls(&self) -> Vec<RecordedChat> {
        lock(&self.calls).clone()
    }

    /// Get the messages of the last call
    pub fn last_messages(&self) -> Option<Vec<Message>> {
        lock(&self.calls).last().map(|c| c.messages.clone())
    }

    /// Get the number of times the AI was called
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }
}

impl Default for MockAI {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn chat(&self, session_id: &str, messages: Vec<Message>) -> Result<String> {
        lock(&self.calls).push(RecordedChat {
            session_id: session_id.to_string(),
            messages,
        });

        let mut responses = lock(&self.responses);
        if responses.is_empty() {
            Ok(Self::DEFAULT_RESPONSE.to_string())
        } else {
            Ok(responses.remove(0))
        }
    }
}

/// AI double whose every call fails, for exercising provider-error paths.
pub struct FailingAI {
    reason: String,
}

impl FailingAI {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl BaseAI for FailingAI {
    async fn chat(&self, _session_id: &str, _messages: Vec<Message>) -> Result<String> {
        Err(anyhow::anyhow!("{}", self.reason))
    }
}

// =============================================================================
// Read-only store
// =============================================================================

/// Store double whose reads go to a `MemoryStore` and whose writes all fail,
/// for exercising database-error paths.
pub struct ReadOnlyStore {
    inner: Arc<MemoryStore>,
}

impl ReadOnlyStore {
    pub fn new(inner: Arc<MemoryStore>) -> Self {
        Self { inner }
    }
}

fn write_refused() -> anyhow::Error {
    anyhow::anyhow!("cannot execute INSERT in a read-only transaction")
}

#[async_trait]
impl ChatStore for ReadOnlyStore {
    async fn record_turn(
        &self,
        _message: &ChatMessage,
        _alert: Option<&CrisisAlert>,
    ) -> Result<()> {
        Err(write_refused())
    }

    async fn session_history(&self, session_id: &str, limit: i64) -> Result<Vec<ChatMessage>> {
        self.inner.session_history(session_id, limit).await
    }

    async fn recent_turns(&self, session_id: &str, limit: i64) -> Result<Vec<ChatMessage>> {
        self.inner.recent_turns(session_id, limit).await
    }
}

#[async_trait]
impl ForumStore for ReadOnlyStore {
    async fn insert_post(&self, _post: &ForumPost) -> Result<()> {
        Err(write_refused())
    }

    async fn posts_in_channel(&self, channel: &str, limit: i64) -> Result<Vec<ForumPost>> {
        self.inner.posts_in_channel(channel, limit).await
    }

    async fn distinct_channels(&self) -> Result<Vec<String>> {
        self.inner.distinct_channels().await
    }

    async fn append_reply(
        &self,
        _channel: &str,
        _post_id: ForumPostId,
        _reply: &ForumReply,
    ) -> Result<bool> {
        Err(write_refused())
    }
}

#[async_trait]
impl AlertStore for ReadOnlyStore {
    async fn open_alerts(&self, limit: i64) -> Result<Vec<CrisisAlert>> {
        self.inner.open_alerts(limit).await
    }
}

#[async_trait]
impl Store for ReadOnlyStore {
    async fn ping(&self) -> Result<()> {
        self.inner.ping().await
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

#[derive(Clone)]
pub struct TestDependencies {
    pub store: Arc<MemoryStore>,
    pub ai: Arc<dyn BaseAI>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            ai: Arc::new(MockAI::new()),
        }
    }

    /// Use an arbitrary AI implementation (shared so tests can inspect it)
    pub fn ai(mut self, ai: Arc<dyn BaseAI>) -> Self {
        self.ai = ai;
        self
    }

    /// Convert to ServerDeps for use in handlers
    pub fn into_server_deps(self) -> ServerDeps {
        ServerDeps::new(self.store, self.ai)
    }

    /// Like `into_server_deps`, but every store write fails while reads
    /// still see `self.store`.
    pub fn into_read_only_deps(self) -> ServerDeps {
        ServerDeps::new(Arc::new(ReadOnlyStore::new(self.store)), self.ai)
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
