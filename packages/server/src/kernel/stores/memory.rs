//! In-memory storage implementation for testing and development.

use std::cmp::Reverse;
use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::common::ForumPostId;
use crate::domains::chat::models::ChatMessage;
use crate::domains::forum::models::{ForumPost, ForumReply};
use crate::domains::safety::models::{AlertStatus, CrisisAlert};
use crate::kernel::traits::{AlertStore, ChatStore, ForumStore, Store};

/// In-memory store with the same ordering and cap semantics as
/// `PostgresStore`.
///
/// Not suitable for production as data is lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    messages: RwLock<Vec<ChatMessage>>,
    posts: RwLock<HashMap<ForumPostId, ForumPost>>,
    alerts: RwLock<Vec<CrisisAlert>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored chat turns across all sessions.
    pub async fn message_count(&self) -> usize {
        self.messages.read().await.len()
    }

    /// Number of stored forum posts.
    pub async fn post_count(&self) -> usize {
        self.posts.read().await.len()
    }

    /// Number of stored alerts, open or closed.
    pub async fn alert_count(&self) -> usize {
        self.alerts.read().await.len()
    }

    /// Total replies across all posts.
    pub async fn reply_count(&self) -> usize {
        self.posts
            .read()
            .await
            .values()
            .map(|p| p.replies.len())
            .sum()
    }
}

fn session_turns(messages: &[ChatMessage], session_id: &str) -> Vec<ChatMessage> {
    let mut turns: Vec<ChatMessage> = messages
        .iter()
        .filter(|m| m.session_id == session_id)
        .cloned()
        .collect();
    turns.sort_by_key(|m| (m.timestamp, m.id));
    turns
}

#[async_trait]
impl ChatStore for MemoryStore {
    async fn record_turn(&self, message: &ChatMessage, alert: Option<&CrisisAlert>) -> Result<()> {
        // Both locks held together so readers never see a half-recorded turn.
        let mut messages = self.messages.write().await;
        let mut alerts = self.alerts.write().await;
        messages.push(message.clone());
        if let Some(alert) = alert {
            alerts.push(alert.clone());
        }
        Ok(())
    }

    async fn session_history(&self, session_id: &str, limit: i64) -> Result<Vec<ChatMessage>> {
        let messages = self.messages.read().await;
        let mut turns = session_turns(&messages, session_id);
        turns.truncate(limit.max(0) as usize);
        Ok(turns)
    }

    async fn recent_turns(&self, session_id: &str, limit: i64) -> Result<Vec<ChatMessage>> {
        let messages = self.messages.read().await;
        let turns = session_turns(&messages, session_id);
        let skip = turns.len().saturating_sub(limit.max(0) as usize);
        Ok(turns.into_iter().skip(skip).collect())
    }
}

#[async_trait]
impl ForumStore for MemoryStore {
    async fn insert_post(&self, post: &ForumPost) -> Result<()> {
        self.posts.write().await.insert(post.id, post.clone());
        Ok(())
    }

    async fn posts_in_channel(&self, channel: &str, limit: i64) -> Result<Vec<ForumPost>> {
        let posts = self.posts.read().await;
        let mut matching: Vec<ForumPost> = posts
            .values()
            .filter(|p| p.channel == channel)
            .cloned()
            .collect();
        matching.sort_by_key(|p| Reverse((p.timestamp, p.id)));
        matching.truncate(limit.max(0) as usize);
        Ok(matching)
    }

    async fn distinct_channels(&self) -> Result<Vec<String>> {
        let posts = self.posts.read().await;
        let mut channels: Vec<String> = posts.values().map(|p| p.channel.clone()).collect();
        channels.sort();
        channels.dedup();
        Ok(channels)
    }

    async fn append_reply(
        &self,
        channel: &str,
        post_id: ForumPostId,
        reply: &ForumReply,
    ) -> Result<bool> {
        let mut posts = self.posts.write().await;
        match posts.get_mut(&post_id) {
            Some(post) if post.channel == channel => {
                post.replies.push(reply.clone());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl AlertStore for MemoryStore {
    async fn open_alerts(&self, limit: i64) -> Result<Vec<CrisisAlert>> {
        let alerts = self.alerts.read().await;
        let mut open: Vec<CrisisAlert> = alerts
            .iter()
            .filter(|a| a.status == AlertStatus::Open)
            .cloned()
            .collect();
        open.sort_by_key(|a| Reverse((a.timestamp, a.id)));
        open.truncate(limit.max(0) as usize);
        Ok(open)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
