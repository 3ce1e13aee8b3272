use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{utc_now, ForumPostId, ForumReplyId};

/// ForumPost - a thread in a channel, carrying its replies inline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForumPost {
    pub id: ForumPostId,
    pub channel: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    /// Oldest first
    pub replies: Vec<ForumReply>,
}

impl ForumPost {
    pub fn new(
        channel: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            id: ForumPostId::new(),
            channel: channel.into(),
            title: title.into(),
            content: content.into(),
            author: author.into(),
            timestamp: utc_now(),
            replies: Vec::new(),
        }
    }
}

/// ForumReply - embedded in its parent post, no lifecycle of its own
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForumReply {
    pub id: ForumReplyId,
    pub content: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
}

impl ForumReply {
    pub fn new(content: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: ForumReplyId::new(),
            content: content.into(),
            author: author.into(),
            timestamp: utc_now(),
        }
    }
}
