//! Typed ID definitions for all domain entities.

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for a single chat turn.
pub struct ChatMessageEntity;

/// Marker type for forum posts.
pub struct ForumPostEntity;

/// Marker type for replies embedded in a forum post.
pub struct ForumReplyEntity;

/// Marker type for crisis alerts.
pub struct CrisisAlertEntity;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

pub type ChatMessageId = Id<ChatMessageEntity>;

pub type ForumPostId = Id<ForumPostEntity>;

pub type ForumReplyId = Id<ForumReplyEntity>;

pub type CrisisAlertId = Id<CrisisAlertEntity>;
