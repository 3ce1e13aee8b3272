//! PostgreSQL storage implementation.
//!
//! Forum replies live in a JSONB array on their post row, so appending a
//! reply is a single `UPDATE`. Chat turns and their alerts are written in one
//! transaction.

use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use sqlx::types::Json;
use sqlx::FromRow;
use tracing::{debug, info};

use crate::common::{CrisisAlertId, ForumPostId};
use crate::domains::chat::models::ChatMessage;
use crate::domains::forum::models::{ForumPost, ForumReply};
use crate::domains::safety::models::{AlertStatus, CrisisAlert};
use crate::kernel::traits::{AlertStore, ChatStore, ForumStore, Store};

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Open a pool against `database_url`.
    ///
    /// `database_name`, when set, overrides the database named in the URL.
    pub async fn connect(
        database_url: &str,
        database_name: Option<&str>,
        max_connections: u32,
    ) -> Result<Self> {
        let mut options =
            PgConnectOptions::from_str(database_url).context("Invalid DATABASE_URL")?;
        if let Some(name) = database_name {
            options = options.database(name);
        }

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .context("Failed to connect to database")?;

        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply pending schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        info!("Running database migrations...");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run migrations")?;
        info!("Migrations complete");
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

// =============================================================================
// Row types
// =============================================================================

#[derive(FromRow)]
struct ForumPostRow {
    id: ForumPostId,
    channel: String,
    title: String,
    content: String,
    author: String,
    created_at: DateTime<Utc>,
    replies: Json<Vec<ForumReply>>,
}

impl From<ForumPostRow> for ForumPost {
    fn from(row: ForumPostRow) -> Self {
        Self {
            id: row.id,
            channel: row.channel,
            title: row.title,
            content: row.content,
            author: row.author,
            timestamp: row.created_at,
            replies: row.replies.0,
        }
    }
}

#[derive(FromRow)]
struct CrisisAlertRow {
    id: CrisisAlertId,
    session_id: String,
    message: String,
    created_at: DateTime<Utc>,
    status: String,
}

impl TryFrom<CrisisAlertRow> for CrisisAlert {
    type Error = anyhow::Error;

    fn try_from(row: CrisisAlertRow) -> Result<Self> {
        Ok(Self {
            id: row.id,
            session_id: row.session_id,
            message: row.message,
            timestamp: row.created_at,
            status: row.status.parse()?,
        })
    }
}

// =============================================================================
// Store implementations
// =============================================================================

#[async_trait]
impl ChatStore for PostgresStore {
    async fn record_turn(&self, message: &ChatMessage, alert: Option<&CrisisAlert>) -> Result<()> {
        let mut tx = self.pool.begin().await.context("Failed to begin transaction")?;

        sqlx::query(
            r#"
            INSERT INTO chat_messages (id, session_id, message, response, is_crisis, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(message.id)
        .bind(&message.session_id)
        .bind(&message.message)
        .bind(&message.response)
        .bind(message.is_crisis)
        .bind(message.timestamp)
        .execute(&mut *tx)
        .await
        .context("Failed to insert chat message")?;

        if let Some(alert) = alert {
            sqlx::query(
                r#"
                INSERT INTO crisis_alerts (id, session_id, message, created_at, status)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(alert.id)
            .bind(&alert.session_id)
            .bind(&alert.message)
            .bind(alert.timestamp)
            .bind(alert.status.to_string())
            .execute(&mut *tx)
            .await
            .context("Failed to insert crisis alert")?;
        }

        tx.commit().await.context("Failed to commit chat turn")?;
        debug!(message_id = %message.id, "Chat turn recorded");
        Ok(())
    }

    async fn session_history(&self, session_id: &str, limit: i64) -> Result<Vec<ChatMessage>> {
        sqlx::query_as::<_, ChatMessage>(
            r#"
            SELECT id, session_id, message, response, is_crisis, created_at
            FROM chat_messages
            WHERE session_id = $1
            ORDER BY created_at ASC, id ASC
            LIMIT $2
            "#,
        )
        .bind(session_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to load chat history")
    }

    async fn recent_turns(&self, session_id: &str, limit: i64) -> Result<Vec<ChatMessage>> {
        sqlx::query_as::<_, ChatMessage>(
            r#"
            SELECT id, session_id, message, response, is_crisis, created_at
            FROM (
                SELECT id, session_id, message, response, is_crisis, created_at
                FROM chat_messages
                WHERE session_id = $1
                ORDER BY created_at DESC, id DESC
                LIMIT $2
            ) recent
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(session_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to load recent chat turns")
    }
}

#[async_trait]
impl ForumStore for PostgresStore {
    async fn insert_post(&self, post: &ForumPost) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO forum_posts (id, channel, title, content, author, created_at, replies)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(post.id)
        .bind(&post.channel)
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.author)
        .bind(post.timestamp)
        .bind(Json(&post.replies))
        .execute(&self.pool)
        .await
        .context("Failed to insert forum post")?;
        Ok(())
    }

    async fn posts_in_channel(&self, channel: &str, limit: i64) -> Result<Vec<ForumPost>> {
        let rows = sqlx::query_as::<_, ForumPostRow>(
            r#"
            SELECT id, channel, title, content, author, created_at, replies
            FROM forum_posts
            WHERE channel = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(channel)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to load forum posts")?;

        Ok(rows.into_iter().map(ForumPost::from).collect())
    }

    async fn distinct_channels(&self) -> Result<Vec<String>> {
        sqlx::query_scalar::<_, String>("SELECT DISTINCT channel FROM forum_posts")
            .fetch_all(&self.pool)
            .await
            .context("Failed to load channels")
    }

    async fn append_reply(
        &self,
        channel: &str,
        post_id: ForumPostId,
        reply: &ForumReply,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE forum_posts
            SET replies = replies || $3
            WHERE id = $1 AND channel = $2
            "#,
        )
        .bind(post_id)
        .bind(channel)
        .bind(Json(std::slice::from_ref(reply)))
        .execute(&self.pool)
        .await
        .context("Failed to append reply")?;

        Ok(result.rows_affected() == 1)
    }
}

#[async_trait]
impl AlertStore for PostgresStore {
    async fn open_alerts(&self, limit: i64) -> Result<Vec<CrisisAlert>> {
        let rows = sqlx::query_as::<_, CrisisAlertRow>(
            r#"
            SELECT id, session_id, message, created_at, status
            FROM crisis_alerts
            WHERE status = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(AlertStatus::Open.to_string())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to load crisis alerts")?;

        rows.into_iter().map(CrisisAlert::try_from).collect()
    }
}

#[async_trait]
impl Store for PostgresStore {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Database ping failed")?;
        Ok(())
    }
}
