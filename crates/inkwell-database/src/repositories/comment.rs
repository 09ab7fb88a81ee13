//! Comment repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use inkwell_core::error::{AppError, ErrorKind};
use inkwell_core::result::AppResult;
use inkwell_entity::article::Article;
use inkwell_entity::comment::{Comment, NewComment};
use inkwell_entity::notification::{NewNotification, Notification};

use crate::store::{CommentStore, CommentTransaction};

/// Repository for comment queries and transactional writes.
#[derive(Debug, Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    /// Create a new comment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentStore for CommentRepository {
    async fn begin(&self) -> AppResult<Box<dyn CommentTransaction>> {
        let tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;
        Ok(Box::new(PgCommentTransaction { tx }))
    }

    async fn find_comment(&self, id: Uuid) -> AppResult<Option<Comment>> {
        sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find comment", e))
    }

    async fn list_active_for_article(&self, article_id: Uuid) -> AppResult<Vec<Comment>> {
        sqlx::query_as::<_, Comment>(
            "SELECT * FROM comments WHERE article_id = $1 AND is_active = TRUE \
             ORDER BY created_at ASC, id ASC",
        )
        .bind(article_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list comments", e))
    }

    async fn set_active(&self, id: Uuid, active: bool) -> AppResult<Option<Comment>> {
        sqlx::query_as::<_, Comment>(
            "UPDATE comments SET is_active = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update comment status", e)
        })
    }
}

/// An open PostgreSQL transaction for comment writes.
pub struct PgCommentTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl CommentTransaction for PgCommentTransaction {
    async fn find_article(&mut self, id: Uuid) -> AppResult<Option<Article>> {
        sqlx::query_as::<_, Article>("SELECT * FROM articles WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find article", e))
    }

    async fn find_comment(&mut self, id: Uuid) -> AppResult<Option<Comment>> {
        // Row lock keeps a concurrent reply from slipping under a comment we are about to prune.
        sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find comment", e))
    }

    async fn count_replies(&mut self, id: Uuid) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE parent_id = $1")
            .bind(id)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count replies", e)
            })?;
        Ok(count as u64)
    }

    async fn insert_comment(&mut self, comment: NewComment) -> AppResult<Comment> {
        sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (id, article_id, author_id, parent_id, content, created_at, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, TRUE) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(comment.article_id)
        .bind(comment.author_id)
        .bind(comment.parent_id)
        .bind(&comment.content)
        .bind(comment.created_at)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create comment", e))
    }

    async fn tombstone_comment(&mut self, id: Uuid, text: &str) -> AppResult<Comment> {
        sqlx::query_as::<_, Comment>(
            "UPDATE comments SET content = $2, author_id = NULL WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(text)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to tombstone comment", e)
        })
    }

    async fn delete_comment(&mut self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete comment", e)
            })?;
        Ok(())
    }

    async fn insert_notification(
        &mut self,
        notification: NewNotification,
    ) -> AppResult<Notification> {
        let (target_kind, target_id) = notification.target.into_parts();
        sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (id, recipient_id, actor_id, verb, target_kind, target_id, is_read, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(notification.recipient_id)
        .bind(notification.actor_id)
        .bind(notification.verb)
        .bind(target_kind)
        .bind(target_id)
        .bind(notification.created_at)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create notification", e)
        })
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }
}
