//! Comment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Content written over a comment that was deleted while it still had replies.
pub const TOMBSTONE_TEXT: &str = "[This comment has been deleted]";

/// A comment on an article, optionally replying to another comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Comment {
    /// Unique comment identifier.
    pub id: Uuid,
    /// The article this comment belongs to.
    pub article_id: Uuid,
    /// The author; cleared when the comment is tombstoned.
    pub author_id: Option<Uuid>,
    /// The comment this one replies to (null for root comments).
    pub parent_id: Option<Uuid>,
    /// Comment body.
    pub content: String,
    /// When the comment was submitted.
    pub created_at: DateTime<Utc>,
    /// Moderation flag; inactive comments are hidden from threads.
    pub is_active: bool,
}

impl Comment {
    /// Check if this is a root comment (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Check if the comment was soft-deleted.
    pub fn is_tombstoned(&self) -> bool {
        self.author_id.is_none()
    }

    /// Check whether `user_id` wrote this comment.
    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author_id == Some(user_id)
    }
}

/// Data required to persist a new comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    /// The article being commented on.
    pub article_id: Uuid,
    /// The authenticated author.
    pub author_id: Uuid,
    /// Parent comment, already validated against the article.
    pub parent_id: Option<Uuid>,
    /// Trimmed, non-empty body.
    pub content: String,
    /// Server-assigned submission time.
    pub created_at: DateTime<Utc>,
}

impl NewComment {
    /// Materialize the row this insert will produce.
    pub fn into_comment(self, id: Uuid) -> Comment {
        Comment {
            id,
            article_id: self.article_id,
            author_id: Some(self.author_id),
            parent_id: self.parent_id,
            content: self.content,
            created_at: self.created_at,
            is_active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_comment_is_active_and_authored() {
        let author = Uuid::new_v4();
        let comment = NewComment {
            article_id: Uuid::new_v4(),
            author_id: author,
            parent_id: None,
            content: "First!".to_string(),
            created_at: Utc::now(),
        }
        .into_comment(Uuid::new_v4());

        assert!(comment.is_active);
        assert!(comment.is_root());
        assert!(comment.is_authored_by(author));
        assert!(!comment.is_tombstoned());
    }
}
