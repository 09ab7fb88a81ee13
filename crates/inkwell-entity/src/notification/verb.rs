//! Notification verbs and targets.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The action a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_verb", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationVerb {
    /// Someone left a root comment on the recipient's article.
    CommentedOnArticle,
    /// Someone replied to the recipient's comment.
    RepliedToComment,
}

impl NotificationVerb {
    /// Human-readable phrase shown in the feed.
    pub fn phrase(&self) -> &'static str {
        match self {
            Self::CommentedOnArticle => "commented on your article",
            Self::RepliedToComment => "replied to your comment",
        }
    }
}

impl fmt::Display for NotificationVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.phrase())
    }
}

/// Discriminant stored alongside `target_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_target_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationTargetKind {
    /// The target is an article.
    Article,
    /// The target is a comment.
    Comment,
}

/// What a notification points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum NotificationTarget {
    /// An article, by ID.
    Article(Uuid),
    /// A comment, by ID.
    Comment(Uuid),
}

impl NotificationTarget {
    /// Rebuild a target from its stored columns.
    pub fn from_parts(kind: NotificationTargetKind, id: Uuid) -> Self {
        match kind {
            NotificationTargetKind::Article => Self::Article(id),
            NotificationTargetKind::Comment => Self::Comment(id),
        }
    }

    /// Split into the stored discriminant and ID.
    pub fn into_parts(self) -> (NotificationTargetKind, Uuid) {
        match self {
            Self::Article(id) => (NotificationTargetKind::Article, id),
            Self::Comment(id) => (NotificationTargetKind::Comment, id),
        }
    }
}
