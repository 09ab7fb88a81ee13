//! Flattened thread views and deletion results.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::Comment;

/// A comment positioned in a depth-first thread listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadedComment {
    /// The comment itself.
    #[serde(flatten)]
    pub comment: Comment,
    /// Nesting level (0 for root comments).
    pub depth: u32,
}

/// What happened to a comment (and its ancestors) on delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommentDeletion {
    /// The comment still has replies and was replaced with a tombstone.
    Tombstoned {
        /// The rewritten comment.
        comment: Comment,
    },
    /// The comment was removed, followed by any ancestors left as empty tombstones.
    Removed {
        /// Removed comment IDs, starting with the requested one.
        removed: Vec<Uuid>,
    },
}
