//! Depth-first flattening of a comment forest.

use std::collections::HashMap;

use uuid::Uuid;

use inkwell_entity::comment::{Comment, ThreadedComment};

/// Flatten comments into pre-order with depths.
///
/// Roots come first in creation order, and every comment is followed by
/// its whole reply subtree before its next sibling. Replies whose parent
/// is not in `comments` are unreachable and left out.
pub fn flatten_forest(mut comments: Vec<Comment>) -> Vec<ThreadedComment> {
    comments.sort_by_key(|c| c.created_at);

    let mut children: HashMap<Option<Uuid>, Vec<Comment>> = HashMap::new();
    for comment in comments {
        children.entry(comment.parent_id).or_default().push(comment);
    }

    let mut flat = Vec::new();
    let mut stack: Vec<(Comment, u32)> = children
        .remove(&None)
        .unwrap_or_default()
        .into_iter()
        .rev()
        .map(|c| (c, 0))
        .collect();

    while let Some((comment, depth)) = stack.pop() {
        if let Some(replies) = children.remove(&Some(comment.id)) {
            stack.extend(replies.into_iter().rev().map(|c| (c, depth + 1)));
        }
        flat.push(ThreadedComment { comment, depth });
    }

    flat
}
