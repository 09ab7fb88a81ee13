//! Comment domain entities.

pub mod model;
pub mod thread;

pub use model::{Comment, NewComment, TOMBSTONE_TEXT};
pub use thread::{CommentDeletion, ThreadedComment};
