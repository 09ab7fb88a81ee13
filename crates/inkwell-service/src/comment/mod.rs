//! Threaded comments: creation, flattening, deletion with tombstone pruning.

pub mod service;
pub mod thread;

pub use service::{CommentService, CreateCommentRequest};
pub use thread::flatten_forest;
