//! # inkwell-database
//!
//! Persistence for Inkwell: the store traits services depend on, their
//! PostgreSQL implementations, and a process-local implementation used
//! for development runs and tests.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{
    ArticleStore, CommentStore, CommentTransaction, MediaReferenceStore, NotificationStore,
    ProfileStore, Stores,
};
