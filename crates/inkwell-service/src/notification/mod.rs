//! Notification dispatch on comment creation, and the recipient feed.

pub mod dispatcher;
pub mod service;

pub use dispatcher::NotificationDispatcher;
pub use service::NotificationService;
