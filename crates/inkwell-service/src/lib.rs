//! # inkwell-service
//!
//! Business logic service layer for Inkwell. Each service orchestrates the
//! store traits from `inkwell-database` and the media helpers from
//! `inkwell-media` to implement one application-level use case.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod article;
pub mod comment;
pub mod context;
pub mod media;
pub mod notification;

#[cfg(test)]
pub(crate) mod testing;

pub use article::{ArticleService, CategoryService};
pub use comment::CommentService;
pub use context::RequestContext;
pub use media::{MediaAuditService, ProfileImageService, UploadService};
pub use notification::{NotificationDispatcher, NotificationService};
