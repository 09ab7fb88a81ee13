//! PostgreSQL implementations of the store traits.

pub mod article;
pub mod comment;
pub mod media;
pub mod notification;
pub mod profile;

pub use article::ArticleRepository;
pub use comment::{CommentRepository, PgCommentTransaction};
pub use media::MediaReferenceRepository;
pub use notification::NotificationRepository;
pub use profile::ProfileRepository;
