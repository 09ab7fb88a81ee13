//! Store traits consumed by the service layer.
//!
//! Every trait has a PostgreSQL implementation in [`crate::repositories`]
//! and a process-local one in [`crate::memory`].

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use inkwell_core::result::AppResult;
use inkwell_core::types::pagination::PageRequest;
use inkwell_entity::article::{
    Article, ArticleFilter, ArticleOrder, Category, CategorySummary, NewArticle,
};
use inkwell_entity::comment::{Comment, NewComment};
use inkwell_entity::notification::{NewNotification, Notification};
use inkwell_entity::profile::Profile;

use crate::memory::MemoryStore;
use crate::repositories::{
    ArticleRepository, CommentRepository, MediaReferenceRepository, NotificationRepository,
    ProfileRepository,
};

/// Comment reads and the entry point for transactional comment writes.
#[async_trait]
pub trait CommentStore: Send + Sync + fmt::Debug + 'static {
    /// Open a transaction for a create or delete.
    async fn begin(&self) -> AppResult<Box<dyn CommentTransaction>>;

    /// Find a comment by primary key.
    async fn find_comment(&self, id: Uuid) -> AppResult<Option<Comment>>;

    /// All active comments on an article, oldest first.
    async fn list_active_for_article(&self, article_id: Uuid) -> AppResult<Vec<Comment>>;

    /// Flip the moderation flag. Returns the updated comment, if it exists.
    async fn set_active(&self, id: Uuid, active: bool) -> AppResult<Option<Comment>>;
}

/// A unit of work spanning comment writes and the notifications they emit.
///
/// Dropping a transaction without calling [`CommentTransaction::commit`]
/// discards every write made through it.
#[async_trait]
pub trait CommentTransaction: Send {
    /// Find an article by primary key.
    async fn find_article(&mut self, id: Uuid) -> AppResult<Option<Article>>;

    /// Find a comment by primary key.
    async fn find_comment(&mut self, id: Uuid) -> AppResult<Option<Comment>>;

    /// Count direct replies, active or not.
    async fn count_replies(&mut self, id: Uuid) -> AppResult<u64>;

    /// Insert a comment.
    async fn insert_comment(&mut self, comment: NewComment) -> AppResult<Comment>;

    /// Replace the content with `text` and clear the author.
    async fn tombstone_comment(&mut self, id: Uuid, text: &str) -> AppResult<Comment>;

    /// Remove a comment row.
    async fn delete_comment(&mut self, id: Uuid) -> AppResult<()>;

    /// Insert a notification.
    async fn insert_notification(
        &mut self,
        notification: NewNotification,
    ) -> AppResult<Notification>;

    /// Make every write visible.
    async fn commit(self: Box<Self>) -> AppResult<()>;
}

/// Notification feed persistence.
#[async_trait]
pub trait NotificationStore: Send + Sync + fmt::Debug + 'static {
    /// Count a recipient's notifications.
    async fn count_for_recipient(&self, recipient_id: Uuid) -> AppResult<u64>;

    /// One page of a recipient's notifications, newest first.
    async fn list_for_recipient(
        &self,
        recipient_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<Vec<Notification>>;

    /// Count unread notifications.
    async fn count_unread(&self, recipient_id: Uuid) -> AppResult<u64>;

    /// Mark every unread notification read. Returns rows changed.
    async fn mark_all_read(&self, recipient_id: Uuid) -> AppResult<u64>;

    /// Delete all of a recipient's notifications. Returns rows removed.
    async fn clear_all(&self, recipient_id: Uuid) -> AppResult<u64>;
}

/// Article and category persistence.
#[async_trait]
pub trait ArticleStore: Send + Sync + fmt::Debug + 'static {
    /// Find an article by primary key.
    async fn find_article(&self, id: Uuid) -> AppResult<Option<Article>>;

    /// Find a category by primary key.
    async fn find_category(&self, id: Uuid) -> AppResult<Option<Category>>;

    /// Whether an article published on `day` already uses `slug`.
    async fn slug_taken(&self, slug: &str, day: NaiveDate) -> AppResult<bool>;

    /// Insert an article.
    async fn insert_article(&self, article: NewArticle) -> AppResult<Article>;

    /// Count the articles passing `filter`.
    async fn count_articles(&self, filter: &ArticleFilter) -> AppResult<u64>;

    /// One page of the articles passing `filter`, in `order`.
    async fn list_articles(
        &self,
        filter: &ArticleFilter,
        order: ArticleOrder,
        page: &PageRequest,
    ) -> AppResult<Vec<Article>>;

    /// Add one to the read counter. Returns the updated article, if it exists.
    async fn increment_views(&self, id: Uuid) -> AppResult<Option<Article>>;

    /// Find a category by slug.
    async fn find_category_by_slug(&self, slug: &str) -> AppResult<Option<Category>>;

    /// Insert a category. A taken name or slug is a conflict.
    async fn create_category(&self, name: &str, slug: &str) -> AppResult<Category>;

    /// Every category with its published article count, by name.
    async fn list_categories(&self) -> AppResult<Vec<CategorySummary>>;
}

/// Profile persistence.
#[async_trait]
pub trait ProfileStore: Send + Sync + fmt::Debug + 'static {
    /// Find the profile of a user.
    async fn find_profile(&self, user_id: Uuid) -> AppResult<Option<Profile>>;

    /// Point the profile at a new image, creating the profile if needed.
    async fn set_profile_image(&self, user_id: Uuid, image: &str) -> AppResult<Profile>;
}

/// Every place the database refers to a stored media file.
#[async_trait]
pub trait MediaReferenceStore: Send + Sync + fmt::Debug + 'static {
    /// Non-empty profile image paths.
    async fn profile_image_paths(&self) -> AppResult<Vec<String>>;

    /// Non-empty article feature image paths.
    async fn article_image_paths(&self) -> AppResult<Vec<String>>;

    /// Every article body, for scanning embedded image URLs.
    async fn article_bodies(&self) -> AppResult<Vec<String>>;
}

/// The full set of stores, backed by one provider.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Comments.
    pub comments: Arc<dyn CommentStore>,
    /// Notifications.
    pub notifications: Arc<dyn NotificationStore>,
    /// Articles and categories.
    pub articles: Arc<dyn ArticleStore>,
    /// Profiles.
    pub profiles: Arc<dyn ProfileStore>,
    /// Media references.
    pub media_references: Arc<dyn MediaReferenceStore>,
}

impl Stores {
    /// Stores backed by PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            comments: Arc::new(CommentRepository::new(pool.clone())),
            notifications: Arc::new(NotificationRepository::new(pool.clone())),
            articles: Arc::new(ArticleRepository::new(pool.clone())),
            profiles: Arc::new(ProfileRepository::new(pool.clone())),
            media_references: Arc::new(MediaReferenceRepository::new(pool)),
        }
    }

    /// Stores backed by one shared in-memory store.
    pub fn memory(store: MemoryStore) -> Self {
        Self {
            comments: Arc::new(store.clone()),
            notifications: Arc::new(store.clone()),
            articles: Arc::new(store.clone()),
            profiles: Arc::new(store.clone()),
            media_references: Arc::new(store),
        }
    }
}
