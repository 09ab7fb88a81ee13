//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use inkwell_core::config::AppConfig;
use inkwell_core::traits::storage::StorageProvider;
use inkwell_database::Stores;
use inkwell_media::ImageNormalizer;
use inkwell_service::{
    ArticleService, CategoryService, CommentService, NotificationDispatcher, NotificationService,
    ProfileImageService, UploadService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Media blob storage
    pub storage: Arc<dyn StorageProvider>,
    /// Comment tree engine
    pub comment_service: Arc<CommentService>,
    /// Notification feed
    pub notification_service: Arc<NotificationService>,
    /// Article publishing and listings
    pub article_service: Arc<ArticleService>,
    /// Categories
    pub category_service: Arc<CategoryService>,
    /// Editor upload callback
    pub upload_service: Arc<UploadService>,
    /// Profile picture replacement
    pub profile_image_service: Arc<ProfileImageService>,
}

impl AppState {
    /// Wire every service from the stores and the blob storage.
    pub fn new(config: AppConfig, stores: Stores, storage: Arc<dyn StorageProvider>) -> Self {
        let media = Arc::new(config.media.clone());
        let normalizer = ImageNormalizer::new(&media);

        let comment_service = Arc::new(CommentService::new(
            Arc::clone(&stores.comments),
            Arc::clone(&stores.articles),
            NotificationDispatcher::new(),
            &config.feed,
        ));
        let notification_service = Arc::new(NotificationService::new(
            Arc::clone(&stores.notifications),
            &config.feed,
        ));
        let article_service = Arc::new(ArticleService::new(
            Arc::clone(&stores.articles),
            Arc::clone(&storage),
            normalizer.clone(),
            Arc::clone(&media),
            &config.feed,
        ));
        let category_service = Arc::new(CategoryService::new(Arc::clone(&stores.articles)));
        let upload_service = Arc::new(UploadService::new(
            Arc::clone(&storage),
            normalizer.clone(),
            Arc::clone(&media),
        ));
        let profile_image_service = Arc::new(ProfileImageService::new(
            Arc::clone(&stores.profiles),
            Arc::clone(&storage),
            normalizer,
            media,
        ));

        Self {
            config: Arc::new(config),
            storage,
            comment_service,
            notification_service,
            article_service,
            category_service,
            upload_service,
            profile_image_service,
        }
    }
}
