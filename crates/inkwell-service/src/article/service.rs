//! Article publishing, reading, and listing.

use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use inkwell_core::config::{FeedConfig, MediaConfig};
use inkwell_core::error::AppError;
use inkwell_core::result::AppResult;
use inkwell_core::traits::storage::StorageProvider;
use inkwell_core::types::pagination::{PageRequest, PageResponse};
use inkwell_database::store::ArticleStore;
use inkwell_entity::article::{
    Article, ArticleFilter, ArticleOrder, ArticleStatus, CategorySummary, NewArticle, slugify,
};
use inkwell_media::ImageNormalizer;

use crate::context::RequestContext;
use crate::media::dotted_extension;

/// Newest articles on the home page.
const HOME_LATEST: u64 = 6;
/// Most-read articles on the home page.
const HOME_POPULAR: u64 = 4;
/// Busiest categories on the home page.
const HOME_CATEGORIES: usize = 5;

/// Fields of a new article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishArticleRequest {
    /// Headline.
    pub title: String,
    /// Rich-text body.
    pub content: String,
    /// Optional category.
    #[serde(default)]
    pub category_id: Option<Uuid>,
    /// Draft or published.
    #[serde(default)]
    pub status: ArticleStatus,
}

/// An uploaded feature image.
#[derive(Debug, Clone)]
pub struct FeatureImage {
    /// Client-side file name.
    pub file_name: String,
    /// Raw bytes.
    pub data: Bytes,
}

/// Everything the landing page shows.
#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    /// Most recently published articles.
    pub latest: Vec<Article>,
    /// Most-read articles.
    pub popular: Vec<Article>,
    /// Categories with the most published articles.
    pub top_categories: Vec<CategorySummary>,
}

/// Publishes and serves articles.
#[derive(Debug, Clone)]
pub struct ArticleService {
    /// Article store.
    articles: Arc<dyn ArticleStore>,
    /// Blob storage.
    storage: Arc<dyn StorageProvider>,
    /// Image normalizer.
    normalizer: ImageNormalizer,
    /// Media configuration.
    config: Arc<MediaConfig>,
    /// Published articles per listing page.
    per_page: u64,
    /// Drafts per page.
    drafts_per_page: u64,
    /// Length of the most-read list.
    popular_posts: u64,
}

impl ArticleService {
    /// Creates a new article service.
    pub fn new(
        articles: Arc<dyn ArticleStore>,
        storage: Arc<dyn StorageProvider>,
        normalizer: ImageNormalizer,
        config: Arc<MediaConfig>,
        feed: &FeedConfig,
    ) -> Self {
        Self {
            articles,
            storage,
            normalizer,
            config,
            per_page: feed.articles_per_page,
            drafts_per_page: feed.drafts_per_page,
            popular_posts: feed.popular_posts,
        }
    }

    /// Default page size of published listings.
    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// Default page size of the draft list.
    pub fn drafts_per_page(&self) -> u64 {
        self.drafts_per_page
    }

    /// Read an article.
    ///
    /// A draft is only found by its author. Reading a published article
    /// counts a view.
    pub async fn get(
        &self,
        viewer: Option<&RequestContext>,
        article_id: Uuid,
    ) -> AppResult<Article> {
        let article = self
            .articles
            .find_article(article_id)
            .await?
            .filter(|a| a.is_visible_to(viewer.map(|ctx| ctx.user_id)))
            .ok_or_else(|| AppError::not_found(format!("Article {article_id} not found")))?;

        if article.status != ArticleStatus::Published {
            return Ok(article);
        }

        self.articles
            .increment_views(article_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Article {article_id} not found")))
    }

    /// Published articles, newest first.
    pub async fn list_published(&self, page: PageRequest) -> AppResult<PageResponse<Article>> {
        self.page_of(&ArticleFilter::published(), ArticleOrder::Newest, page)
            .await
    }

    /// Published articles whose title or body contains `query`, newest first.
    ///
    /// A blank query matches nothing.
    pub async fn search(
        &self,
        query: &str,
        page: PageRequest,
    ) -> AppResult<PageResponse<Article>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(PageResponse::new(Vec::new(), 1, page.page_size, 0));
        }

        debug!(query, page = page.page, "Searching articles");
        self.page_of(
            &ArticleFilter::published().matching(query),
            ArticleOrder::Newest,
            page,
        )
        .await
    }

    /// One author's published articles, newest first.
    pub async fn list_by_author(
        &self,
        author_id: Uuid,
        page: PageRequest,
    ) -> AppResult<PageResponse<Article>> {
        self.page_of(
            &ArticleFilter::published().by_author(author_id),
            ArticleOrder::Newest,
            page,
        )
        .await
    }

    /// Published articles in a category, newest first.
    pub async fn list_in_category(
        &self,
        category_id: Uuid,
        page: PageRequest,
    ) -> AppResult<PageResponse<Article>> {
        self.page_of(
            &ArticleFilter::published().in_category(category_id),
            ArticleOrder::Newest,
            page,
        )
        .await
    }

    /// The caller's own drafts, most recently edited first.
    pub async fn list_drafts(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<Article>> {
        let filter = ArticleFilter {
            status: Some(ArticleStatus::Draft),
            ..ArticleFilter::default()
        }
        .by_author(ctx.user_id);
        self.page_of(&filter, ArticleOrder::RecentlyUpdated, page)
            .await
    }

    /// The most-read published articles.
    pub async fn popular(&self) -> AppResult<Vec<Article>> {
        self.top(ArticleOrder::MostViewed, self.popular_posts).await
    }

    /// Latest articles, most-read articles, and the busiest categories.
    pub async fn home(&self) -> AppResult<HomePage> {
        let latest = self.top(ArticleOrder::Newest, HOME_LATEST).await?;
        let popular = self.top(ArticleOrder::MostViewed, HOME_POPULAR).await?;

        let mut top_categories = self.articles.list_categories().await?;
        top_categories.sort_by(|a, b| b.post_count.cmp(&a.post_count).then(a.name.cmp(&b.name)));
        top_categories.truncate(HOME_CATEGORIES);

        Ok(HomePage {
            latest,
            popular,
            top_categories,
        })
    }

    /// Create an article authored by the caller.
    ///
    /// The slug comes from the title and gets a `-1`, `-2`, ... suffix
    /// while another article published the same day already uses it.
    pub async fn publish(
        &self,
        ctx: &RequestContext,
        req: PublishArticleRequest,
        image: Option<FeatureImage>,
    ) -> AppResult<Article> {
        let title = req.title.trim();
        if title.is_empty() {
            return Err(AppError::validation("Title cannot be empty"));
        }
        if req.content.trim().is_empty() {
            return Err(AppError::validation("Content cannot be empty"));
        }
        if let Some(category_id) = req.category_id {
            self.articles
                .find_category(category_id)
                .await?
                .ok_or_else(|| AppError::validation(format!("Unknown category {category_id}")))?;
        }

        let published_at = Utc::now();
        let slug = self.unique_slug(title, published_at).await?;

        let feature_image = match image {
            Some(image) => Some(self.store_feature_image(ctx, image, published_at).await?),
            None => None,
        };

        let article = self
            .articles
            .insert_article(NewArticle {
                author_id: ctx.user_id,
                title: title.to_string(),
                slug,
                content: req.content,
                feature_image,
                category_id: req.category_id,
                status: req.status,
                published_at,
            })
            .await?;

        info!(
            article_id = %article.id,
            author_id = %ctx.user_id,
            slug = %article.slug,
            status = ?article.status,
            "Article created"
        );

        Ok(article)
    }

    /// Count, clamp the page onto the result, then fetch it.
    async fn page_of(
        &self,
        filter: &ArticleFilter,
        order: ArticleOrder,
        page: PageRequest,
    ) -> AppResult<PageResponse<Article>> {
        let total = self.articles.count_articles(filter).await?;
        let page = page.clamp_to(total);
        let items = self.articles.list_articles(filter, order, &page).await?;
        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    async fn top(&self, order: ArticleOrder, limit: u64) -> AppResult<Vec<Article>> {
        self.articles
            .list_articles(&ArticleFilter::published(), order, &PageRequest::new(1, limit))
            .await
    }

    async fn unique_slug(&self, title: &str, published_at: DateTime<Utc>) -> AppResult<String> {
        let base = slugify(title);
        let day = published_at.date_naive();

        let mut candidate = base.clone();
        let mut counter = 1u32;
        while self.articles.slug_taken(&candidate, day).await? {
            candidate = format!("{base}-{counter}");
            counter += 1;
        }
        Ok(candidate)
    }

    async fn store_feature_image(
        &self,
        ctx: &RequestContext,
        image: FeatureImage,
        published_at: DateTime<Utc>,
    ) -> AppResult<String> {
        let extension = dotted_extension(&image.file_name).unwrap_or_default();
        if !self.config.allowed_extensions.contains(&extension) {
            return Err(AppError::validation(format!(
                "Unsupported feature image type '{extension}'"
            )));
        }

        let compressed = self
            .normalizer
            .compress(image.data, &image.file_name)
            .await?;

        let path = format!(
            "{}/post_{}_{}_{}.jpg",
            self.config.post_image_dir.trim_end_matches('/'),
            ctx.user_id.simple(),
            published_at.timestamp_millis(),
            &Uuid::new_v4().simple().to_string()[..6],
        );
        self.storage
            .write(&path, Bytes::from(compressed.bytes))
            .await?;
        Ok(path)
    }
}
