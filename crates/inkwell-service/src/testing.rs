//! Shared fixtures for service tests.

use chrono::Utc;
use uuid::Uuid;

use inkwell_core::config::FeedConfig;
use inkwell_database::{MemoryStore, Stores};
use inkwell_entity::article::{Article, ArticleStatus, NewArticle};
use inkwell_entity::user::UserRole;

use crate::comment::CommentService;
use crate::context::RequestContext;
use crate::notification::{NotificationDispatcher, NotificationService};

/// An in-memory backend with one published article.
pub(crate) struct Fixture {
    pub store: MemoryStore,
    pub stores: Stores,
    pub comments: CommentService,
    pub notifications: NotificationService,
    pub author: RequestContext,
    pub article: Article,
}

impl Fixture {
    pub async fn new() -> Self {
        let store = MemoryStore::new();
        let stores = Stores::memory(store.clone());
        let feed = FeedConfig::default();

        let comments = CommentService::new(
            stores.comments.clone(),
            stores.articles.clone(),
            NotificationDispatcher::new(),
            &feed,
        );
        let notifications = NotificationService::new(stores.notifications.clone(), &feed);

        let author = RequestContext::new(Uuid::new_v4(), UserRole::Member);
        let article = publish(&stores, author.user_id, "Hello Inkwell").await;

        Self {
            store,
            stores,
            comments,
            notifications,
            author,
            article,
        }
    }

    pub fn member(&self) -> RequestContext {
        RequestContext::new(Uuid::new_v4(), UserRole::Member)
    }

    pub fn staff(&self) -> RequestContext {
        RequestContext::new(Uuid::new_v4(), UserRole::Staff)
    }

    pub async fn publish_article(&self, author_id: Uuid, title: &str) -> Article {
        publish(&self.stores, author_id, title).await
    }

    pub async fn draft_article(&self, author_id: Uuid, title: &str) -> Article {
        insert(&self.stores, author_id, title, ArticleStatus::Draft).await
    }
}

async fn publish(stores: &Stores, author_id: Uuid, title: &str) -> Article {
    insert(stores, author_id, title, ArticleStatus::Published).await
}

async fn insert(stores: &Stores, author_id: Uuid, title: &str, status: ArticleStatus) -> Article {
    stores
        .articles
        .insert_article(NewArticle {
            author_id,
            title: title.to_string(),
            slug: inkwell_entity::article::slugify(title),
            content: format!("<p>{title}</p>"),
            feature_image: None,
            category_id: None,
            status,
            published_at: Utc::now(),
        })
        .await
        .unwrap()
}
