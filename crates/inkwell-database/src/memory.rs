//! Process-local store implementing every store trait.
//!
//! State lives behind one async mutex. A [`CommentTransaction`] holds the
//! lock for its whole lifetime and writes to a private copy that replaces
//! the shared state on commit, so transactions are serialized and an
//! uncommitted one leaves no trace.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use inkwell_core::error::AppError;
use inkwell_core::result::AppResult;
use inkwell_core::types::pagination::PageRequest;
use inkwell_entity::article::{
    Article, ArticleFilter, ArticleOrder, ArticleStatus, Category, CategorySummary, NewArticle,
};
use inkwell_entity::comment::{Comment, NewComment};
use inkwell_entity::notification::{NewNotification, Notification};
use inkwell_entity::profile::Profile;

use crate::store::{
    ArticleStore, CommentStore, CommentTransaction, MediaReferenceStore, NotificationStore,
    ProfileStore,
};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    articles: HashMap<Uuid, Article>,
    categories: HashMap<Uuid, Category>,
    comments: HashMap<Uuid, Comment>,
    notifications: Vec<Notification>,
    profiles: HashMap<Uuid, Profile>,
}

impl MemoryState {
    fn count_replies(&self, id: Uuid) -> u64 {
        self.comments
            .values()
            .filter(|c| c.parent_id == Some(id))
            .count() as u64
    }

    fn recipient_notifications(&self, recipient_id: Uuid) -> Vec<Notification> {
        let mut items: Vec<Notification> = self
            .notifications
            .iter()
            .filter(|n| n.recipient_id == recipient_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        items
    }

    fn filtered_articles(&self, filter: &ArticleFilter) -> impl Iterator<Item = &Article> {
        self.articles.values().filter(move |a| filter.matches(a))
    }
}

/// In-memory backend for all stores.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a profile as-is, replacing any existing one for the user.
    pub async fn insert_profile(&self, profile: Profile) {
        self.state
            .lock()
            .await
            .profiles
            .insert(profile.user_id, profile);
    }

    /// Every comment on an article regardless of moderation state, oldest first.
    pub async fn all_comments_for_article(&self, article_id: Uuid) -> Vec<Comment> {
        let state = self.state.lock().await;
        let mut comments: Vec<Comment> = state
            .comments
            .values()
            .filter(|c| c.article_id == article_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        comments
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn begin(&self) -> AppResult<Box<dyn CommentTransaction>> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryTransaction { guard, working }))
    }

    async fn find_comment(&self, id: Uuid) -> AppResult<Option<Comment>> {
        Ok(self.state.lock().await.comments.get(&id).cloned())
    }

    async fn list_active_for_article(&self, article_id: Uuid) -> AppResult<Vec<Comment>> {
        let state = self.state.lock().await;
        let mut comments: Vec<Comment> = state
            .comments
            .values()
            .filter(|c| c.article_id == article_id && c.is_active)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(comments)
    }

    async fn set_active(&self, id: Uuid, active: bool) -> AppResult<Option<Comment>> {
        let mut state = self.state.lock().await;
        Ok(state.comments.get_mut(&id).map(|c| {
            c.is_active = active;
            c.clone()
        }))
    }
}

/// Transaction over a private copy of the store state.
#[derive(Debug)]
pub struct MemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

#[async_trait]
impl CommentTransaction for MemoryTransaction {
    async fn find_article(&mut self, id: Uuid) -> AppResult<Option<Article>> {
        Ok(self.working.articles.get(&id).cloned())
    }

    async fn find_comment(&mut self, id: Uuid) -> AppResult<Option<Comment>> {
        Ok(self.working.comments.get(&id).cloned())
    }

    async fn count_replies(&mut self, id: Uuid) -> AppResult<u64> {
        Ok(self.working.count_replies(id))
    }

    async fn insert_comment(&mut self, comment: NewComment) -> AppResult<Comment> {
        let comment = comment.into_comment(Uuid::new_v4());
        self.working.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn tombstone_comment(&mut self, id: Uuid, text: &str) -> AppResult<Comment> {
        let comment = self
            .working
            .comments
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Comment {id} not found")))?;
        comment.content = text.to_string();
        comment.author_id = None;
        Ok(comment.clone())
    }

    async fn delete_comment(&mut self, id: Uuid) -> AppResult<()> {
        self.working.comments.remove(&id);
        Ok(())
    }

    async fn insert_notification(
        &mut self,
        notification: NewNotification,
    ) -> AppResult<Notification> {
        let notification = notification.into_notification(Uuid::new_v4());
        self.working.notifications.push(notification.clone());
        Ok(notification)
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let MemoryTransaction { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn count_for_recipient(&self, recipient_id: Uuid) -> AppResult<u64> {
        let state = self.state.lock().await;
        Ok(state
            .notifications
            .iter()
            .filter(|n| n.recipient_id == recipient_id)
            .count() as u64)
    }

    async fn list_for_recipient(
        &self,
        recipient_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<Vec<Notification>> {
        let state = self.state.lock().await;
        Ok(page.slice(&state.recipient_notifications(recipient_id)))
    }

    async fn count_unread(&self, recipient_id: Uuid) -> AppResult<u64> {
        let state = self.state.lock().await;
        Ok(state
            .notifications
            .iter()
            .filter(|n| n.recipient_id == recipient_id && !n.is_read)
            .count() as u64)
    }

    async fn mark_all_read(&self, recipient_id: Uuid) -> AppResult<u64> {
        let mut state = self.state.lock().await;
        let mut changed = 0;
        for n in state
            .notifications
            .iter_mut()
            .filter(|n| n.recipient_id == recipient_id && !n.is_read)
        {
            n.is_read = true;
            changed += 1;
        }
        Ok(changed)
    }

    async fn clear_all(&self, recipient_id: Uuid) -> AppResult<u64> {
        let mut state = self.state.lock().await;
        let before = state.notifications.len();
        state.notifications.retain(|n| n.recipient_id != recipient_id);
        Ok((before - state.notifications.len()) as u64)
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn find_article(&self, id: Uuid) -> AppResult<Option<Article>> {
        Ok(self.state.lock().await.articles.get(&id).cloned())
    }

    async fn find_category(&self, id: Uuid) -> AppResult<Option<Category>> {
        Ok(self.state.lock().await.categories.get(&id).cloned())
    }

    async fn slug_taken(&self, slug: &str, day: NaiveDate) -> AppResult<bool> {
        let state = self.state.lock().await;
        Ok(state
            .articles
            .values()
            .any(|a| a.slug == slug && a.published_at.date_naive() == day))
    }

    async fn insert_article(&self, article: NewArticle) -> AppResult<Article> {
        let article = article.into_article(Uuid::new_v4());
        self.state
            .lock()
            .await
            .articles
            .insert(article.id, article.clone());
        Ok(article)
    }

    async fn count_articles(&self, filter: &ArticleFilter) -> AppResult<u64> {
        let state = self.state.lock().await;
        Ok(state.filtered_articles(filter).count() as u64)
    }

    async fn list_articles(
        &self,
        filter: &ArticleFilter,
        order: ArticleOrder,
        page: &PageRequest,
    ) -> AppResult<Vec<Article>> {
        let state = self.state.lock().await;
        let mut items: Vec<Article> = state.filtered_articles(filter).cloned().collect();
        items.sort_by(|a, b| order.compare(a, b));
        Ok(page.slice(&items))
    }

    async fn increment_views(&self, id: Uuid) -> AppResult<Option<Article>> {
        let mut state = self.state.lock().await;
        Ok(state.articles.get_mut(&id).map(|a| {
            a.views += 1;
            a.clone()
        }))
    }

    async fn find_category_by_slug(&self, slug: &str) -> AppResult<Option<Category>> {
        let state = self.state.lock().await;
        Ok(state.categories.values().find(|c| c.slug == slug).cloned())
    }

    async fn create_category(&self, name: &str, slug: &str) -> AppResult<Category> {
        let mut state = self.state.lock().await;
        if state.categories.values().any(|c| c.name == name) {
            return Err(AppError::conflict(format!("Category '{name}' already exists")));
        }
        if state.categories.values().any(|c| c.slug == slug) {
            return Err(AppError::conflict(format!("Category slug '{slug}' is taken")));
        }

        let category = Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slug: slug.to_string(),
        };
        state.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn list_categories(&self) -> AppResult<Vec<CategorySummary>> {
        let state = self.state.lock().await;
        let mut summaries: Vec<CategorySummary> = state
            .categories
            .values()
            .map(|c| CategorySummary {
                id: c.id,
                name: c.name.clone(),
                slug: c.slug.clone(),
                post_count: state
                    .articles
                    .values()
                    .filter(|a| {
                        a.category_id == Some(c.id) && a.status == ArticleStatus::Published
                    })
                    .count() as i64,
            })
            .collect();
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(summaries)
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn find_profile(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        Ok(self.state.lock().await.profiles.get(&user_id).cloned())
    }

    async fn set_profile_image(&self, user_id: Uuid, image: &str) -> AppResult<Profile> {
        let mut state = self.state.lock().await;
        let now = Utc::now();
        let profile = state.profiles.entry(user_id).or_insert_with(|| Profile {
            user_id,
            nickname: String::new(),
            bio: String::new(),
            image: String::new(),
            updated_at: now,
        });
        profile.image = image.to_string();
        profile.updated_at = now;
        Ok(profile.clone())
    }
}

#[async_trait]
impl MediaReferenceStore for MemoryStore {
    async fn profile_image_paths(&self) -> AppResult<Vec<String>> {
        let state = self.state.lock().await;
        Ok(state
            .profiles
            .values()
            .filter(|p| !p.image.is_empty())
            .map(|p| p.image.clone())
            .collect())
    }

    async fn article_image_paths(&self) -> AppResult<Vec<String>> {
        let state = self.state.lock().await;
        Ok(state
            .articles
            .values()
            .filter_map(|a| a.feature_image.clone())
            .filter(|path| !path.is_empty())
            .collect())
    }

    async fn article_bodies(&self) -> AppResult<Vec<String>> {
        let state = self.state.lock().await;
        Ok(state.articles.values().map(|a| a.content.clone()).collect())
    }
}
