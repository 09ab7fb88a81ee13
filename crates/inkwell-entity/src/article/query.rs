//! Article list filters and orderings.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::Article;
use super::status::ArticleStatus;

/// Which articles a list query selects. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleFilter {
    /// Only articles with this status.
    pub status: Option<ArticleStatus>,
    /// Only articles by this author.
    pub author_id: Option<Uuid>,
    /// Only articles filed under this category.
    pub category_id: Option<Uuid>,
    /// Case-insensitive substring of the title or the body.
    pub search: Option<String>,
}

impl ArticleFilter {
    /// Published articles.
    pub fn published() -> Self {
        Self {
            status: Some(ArticleStatus::Published),
            ..Self::default()
        }
    }

    /// Narrow to one author.
    pub fn by_author(mut self, author_id: Uuid) -> Self {
        self.author_id = Some(author_id);
        self
    }

    /// Narrow to one category.
    pub fn in_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Narrow to articles mentioning `text`.
    pub fn matching(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Whether `article` passes the filter.
    pub fn matches(&self, article: &Article) -> bool {
        if self.status.is_some_and(|s| s != article.status) {
            return false;
        }
        if self.author_id.is_some_and(|id| id != article.author_id) {
            return false;
        }
        if self.category_id.is_some() && self.category_id != article.category_id {
            return false;
        }
        match &self.search {
            Some(text) => {
                let needle = text.to_lowercase();
                article.title.to_lowercase().contains(&needle)
                    || article.content.to_lowercase().contains(&needle)
            }
            None => true,
        }
    }
}

/// Sort order of an article list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleOrder {
    /// Most recently published first.
    Newest,
    /// Most read first, ties broken by publish time.
    MostViewed,
    /// Most recently modified first.
    RecentlyUpdated,
}

impl ArticleOrder {
    /// Compare two articles; `Less` sorts first.
    pub fn compare(&self, a: &Article, b: &Article) -> Ordering {
        let primary = match self {
            Self::Newest => b.published_at.cmp(&a.published_at),
            Self::MostViewed => b
                .views
                .cmp(&a.views)
                .then(b.published_at.cmp(&a.published_at)),
            Self::RecentlyUpdated => b.updated_at.cmp(&a.updated_at),
        };
        primary.then(b.id.cmp(&a.id))
    }
}
