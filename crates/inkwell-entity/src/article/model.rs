//! Article and category entity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::ArticleStatus;

/// A blog article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Article {
    /// Unique article identifier.
    pub id: Uuid,
    /// The author, who receives notifications for root comments.
    pub author_id: Uuid,
    /// Headline.
    pub title: String,
    /// URL slug, unique per publish date.
    pub slug: String,
    /// Rich-text body; may embed media URLs.
    pub content: String,
    /// Feature image path relative to the media root.
    pub feature_image: Option<String>,
    /// Optional category.
    pub category_id: Option<Uuid>,
    /// Draft or published.
    pub status: ArticleStatus,
    /// Read counter.
    pub views: i64,
    /// Publish timestamp.
    pub published_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Whether `viewer` may read this article.
    ///
    /// Published articles are public. Drafts are visible to their author only.
    pub fn is_visible_to(&self, viewer: Option<Uuid>) -> bool {
        self.status == ArticleStatus::Published || viewer == Some(self.author_id)
    }
}

/// Data required to persist a new article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewArticle {
    /// The author.
    pub author_id: Uuid,
    /// Headline.
    pub title: String,
    /// Deduplicated slug.
    pub slug: String,
    /// Rich-text body.
    pub content: String,
    /// Stored feature image path, if any.
    pub feature_image: Option<String>,
    /// Optional category.
    pub category_id: Option<Uuid>,
    /// Draft or published.
    pub status: ArticleStatus,
    /// Publish timestamp.
    pub published_at: DateTime<Utc>,
}

impl NewArticle {
    /// Materialize the row this insert will produce.
    pub fn into_article(self, id: Uuid) -> Article {
        Article {
            id,
            author_id: self.author_id,
            title: self.title,
            slug: self.slug,
            content: self.content,
            feature_image: self.feature_image,
            category_id: self.category_id,
            status: self.status,
            views: 0,
            published_at: self.published_at,
            updated_at: self.published_at,
        }
    }
}

/// An article category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    /// Unique category identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// URL slug derived from the name.
    pub slug: String,
}

/// A category with the number of published articles filed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CategorySummary {
    /// Unique category identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Published articles in this category.
    pub post_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(status: ArticleStatus) -> Article {
        NewArticle {
            author_id: Uuid::new_v4(),
            title: "Notes".to_string(),
            slug: "notes".to_string(),
            content: String::new(),
            feature_image: None,
            category_id: None,
            status,
            published_at: Utc::now(),
        }
        .into_article(Uuid::new_v4())
    }

    #[test]
    fn test_draft_is_visible_to_author_only() {
        let draft = article(ArticleStatus::Draft);
        assert!(draft.is_visible_to(Some(draft.author_id)));
        assert!(!draft.is_visible_to(Some(Uuid::new_v4())));
        assert!(!draft.is_visible_to(None));
    }

    #[test]
    fn test_published_is_public() {
        let published = article(ArticleStatus::Published);
        assert!(published.is_visible_to(None));
        assert!(published.is_visible_to(Some(Uuid::new_v4())));
    }
}
