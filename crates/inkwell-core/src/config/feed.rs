//! Page sizes for reader-facing lists.

use serde::{Deserialize, Serialize};

/// Pagination defaults for comment threads, notifications, and article lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Flattened comment entries per page.
    #[serde(default = "default_comments_per_page")]
    pub comments_per_page: u64,
    /// Notifications per feed page.
    #[serde(default = "default_notifications_per_page")]
    pub notifications_per_page: u64,
    /// Published articles per listing page.
    #[serde(default = "default_articles_per_page")]
    pub articles_per_page: u64,
    /// Drafts per page on the author's draft list.
    #[serde(default = "default_drafts_per_page")]
    pub drafts_per_page: u64,
    /// Length of the most-read list.
    #[serde(default = "default_popular_posts")]
    pub popular_posts: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            comments_per_page: default_comments_per_page(),
            notifications_per_page: default_notifications_per_page(),
            articles_per_page: default_articles_per_page(),
            drafts_per_page: default_drafts_per_page(),
            popular_posts: default_popular_posts(),
        }
    }
}

fn default_comments_per_page() -> u64 {
    5
}

fn default_notifications_per_page() -> u64 {
    10
}

fn default_articles_per_page() -> u64 {
    6
}

fn default_drafts_per_page() -> u64 {
    10
}

fn default_popular_posts() -> u64 {
    5
}
