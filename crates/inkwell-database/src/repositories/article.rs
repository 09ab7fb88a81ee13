//! Article and category repository implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use inkwell_core::error::{AppError, ErrorKind};
use inkwell_core::result::AppResult;
use inkwell_core::types::pagination::PageRequest;
use inkwell_entity::article::{
    Article, ArticleFilter, ArticleOrder, Category, CategorySummary, NewArticle,
};

use crate::store::ArticleStore;

/// Shared `WHERE` clause for [`ArticleFilter`]; binds `$1` to `$4`.
const FILTER_CLAUSE: &str = "($1::article_status IS NULL OR status = $1) \
     AND ($2::uuid IS NULL OR author_id = $2) \
     AND ($3::uuid IS NULL OR category_id = $3) \
     AND ($4::text IS NULL OR title ILIKE $4 OR content ILIKE $4)";

fn order_clause(order: ArticleOrder) -> &'static str {
    match order {
        ArticleOrder::Newest => "published_at DESC, id DESC",
        ArticleOrder::MostViewed => "views DESC, published_at DESC, id DESC",
        ArticleOrder::RecentlyUpdated => "updated_at DESC, id DESC",
    }
}

/// `%text%` with `LIKE` wildcards in `text` escaped.
fn like_pattern(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Repository for articles and categories.
#[derive(Debug, Clone)]
pub struct ArticleRepository {
    pool: PgPool,
}

impl ArticleRepository {
    /// Create a new article repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleStore for ArticleRepository {
    async fn find_article(&self, id: Uuid) -> AppResult<Option<Article>> {
        sqlx::query_as::<_, Article>("SELECT * FROM articles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find article", e))
    }

    async fn find_category(&self, id: Uuid) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find category", e)
            })
    }

    async fn slug_taken(&self, slug: &str, day: NaiveDate) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM articles \
             WHERE slug = $1 AND (published_at AT TIME ZONE 'UTC')::date = $2)",
        )
        .bind(slug)
        .bind(day)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check slug", e))
    }

    async fn insert_article(&self, article: NewArticle) -> AppResult<Article> {
        sqlx::query_as::<_, Article>(
            "INSERT INTO articles \
             (id, author_id, title, slug, content, feature_image, category_id, status, views, published_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 0, $9, $9) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(article.author_id)
        .bind(&article.title)
        .bind(&article.slug)
        .bind(&article.content)
        .bind(&article.feature_image)
        .bind(article.category_id)
        .bind(article.status)
        .bind(article.published_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create article", e))
    }

    async fn count_articles(&self, filter: &ArticleFilter) -> AppResult<u64> {
        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM articles WHERE {FILTER_CLAUSE}"))
                .bind(filter.status)
                .bind(filter.author_id)
                .bind(filter.category_id)
                .bind(filter.search.as_deref().map(like_pattern))
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count articles", e)
                })?;
        Ok(total as u64)
    }

    async fn list_articles(
        &self,
        filter: &ArticleFilter,
        order: ArticleOrder,
        page: &PageRequest,
    ) -> AppResult<Vec<Article>> {
        let sql = format!(
            "SELECT * FROM articles WHERE {FILTER_CLAUSE} ORDER BY {} LIMIT $5 OFFSET $6",
            order_clause(order)
        );
        sqlx::query_as::<_, Article>(&sql)
            .bind(filter.status)
            .bind(filter.author_id)
            .bind(filter.category_id)
            .bind(filter.search.as_deref().map(like_pattern))
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list articles", e))
    }

    async fn increment_views(&self, id: Uuid) -> AppResult<Option<Article>> {
        sqlx::query_as::<_, Article>(
            "UPDATE articles SET views = views + 1 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count view", e))
    }

    async fn find_category_by_slug(&self, slug: &str) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find category", e)
            })
    }

    async fn create_category(&self, name: &str, slug: &str) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (id, name, slug) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(slug)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("categories_name_key") =>
            {
                AppError::conflict(format!("Category '{name}' already exists"))
            }
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("categories_slug_key") =>
            {
                AppError::conflict(format!("Category slug '{slug}' is taken"))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create category", e),
        })
    }

    async fn list_categories(&self) -> AppResult<Vec<CategorySummary>> {
        sqlx::query_as::<_, CategorySummary>(
            "SELECT c.id, c.name, c.slug, COUNT(a.id) AS post_count \
             FROM categories c \
             LEFT JOIN articles a ON a.category_id = c.id AND a.status = 'published' \
             GROUP BY c.id, c.name, c.slug \
             ORDER BY c.name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list categories", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("rust"), "%rust%");
        assert_eq!(like_pattern("100%_done"), "%100\\%\\_done%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_order_clause_is_deterministic() {
        for order in [
            ArticleOrder::Newest,
            ArticleOrder::MostViewed,
            ArticleOrder::RecentlyUpdated,
        ] {
            assert!(order_clause(order).ends_with("id DESC"));
        }
    }
}
