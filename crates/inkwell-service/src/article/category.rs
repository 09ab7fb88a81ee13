//! Article categories.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use inkwell_core::error::AppError;
use inkwell_core::result::AppResult;
use inkwell_core::types::pagination::{PageRequest, PageResponse};
use inkwell_database::store::ArticleStore;
use inkwell_entity::article::{Article, Category, CategorySummary, slugify};

use super::service::ArticleService;
use crate::context::RequestContext;

/// A category and one page of its published articles.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryPage {
    /// The category.
    pub category: Category,
    /// Its articles, newest first.
    pub articles: PageResponse<Article>,
}

/// Creates and lists categories.
#[derive(Debug, Clone)]
pub struct CategoryService {
    /// Article store, which also holds categories.
    articles: Arc<dyn ArticleStore>,
}

impl CategoryService {
    /// Creates a new category service.
    pub fn new(articles: Arc<dyn ArticleStore>) -> Self {
        Self { articles }
    }

    /// Every category with its published article count, by name.
    pub async fn list(&self) -> AppResult<Vec<CategorySummary>> {
        self.articles.list_categories().await
    }

    /// Add a category. Staff only.
    ///
    /// The slug is derived from the name; a name or slug already in use is
    /// a conflict.
    pub async fn create(&self, ctx: &RequestContext, name: &str) -> AppResult<Category> {
        if !ctx.is_staff() {
            return Err(AppError::authorization("Only staff can create categories"));
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Category name cannot be empty"));
        }
        if !name.chars().any(char::is_alphanumeric) {
            return Err(AppError::validation(format!(
                "Category name '{name}' has no letters or digits"
            )));
        }
        let slug = slugify(name);

        let category = self.articles.create_category(name, &slug).await?;

        info!(
            category_id = %category.id,
            slug = %category.slug,
            user_id = %ctx.user_id,
            "Category created"
        );

        Ok(category)
    }

    /// A category looked up by slug, with one page of its articles.
    pub async fn articles(
        &self,
        articles: &ArticleService,
        slug: &str,
        page: PageRequest,
    ) -> AppResult<CategoryPage> {
        let category = self
            .articles
            .find_category_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Category '{slug}' not found")))?;

        let articles = articles.list_in_category(category.id, page).await?;
        Ok(CategoryPage { category, articles })
    }
}
