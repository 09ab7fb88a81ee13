//! Article handlers.

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use inkwell_core::error::AppError;
use inkwell_core::types::pagination::PageResponse;
use inkwell_entity::article::{Article, ArticleStatus};
use inkwell_service::article::{FeatureImage, HomePage, PublishArticleRequest};

use super::{field_bytes, field_text, next_field};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, MaybeAuthUser, PaginationParams, SearchParams};
use crate::state::AppState;

type ArticlePage = Json<ApiResponse<PageResponse<Article>>>;

/// GET /api/home
pub async fn home(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<HomePage>>, ApiError> {
    let home = state.article_service.home().await?;
    Ok(Json(ApiResponse::ok(home)))
}

/// GET /api/articles/{id}
///
/// Drafts answer 404 to everyone but their author.
pub async fn get_article(
    State(state): State<AppState>,
    auth: MaybeAuthUser,
    Path(article_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Article>>, ApiError> {
    let article = state
        .article_service
        .get(auth.context(), article_id)
        .await?;
    Ok(Json(ApiResponse::ok(article)))
}

/// GET /api/articles?page=&per_page=
pub async fn list_articles(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<ArticlePage, ApiError> {
    let per_page = state.article_service.per_page();
    let page = state
        .article_service
        .list_published(params.into_page_request(per_page))
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/articles/search?q=&page=
pub async fn search_articles(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<ArticlePage, ApiError> {
    let per_page = state.article_service.per_page();
    let page = state
        .article_service
        .search(&params.q, params.pagination.into_page_request(per_page))
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/articles/popular
pub async fn popular_articles(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Article>>>, ApiError> {
    let articles = state.article_service.popular().await?;
    Ok(Json(ApiResponse::ok(articles)))
}

/// GET /api/articles/drafts
pub async fn list_drafts(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<ArticlePage, ApiError> {
    let per_page = state.article_service.drafts_per_page();
    let page = state
        .article_service
        .list_drafts(&auth, params.into_page_request(per_page))
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/authors/{id}/articles
pub async fn list_author_articles(
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
    Query(params): Query<PaginationParams>,
) -> Result<ArticlePage, ApiError> {
    let per_page = state.article_service.per_page();
    let page = state
        .article_service
        .list_by_author(author_id, params.into_page_request(per_page))
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// POST /api/articles
///
/// Multipart fields: `title`, `content`, optional `category_id`,
/// optional `status` (`draft` | `published`), optional `image` file.
pub async fn create_article(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<Article>>), ApiError> {
    let mut title = None;
    let mut content = None;
    let mut category_id = None;
    let mut status = ArticleStatus::Published;
    let mut image = None;

    while let Some(field) = next_field(&mut multipart).await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "title" => title = Some(field_text(field).await?),
            "content" => content = Some(field_text(field).await?),
            "category_id" => {
                let text = field_text(field).await?;
                if !text.trim().is_empty() {
                    category_id = Some(
                        Uuid::parse_str(text.trim())
                            .map_err(|_| AppError::validation("Invalid category_id"))?,
                    );
                }
            }
            "status" => status = field_text(field).await?.trim().parse()?,
            "image" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field_bytes(field).await?;
                if !data.is_empty() {
                    image = Some(FeatureImage { file_name, data });
                }
            }
            _ => {}
        }
    }

    let req = PublishArticleRequest {
        title: title.ok_or_else(|| AppError::validation("title is required"))?,
        content: content.ok_or_else(|| AppError::validation("content is required"))?,
        category_id,
        status,
    };

    let article = state.article_service.publish(&auth, req, image).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(article))))
}
