//! Category handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use inkwell_entity::article::{Category, CategorySummary};
use inkwell_service::article::CategoryPage;

use crate::dto::request::{CreateCategoryBody, validate};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CategorySummary>>>, ApiError> {
    let categories = state.category_service.list().await?;
    Ok(Json(ApiResponse::ok(categories)))
}

/// POST /api/categories
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateCategoryBody>,
) -> Result<(StatusCode, Json<ApiResponse<Category>>), ApiError> {
    validate(&body)?;
    let category = state.category_service.create(&auth, &body.name).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(category))))
}

/// GET /api/categories/{slug}/articles?page=
pub async fn list_category_articles(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<CategoryPage>>, ApiError> {
    let per_page = state.article_service.per_page();
    let page = state
        .category_service
        .articles(
            &state.article_service,
            &slug,
            params.into_page_request(per_page),
        )
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}
