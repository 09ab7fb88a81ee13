//! Comment handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use inkwell_core::error::AppError;
use inkwell_core::types::pagination::PageResponse;
use inkwell_entity::comment::{Comment, CommentDeletion, ThreadedComment};
use inkwell_service::comment::CreateCommentRequest;

use crate::dto::request::{CreateCommentBody, SetActiveBody, validate};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, MaybeAuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/articles/{id}/comments?page=&per_page=
pub async fn list_comments(
    State(state): State<AppState>,
    auth: MaybeAuthUser,
    Path(article_id): Path<Uuid>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<ThreadedComment>>>, ApiError> {
    let per_page = state.comment_service.per_page();
    let page = state
        .comment_service
        .flatten(
            auth.context(),
            article_id,
            params.into_page_request(per_page),
        )
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// POST /api/articles/{id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: MaybeAuthUser,
    Path(article_id): Path<Uuid>,
    Json(body): Json<CreateCommentBody>,
) -> Result<(StatusCode, Json<ApiResponse<Comment>>), ApiError> {
    let ctx = auth
        .context()
        .ok_or_else(|| AppError::authentication("Log in to post a comment"))?;
    validate(&body)?;
    let comment = state
        .comment_service
        .create(
            Some(ctx),
            article_id,
            CreateCommentRequest {
                content: body.content,
                parent_id: body.parent_id,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(comment))))
}

/// DELETE /api/comments/{id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(comment_id): Path<Uuid>,
) -> Result<Json<ApiResponse<CommentDeletion>>, ApiError> {
    let outcome = state.comment_service.delete(&auth, comment_id).await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

/// PUT /api/comments/{id}/active
pub async fn set_comment_active(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(comment_id): Path<Uuid>,
    Json(body): Json<SetActiveBody>,
) -> Result<Json<ApiResponse<Comment>>, ApiError> {
    let comment = state
        .comment_service
        .set_active(&auth, comment_id, body.active)
        .await?;
    Ok(Json(ApiResponse::ok(comment)))
}
