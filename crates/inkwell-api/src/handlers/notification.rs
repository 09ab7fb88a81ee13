//! Notification handlers.

use axum::Json;
use axum::extract::{Query, State};
use serde_json::json;

use inkwell_core::types::pagination::PageResponse;
use inkwell_entity::notification::Notification;

use crate::dto::response::{ApiResponse, CountResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/notifications
///
/// Viewing the feed marks every notification of the caller read.
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Notification>>>, ApiError> {
    let per_page = state.notification_service.per_page();
    let page = state
        .notification_service
        .feed_page(&auth, params.into_page_request(per_page))
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let count = state.notification_service.unread_count(&auth).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}

/// PUT /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let count = state.notification_service.mark_all_read(&auth).await?;
    Ok(Json(json!({ "success": true, "data": { "marked": count } })))
}

/// DELETE /api/notifications
pub async fn clear_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let count = state.notification_service.clear_all(&auth).await?;
    Ok(Json(json!({ "success": true, "data": { "removed": count } })))
}
