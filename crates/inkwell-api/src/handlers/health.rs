//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let storage_ok = state.storage.health_check().await.unwrap_or(false);
    let storage = format!(
        "{}:{}",
        state.storage.provider_type(),
        if storage_ok { "available" } else { "unavailable" }
    );

    Json(ApiResponse::ok(HealthResponse {
        status: if storage_ok { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage,
    }))
}
