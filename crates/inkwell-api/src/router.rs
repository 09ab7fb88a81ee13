//! Route definitions for the Inkwell HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.

use axum::Router;
use axum::routing::{delete, get, post, put};

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` router with every route, without middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(article_routes())
        .merge(category_routes())
        .merge(comment_routes())
        .merge(profile_routes())
        .merge(notification_routes())
        .merge(upload_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Article publishing, reading, and listings
fn article_routes() -> Router<AppState> {
    Router::new()
        .route("/home", get(handlers::article::home))
        .route(
            "/articles",
            get(handlers::article::list_articles).post(handlers::article::create_article),
        )
        .route("/articles/search", get(handlers::article::search_articles))
        .route("/articles/popular", get(handlers::article::popular_articles))
        .route("/articles/drafts", get(handlers::article::list_drafts))
        .route("/articles/{id}", get(handlers::article::get_article))
        .route(
            "/authors/{id}/articles",
            get(handlers::article::list_author_articles),
        )
}

/// Category listing and creation
fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(handlers::category::list_categories).post(handlers::category::create_category),
        )
        .route(
            "/categories/{slug}/articles",
            get(handlers::category::list_category_articles),
        )
}

/// Comment threads, deletion, and moderation
fn comment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/articles/{id}/comments",
            get(handlers::comment::list_comments).post(handlers::comment::create_comment),
        )
        .route("/comments/{id}", delete(handlers::comment::delete_comment))
        .route(
            "/comments/{id}/active",
            put(handlers::comment::set_comment_active),
        )
}

/// Profile picture
fn profile_routes() -> Router<AppState> {
    Router::new().route(
        "/profile/image",
        put(handlers::profile::update_profile_image),
    )
}

/// Notification feed and bulk operations
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications)
                .delete(handlers::notification::clear_notifications),
        )
        .route(
            "/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/read-all",
            put(handlers::notification::mark_all_read),
        )
}

/// Rich-text editor upload callback
fn upload_routes() -> Router<AppState> {
    Router::new().route("/uploads/editor", post(handlers::upload::editor_upload))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
