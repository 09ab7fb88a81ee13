//! Queries collecting every stored media reference.

use async_trait::async_trait;
use sqlx::PgPool;

use inkwell_core::error::{AppError, ErrorKind};
use inkwell_core::result::AppResult;

use crate::store::MediaReferenceStore;

/// Read-only repository over columns that point into the media root.
#[derive(Debug, Clone)]
pub struct MediaReferenceRepository {
    pool: PgPool,
}

impl MediaReferenceRepository {
    /// Create a new media reference repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MediaReferenceStore for MediaReferenceRepository {
    async fn profile_image_paths(&self) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>("SELECT image FROM profiles WHERE image <> ''")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to collect profile images", e)
            })
    }

    async fn article_image_paths(&self) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT feature_image FROM articles \
             WHERE feature_image IS NOT NULL AND feature_image <> ''",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to collect article images", e)
        })
    }

    async fn article_bodies(&self) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>("SELECT content FROM articles")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to collect article bodies", e)
            })
    }
}
