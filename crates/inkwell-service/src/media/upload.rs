//! Rich-text editor image upload.

use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use inkwell_core::config::MediaConfig;
use inkwell_core::error::AppError;
use inkwell_core::result::AppResult;
use inkwell_core::traits::storage::StorageProvider;
use inkwell_media::ImageNormalizer;

use super::dotted_extension;
use crate::context::RequestContext;

/// A stored editor image.
#[derive(Debug, Clone, Serialize)]
pub struct EditorUpload {
    /// Public URL to embed in the article body.
    pub url: String,
    /// Path relative to the media root.
    pub path: String,
}

/// Accepts images pasted or dropped into the article editor.
#[derive(Debug, Clone)]
pub struct UploadService {
    /// Blob storage.
    storage: Arc<dyn StorageProvider>,
    /// Image normalizer.
    normalizer: ImageNormalizer,
    /// Media configuration.
    config: Arc<MediaConfig>,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        storage: Arc<dyn StorageProvider>,
        normalizer: ImageNormalizer,
        config: Arc<MediaConfig>,
    ) -> Self {
        Self {
            storage,
            normalizer,
            config,
        }
    }

    /// Validate, compress, and store an editor image under a random name.
    ///
    /// The client file name only decides whether the extension is
    /// allowed; it never reaches the stored path.
    pub async fn upload_editor_image(
        &self,
        ctx: &RequestContext,
        file_name: &str,
        data: Bytes,
    ) -> AppResult<EditorUpload> {
        let extension = dotted_extension(file_name).unwrap_or_default();
        if !self.config.allowed_extensions.contains(&extension) {
            return Err(AppError::validation(format!(
                "Unsupported file type '{extension}'. Allowed: {}",
                self.config.allowed_extensions.join(", ")
            )));
        }
        if data.is_empty() {
            return Err(AppError::validation("Uploaded file is empty"));
        }

        let compressed = self.normalizer.compress(data, file_name).await?;

        let path = format!(
            "{}/{}.jpg",
            self.config.editor_upload_dir.trim_end_matches('/'),
            Uuid::new_v4().simple()
        );
        self.storage
            .write(&path, Bytes::from(compressed.bytes))
            .await?;

        info!(
            user_id = %ctx.user_id,
            path = %path,
            quality = compressed.quality,
            within_budget = compressed.within_budget,
            "Editor image stored"
        );

        Ok(EditorUpload {
            url: self.config.url_for(&path),
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use inkwell_core::error::ErrorKind;
    use inkwell_entity::user::UserRole;
    use inkwell_media::LocalStorageProvider;

    use super::*;

    fn png_bytes() -> Bytes {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 30, Rgb([200, 10, 10])));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        Bytes::from(out.into_inner())
    }

    async fn service(root: &std::path::Path) -> UploadService {
        let config = Arc::new(MediaConfig::default());
        UploadService::new(
            Arc::new(LocalStorageProvider::new(root).await.unwrap()),
            ImageNormalizer::new(&config),
            config,
        )
    }

    fn ctx() -> RequestContext {
        RequestContext::new(Uuid::new_v4(), UserRole::Member)
    }

    #[tokio::test]
    async fn test_stores_random_jpeg_name() {
        let dir = tempfile::tempdir().unwrap();
        let upload = service(dir.path())
            .await
            .upload_editor_image(&ctx(), "My Holiday.PNG", png_bytes())
            .await
            .unwrap();

        assert!(upload.path.starts_with("posts/"));
        assert!(upload.path.ends_with(".jpg"));
        assert!(!upload.path.contains("Holiday"));
        assert_eq!(upload.url, format!("/media/{}", upload.path));

        let stored = std::fs::read(dir.path().join(&upload.path)).unwrap();
        assert_eq!(image::guess_format(&stored).unwrap(), ImageFormat::Jpeg);
    }

    #[tokio::test]
    async fn test_rejects_disallowed_extension() {
        let dir = tempfile::tempdir().unwrap();
        let err = service(dir.path())
            .await
            .upload_editor_image(&ctx(), "payload.svg", png_bytes())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains(".svg"));
    }

    #[tokio::test]
    async fn test_rejects_undecodable_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let err = service(dir.path())
            .await
            .upload_editor_image(&ctx(), "broken.jpg", Bytes::from_static(b"not an image"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidImage);
        assert!(!dir.path().join("posts").exists());
    }
}
