//! Profile picture replacement.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use inkwell_core::config::MediaConfig;
use inkwell_core::error::AppError;
use inkwell_core::result::AppResult;
use inkwell_core::traits::storage::StorageProvider;
use inkwell_database::store::ProfileStore;
use inkwell_entity::profile::{CropRect, Profile};
use inkwell_media::ImageNormalizer;

use crate::context::RequestContext;

/// Normalizes and stores a user's new profile picture.
#[derive(Debug, Clone)]
pub struct ProfileImageService {
    /// Profile store.
    profiles: Arc<dyn ProfileStore>,
    /// Blob storage.
    storage: Arc<dyn StorageProvider>,
    /// Image normalizer.
    normalizer: ImageNormalizer,
    /// Media configuration.
    config: Arc<MediaConfig>,
}

impl ProfileImageService {
    /// Creates a new profile image service.
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        storage: Arc<dyn StorageProvider>,
        normalizer: ImageNormalizer,
        config: Arc<MediaConfig>,
    ) -> Self {
        Self {
            profiles,
            storage,
            normalizer,
            config,
        }
    }

    /// Replace the caller's profile picture.
    ///
    /// With a crop rectangle the upload is cropped and resized to the
    /// profile edge; without one it is compressed. Either way the stored
    /// file is shrunk afterwards if it still exceeds the edge. The previous
    /// picture stays on disk until the media audit removes it.
    pub async fn replace(
        &self,
        ctx: &RequestContext,
        data: Bytes,
        crop: Option<CropRect>,
    ) -> AppResult<Profile> {
        if data.is_empty() {
            return Err(AppError::validation("Uploaded file is empty"));
        }

        let (bytes, extension) = match crop {
            Some(rect) => {
                let cropped = self.normalizer.crop_and_resize(data, rect).await?;
                let extension = cropped.extension();
                (cropped.bytes, extension)
            }
            None => {
                let compressed = self.normalizer.compress(data, "profile.jpg").await?;
                (compressed.bytes, "jpg")
            }
        };

        let path = format!(
            "{}/{}_{}.{extension}",
            self.config.profile_image_dir.trim_end_matches('/'),
            ctx.user_id.simple(),
            &Uuid::new_v4().simple().to_string()[..8],
        );
        self.storage.write(&path, Bytes::from(bytes)).await?;
        let shrunk = self
            .normalizer
            .post_save_shrink(self.storage.as_ref(), &path)
            .await?;

        let profile = self.profiles.set_profile_image(ctx.user_id, &path).await?;

        info!(
            user_id = %ctx.user_id,
            path = %path,
            cropped = crop.is_some(),
            shrunk,
            "Profile image replaced"
        );

        Ok(profile)
    }
}
