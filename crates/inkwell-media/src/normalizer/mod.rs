//! Image normalization pipeline.
//!
//! The synchronous functions in [`compress`], [`crop`], and [`shrink`] do
//! the pixel work; [`ImageNormalizer`] runs them on the blocking pool so
//! request handlers never decode images on an async worker thread.

pub mod compress;
pub mod crop;
pub mod shrink;

use bytes::Bytes;
use image::{DynamicImage, ImageFormat};

use inkwell_core::config::{CompressionConfig, MediaConfig};
use inkwell_core::error::{AppError, ErrorKind};
use inkwell_core::result::AppResult;
use inkwell_core::traits::storage::StorageProvider;
use inkwell_entity::profile::CropRect;

pub use compress::CompressedImage;
pub use crop::CroppedImage;

/// Async front end to the image normalization functions.
#[derive(Debug, Clone)]
pub struct ImageNormalizer {
    compression: CompressionConfig,
    profile_edge: u32,
}

impl ImageNormalizer {
    /// Create a normalizer from the media configuration.
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            compression: config.compression,
            profile_edge: config.profile_image_edge,
        }
    }

    /// Edge length of cropped and shrunk profile images.
    pub fn profile_edge(&self) -> u32 {
        self.profile_edge
    }

    /// Re-encode as JPEG within the configured byte budget.
    pub async fn compress(&self, data: Bytes, file_name: &str) -> AppResult<CompressedImage> {
        let settings = self.compression;
        let file_name = file_name.to_string();
        run_blocking("Image compression", move || {
            compress::compress(&data, &file_name, &settings)
        })
        .await
    }

    /// Crop to `rect` and resize to the profile edge.
    pub async fn crop_and_resize(&self, data: Bytes, rect: CropRect) -> AppResult<CroppedImage> {
        let edge = self.profile_edge;
        run_blocking("Image crop", move || crop::crop_and_resize(&data, rect, edge)).await
    }

    /// Shrink a stored image in place if it exceeds the profile edge.
    ///
    /// Returns `true` when the file was rewritten.
    pub async fn post_save_shrink(
        &self,
        provider: &dyn StorageProvider,
        path: &str,
    ) -> AppResult<bool> {
        let data = provider.read_bytes(path).await?;
        let edge = self.profile_edge;
        let shrunk = run_blocking("Image shrink", move || shrink::shrink_to_fit(&data, edge)).await?;

        match shrunk {
            Some(bytes) => {
                provider.write(path, Bytes::from(bytes)).await?;
                tracing::debug!(path, edge, "Shrunk oversized stored image");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

async fn run_blocking<T, F>(label: &'static str, work: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> AppResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, format!("{label} task failed"), e))?
}

/// Decode any supported raster format.
pub(crate) fn decode(data: &[u8]) -> AppResult<DynamicImage> {
    image::load_from_memory(data).map_err(|e| {
        AppError::with_source(
            ErrorKind::InvalidImage,
            "Uploaded file is not a readable image",
            e,
        )
    })
}

/// The container format of encoded bytes, if recognizable.
pub(crate) fn sniff_format(data: &[u8]) -> Option<ImageFormat> {
    image::guess_format(data).ok()
}

/// Encode RGB pixels as a baseline JPEG.
pub(crate) fn encode_jpeg(image: &image::RgbImage, quality: u8) -> AppResult<Vec<u8>> {
    let mut buffer = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality)
        .encode_image(image)
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to encode JPEG", e))?;
    Ok(buffer)
}

/// Encode an image in `format`, dropping alpha where the format cannot carry it.
pub(crate) fn encode_as(image: &DynamicImage, format: ImageFormat) -> AppResult<Vec<u8>> {
    let mut cursor = std::io::Cursor::new(Vec::new());
    let result = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()).write_to(&mut cursor, format),
        _ => image.write_to(&mut cursor, format),
    };
    result.map_err(|e| {
        AppError::with_source(
            ErrorKind::Internal,
            format!("Failed to encode image as {format:?}"),
            e,
        )
    })?;
    Ok(cursor.into_inner())
}
