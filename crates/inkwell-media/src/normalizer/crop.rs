//! Crop-then-resize for profile pictures.

use image::imageops::FilterType;
use image::{GenericImageView, ImageFormat};

use inkwell_core::error::AppError;
use inkwell_core::result::AppResult;
use inkwell_entity::profile::CropRect;

use super::{decode, encode_as, encode_jpeg, sniff_format};

/// JPEG quality for cropped output.
const CROP_JPEG_QUALITY: u8 = 90;

/// Output of [`crop_and_resize`].
#[derive(Debug, Clone)]
pub struct CroppedImage {
    /// Encoded bytes.
    pub bytes: Vec<u8>,
    /// `Png` when the source was PNG, otherwise `Jpeg`.
    pub format: ImageFormat,
}

impl CroppedImage {
    /// File extension matching the output format.
    pub fn extension(&self) -> &'static str {
        match self.format {
            ImageFormat::Png => "png",
            _ => "jpg",
        }
    }
}

/// Crop `rect` out of the source and resize the result to `edge`×`edge`.
///
/// Coordinates are rounded to whole pixels and clipped to the source bounds.
pub fn crop_and_resize(data: &[u8], rect: CropRect, edge: u32) -> AppResult<CroppedImage> {
    let source = decode(data)?;
    let (width, height) = source.dimensions();

    let x = to_pixel(rect.x).min(width);
    let y = to_pixel(rect.y).min(height);
    let w = to_pixel(rect.width).min(width - x);
    let h = to_pixel(rect.height).min(height - y);
    if w == 0 || h == 0 {
        return Err(AppError::validation(format!(
            "Crop rectangle {rect:?} does not overlap the {width}x{height} image"
        )));
    }

    let resized = source
        .crop_imm(x, y, w, h)
        .resize_exact(edge, edge, FilterType::Lanczos3);

    if sniff_format(data) == Some(ImageFormat::Png) {
        Ok(CroppedImage {
            bytes: encode_as(&resized, ImageFormat::Png)?,
            format: ImageFormat::Png,
        })
    } else {
        Ok(CroppedImage {
            bytes: encode_jpeg(&resized.to_rgb8(), CROP_JPEG_QUALITY)?,
            format: ImageFormat::Jpeg,
        })
    }
}

fn to_pixel(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round().min(u32::MAX as f64) as u32
    } else {
        0
    }
}
