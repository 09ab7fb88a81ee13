//! Downscale oversized images while keeping their aspect ratio.

use image::{GenericImageView, ImageFormat};

use inkwell_core::result::AppResult;

use super::{decode, encode_as, sniff_format};

/// Fit the image inside `edge`×`edge`, re-encoded in its original format.
///
/// Returns `None` when the image already fits.
pub fn shrink_to_fit(data: &[u8], edge: u32) -> AppResult<Option<Vec<u8>>> {
    let image = decode(data)?;
    let (width, height) = image.dimensions();
    if width <= edge && height <= edge {
        return Ok(None);
    }

    let format = sniff_format(data).unwrap_or(ImageFormat::Jpeg);
    let thumbnail = image.thumbnail(edge, edge);
    encode_as(&thumbnail, format).map(Some)
}
