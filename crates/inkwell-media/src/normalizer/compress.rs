//! Lossy re-encoding within a byte budget.

use std::path::Path;

use serde::Serialize;

use inkwell_core::config::CompressionConfig;
use inkwell_core::result::AppResult;

use super::{decode, encode_jpeg};

/// A JPEG produced by [`compress`].
#[derive(Debug, Clone, Serialize)]
pub struct CompressedImage {
    /// Encoded JPEG bytes.
    #[serde(skip)]
    pub bytes: Vec<u8>,
    /// Input file stem with a `.jpg` extension.
    pub file_name: String,
    /// Quality level of the returned encoding.
    pub quality: u8,
    /// Whether the encoding fits the byte budget.
    pub within_budget: bool,
}

/// Re-encode an image as JPEG, stepping quality down until it fits the budget.
///
/// Alpha is discarded before encoding. Quality starts at
/// `start_quality` and drops by `quality_step` per attempt, never below
/// `min_quality`; if even the floor misses the budget that encoding is
/// returned anyway.
pub fn compress(
    data: &[u8],
    file_name: &str,
    settings: &CompressionConfig,
) -> AppResult<CompressedImage> {
    let rgb = decode(data)?.to_rgb8();

    let mut quality = settings.start_quality.clamp(1, 100);
    let floor = settings.min_quality.clamp(1, quality);
    let step = settings.quality_step.max(1);

    loop {
        let bytes = encode_jpeg(&rgb, quality)?;
        let size = bytes.len() as u64;
        let within_budget = size <= settings.target_bytes;
        tracing::debug!(quality, size, target = settings.target_bytes, "JPEG attempt");

        if within_budget || quality <= floor {
            return Ok(CompressedImage {
                bytes,
                file_name: jpeg_file_name(file_name),
                quality,
                within_budget,
            });
        }
        quality = quality.saturating_sub(step).max(floor);
    }
}

/// Replace whatever extension `file_name` has with `.jpg`.
pub fn jpeg_file_name(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("image");
    format!("{stem}.jpg")
}
