//! Media storage and image normalization configuration.

use serde::{Deserialize, Serialize};

/// Where user-uploaded media lives and how it is normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Filesystem directory holding every uploaded blob.
    #[serde(default = "default_root")]
    pub root: String,
    /// Public URL prefix the media root is served under.
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,
    /// Placeholder profile image path, relative to the media root.
    #[serde(default = "default_profile_image")]
    pub default_profile_image: String,
    /// Directory for rich-text editor uploads.
    #[serde(default = "default_editor_dir")]
    pub editor_upload_dir: String,
    /// Directory for article feature images.
    #[serde(default = "default_post_image_dir")]
    pub post_image_dir: String,
    /// Directory for profile pictures.
    #[serde(default = "default_profile_dir")]
    pub profile_image_dir: String,
    /// Extensions accepted by the editor upload callback (lowercase, with dot).
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
    /// Edge length in pixels of cropped and shrunk profile images.
    #[serde(default = "default_profile_edge")]
    pub profile_image_edge: u32,
    /// Lossy re-encoding settings.
    #[serde(default)]
    pub compression: CompressionConfig,
}

/// Quality-stepping parameters for lossy compression.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CompressionConfig {
    /// Byte budget for an encoded image.
    #[serde(default = "default_target_bytes")]
    pub target_bytes: u64,
    /// First quality level tried.
    #[serde(default = "default_start_quality")]
    pub start_quality: u8,
    /// Lowest quality level tried.
    #[serde(default = "default_min_quality")]
    pub min_quality: u8,
    /// Quality decrement between attempts.
    #[serde(default = "default_quality_step")]
    pub quality_step: u8,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            url_prefix: default_url_prefix(),
            default_profile_image: default_profile_image(),
            editor_upload_dir: default_editor_dir(),
            post_image_dir: default_post_image_dir(),
            profile_image_dir: default_profile_dir(),
            allowed_extensions: default_allowed_extensions(),
            profile_image_edge: default_profile_edge(),
            compression: CompressionConfig::default(),
        }
    }
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            target_bytes: default_target_bytes(),
            start_quality: default_start_quality(),
            min_quality: default_min_quality(),
            quality_step: default_quality_step(),
        }
    }
}

impl MediaConfig {
    /// Public URL for a path relative to the media root.
    pub fn url_for(&self, relative_path: &str) -> String {
        format!(
            "{}/{}",
            self.url_prefix.trim_end_matches('/'),
            relative_path.trim_start_matches('/')
        )
    }
}

fn default_root() -> String {
    "./media".to_string()
}

fn default_url_prefix() -> String {
    "/media/".to_string()
}

fn default_profile_image() -> String {
    "profile_pics/default.jpg".to_string()
}

fn default_editor_dir() -> String {
    "posts".to_string()
}

fn default_post_image_dir() -> String {
    "post_images".to_string()
}

fn default_profile_dir() -> String {
    "profile_pics".to_string()
}

fn default_allowed_extensions() -> Vec<String> {
    [".jpg", ".jpeg", ".png", ".gif", ".webp", ".bmp"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_profile_edge() -> u32 {
    300
}

fn default_target_bytes() -> u64 {
    1024 * 1024 // 1 MB
}

fn default_start_quality() -> u8 {
    90
}

fn default_min_quality() -> u8 {
    20
}

fn default_quality_step() -> u8 {
    5
}
