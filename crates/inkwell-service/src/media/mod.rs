//! Media use cases: editor uploads, profile pictures, and the reference audit.

pub mod audit;
pub mod profile;
pub mod upload;

pub use audit::{AuditReport, MediaAuditService, OrphanScan};
pub use inkwell_media::audit::PurgeReport;
pub use profile::ProfileImageService;
pub use upload::{EditorUpload, UploadService};

use std::path::Path;

/// Lowercase extension of `file_name` including the leading dot.
pub(crate) fn dotted_extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
}
