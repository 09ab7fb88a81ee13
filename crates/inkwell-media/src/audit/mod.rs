//! Filesystem side of the media reference audit.
//!
//! Paths are compared as `/`-separated strings relative to the media
//! root, so database values like `profile_pics/a.jpg` match files found
//! on disk regardless of platform separators.

pub mod purge;
pub mod references;
pub mod scan;

use std::collections::BTreeSet;

pub use purge::{PurgeReport, purge};
pub use references::EmbeddedImageMatcher;
pub use scan::{MediaInventory, scan_media_root};

/// Files on disk that nothing references, in sorted order.
pub fn find_orphans(on_disk: &BTreeSet<String>, referenced: &BTreeSet<String>) -> BTreeSet<String> {
    on_disk.difference(referenced).cloned().collect()
}

/// Normalize a stored or embedded reference to a root-relative path.
pub fn normalize_reference(path: &str) -> String {
    path.trim()
        .trim_start_matches("./")
        .trim_start_matches('/')
        .replace('\\', "/")
}
