//! Recursive walk of the media root.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::warn;

use inkwell_core::error::{AppError, ErrorKind};
use inkwell_core::result::AppResult;

/// Files and directories found under the media root.
#[derive(Debug, Clone, Default)]
pub struct MediaInventory {
    /// Root-relative file paths.
    pub files: BTreeSet<String>,
    /// Absolute paths of every directory below the root (root excluded).
    pub directories: Vec<PathBuf>,
}

/// Walk `root` and collect every file except those named `placeholder_name`.
///
/// A missing root yields an empty inventory.
pub async fn scan_media_root(root: &Path, placeholder_name: &str) -> AppResult<MediaInventory> {
    let mut inventory = MediaInventory::default();
    if !fs::try_exists(root).await.unwrap_or(false) {
        warn!(root = %root.display(), "Media root does not exist");
        return Ok(inventory);
    }

    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let mut entries = fs::read_dir(&dir).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to list directory: {}", dir.display()),
                e,
            )
        })?;

        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to read directory entry", e)
        })? {
            let path = entry.path();
            let file_type = entry.file_type().await.map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to read entry type", e)
            })?;

            if file_type.is_dir() {
                inventory.directories.push(path.clone());
                pending.push(path);
            } else if file_type.is_file() {
                if entry.file_name().to_string_lossy() == placeholder_name {
                    continue;
                }
                if let Some(relative) = relative_path(root, &path) {
                    inventory.files.insert(relative);
                }
            }
        }
    }

    Ok(inventory)
}

/// `/`-joined path of `path` below `root`.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
