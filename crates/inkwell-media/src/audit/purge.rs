//! Deletion of orphaned media files.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::fs;
use tracing::{info, warn};

use super::scan::relative_path;

/// What a purge did (or would do, on a dry run).
#[derive(Debug, Clone, Default, Serialize)]
pub struct PurgeReport {
    /// Whether anything was actually deleted.
    pub dry_run: bool,
    /// Root-relative orphan paths considered.
    pub candidates: Vec<String>,
    /// Files removed.
    pub deleted: Vec<String>,
    /// Files that could not be removed, with the error message.
    pub failed: Vec<(String, String)>,
    /// Root-relative directories removed because they became empty.
    pub removed_directories: Vec<String>,
}

/// Delete each orphan under `root`, then prune those of `directories`
/// left empty.
///
/// `directories` is the scan inventory's directory list. Individual
/// failures are logged and recorded; they never abort the batch. The root
/// directory itself is never removed.
pub async fn purge(
    root: &Path,
    orphans: &BTreeSet<String>,
    directories: &[PathBuf],
    dry_run: bool,
) -> PurgeReport {
    let mut report = PurgeReport {
        dry_run,
        candidates: orphans.iter().cloned().collect(),
        ..PurgeReport::default()
    };

    if dry_run {
        for path in orphans {
            info!(path = %path, "Would delete orphaned media file");
        }
        return report;
    }

    for path in orphans {
        match fs::remove_file(root.join(path)).await {
            Ok(()) => {
                info!(path = %path, "Deleted orphaned media file");
                report.deleted.push(path.clone());
            }
            Err(e) => {
                warn!(path = %path, error = %e, "Failed to delete orphaned media file");
                report.failed.push((path.clone(), e.to_string()));
            }
        }
    }

    report.removed_directories = remove_empty_directories(root, directories).await;
    report
}

/// Remove the empty ones among `directories`, deepest first.
async fn remove_empty_directories(root: &Path, directories: &[PathBuf]) -> Vec<String> {
    let mut directories: Vec<&PathBuf> = directories
        .iter()
        .filter(|d| d.as_path() != root && d.starts_with(root))
        .collect();
    directories.sort_by_key(|d| std::cmp::Reverse(d.components().count()));

    let mut removed = Vec::new();
    for dir in directories {
        if !is_empty_dir(dir).await {
            continue;
        }
        match fs::remove_dir(dir).await {
            Ok(()) => {
                info!(dir = %dir.display(), "Removed empty media directory");
                if let Some(relative) = relative_path(root, dir) {
                    removed.push(relative);
                }
            }
            Err(e) => warn!(dir = %dir.display(), error = %e, "Failed to remove directory"),
        }
    }
    removed
}

async fn is_empty_dir(dir: &Path) -> bool {
    match fs::read_dir(dir).await {
        Ok(mut entries) => matches!(entries.next_entry().await, Ok(None)),
        Err(_) => false,
    }
}
