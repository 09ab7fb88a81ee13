//! Media reference audit: database references against files on disk.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use inkwell_core::config::MediaConfig;
use inkwell_core::result::AppResult;
use inkwell_database::store::MediaReferenceStore;
use inkwell_media::audit::{
    EmbeddedImageMatcher, PurgeReport, find_orphans, normalize_reference, purge, scan_media_root,
};

/// Result of an audit run.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    /// Distinct media paths referenced from the database.
    pub referenced: usize,
    /// Files found under the media root.
    pub on_disk: usize,
    /// Orphaned files, sorted.
    pub orphans: Vec<String>,
    /// What the purge did.
    pub purge: PurgeReport,
}

/// The sets compared by an audit.
#[derive(Debug, Clone, Default)]
pub struct OrphanScan {
    /// Paths referenced from the database.
    pub referenced: BTreeSet<String>,
    /// Files under the media root, placeholder excluded.
    pub on_disk: BTreeSet<String>,
    /// Files on disk that nothing references.
    pub orphans: BTreeSet<String>,
    /// Directories below the media root, as scanned.
    pub directories: Vec<PathBuf>,
}

/// Finds and optionally deletes media files that nothing references.
///
/// Not safe to run while the site takes uploads: a file saved after the
/// reference scan looks orphaned.
#[derive(Debug, Clone)]
pub struct MediaAuditService {
    /// Media reference store.
    references: Arc<dyn MediaReferenceStore>,
    /// Media configuration.
    config: Arc<MediaConfig>,
    /// Embedded image extractor.
    matcher: EmbeddedImageMatcher,
}

impl MediaAuditService {
    /// Creates a new audit service.
    pub fn new(references: Arc<dyn MediaReferenceStore>, config: Arc<MediaConfig>) -> Self {
        let matcher = EmbeddedImageMatcher::new(&config.url_prefix);
        Self {
            references,
            config,
            matcher,
        }
    }

    /// Filesystem root being audited.
    pub fn media_root(&self) -> PathBuf {
        PathBuf::from(&self.config.root)
    }

    /// Every root-relative path the database points at.
    ///
    /// Covers profile pictures other than the placeholder, article feature
    /// images, and local images embedded in article bodies.
    pub async fn referenced_paths(&self) -> AppResult<BTreeSet<String>> {
        let placeholder = normalize_reference(&self.config.default_profile_image);
        let mut referenced = BTreeSet::new();

        for path in self.references.profile_image_paths().await? {
            let path = normalize_reference(&path);
            if path != placeholder {
                referenced.insert(path);
            }
        }
        for path in self.references.article_image_paths().await? {
            referenced.insert(normalize_reference(&path));
        }
        for body in self.references.article_bodies().await? {
            referenced.extend(self.matcher.extract(&body));
        }

        referenced.remove("");
        Ok(referenced)
    }

    /// Orphaned files under the media root. Changes nothing.
    pub async fn find_orphans(&self) -> AppResult<OrphanScan> {
        let referenced = self.referenced_paths().await?;
        let inventory = scan_media_root(&self.media_root(), self.placeholder_name()).await?;
        let orphans = find_orphans(&inventory.files, &referenced);
        Ok(OrphanScan {
            referenced,
            on_disk: inventory.files,
            orphans,
            directories: inventory.directories,
        })
    }

    /// Scan, then delete orphans and the directories they leave empty.
    ///
    /// With `dry_run` nothing is deleted.
    pub async fn run(&self, dry_run: bool) -> AppResult<AuditReport> {
        let scan = self.find_orphans().await?;
        let report = purge(
            &self.media_root(),
            &scan.orphans,
            &scan.directories,
            dry_run,
        )
        .await;

        info!(
            referenced = scan.referenced.len(),
            on_disk = scan.on_disk.len(),
            orphans = scan.orphans.len(),
            deleted = report.deleted.len(),
            failed = report.failed.len(),
            removed_directories = report.removed_directories.len(),
            dry_run,
            "Media audit finished"
        );

        Ok(AuditReport {
            referenced: scan.referenced.len(),
            on_disk: scan.on_disk.len(),
            orphans: scan.orphans.into_iter().collect(),
            purge: report,
        })
    }

    fn placeholder_name(&self) -> &str {
        Path::new(&self.config.default_profile_image)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("default.jpg")
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use inkwell_database::MemoryStore;
    use inkwell_database::store::ArticleStore;
    use inkwell_entity::article::{ArticleStatus, NewArticle};
    use inkwell_entity::profile::Profile;
    use uuid::Uuid;

    use super::*;

    async fn seeded(root: &Path) -> (MemoryStore, MediaAuditService) {
        let store = MemoryStore::new();
        let author = Uuid::new_v4();

        store
            .insert_profile(Profile {
                user_id: author,
                nickname: "ink".to_string(),
                bio: String::new(),
                image: "profile_pics/me.jpg".to_string(),
                updated_at: Utc::now(),
            })
            .await;
        store
            .insert_article(NewArticle {
                author_id: author,
                title: "Trip".to_string(),
                slug: "trip".to_string(),
                content: r#"<p><img src="/media/posts/inline.jpg"></p>"#.to_string(),
                feature_image: Some("post_images/cover.jpg".to_string()),
                category_id: None,
                status: ArticleStatus::Published,
                published_at: Utc::now(),
            })
            .await
            .unwrap();

        for file in [
            "profile_pics/me.jpg",
            "profile_pics/old.jpg",
            "profile_pics/default.jpg",
            "posts/inline.jpg",
            "posts/stale/forgotten.jpg",
            "post_images/cover.jpg",
        ] {
            let path = root.join(file);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, b"x").unwrap();
        }

        let config = MediaConfig {
            root: root.to_string_lossy().into_owned(),
            ..MediaConfig::default()
        };
        let service = MediaAuditService::new(Arc::new(store.clone()), Arc::new(config));
        (store, service)
    }

    #[tokio::test]
    async fn test_dry_run_reports_without_deleting() {
        let dir = tempfile::tempdir().unwrap();
        let (_store, service) = seeded(dir.path()).await;

        let report = service.run(true).await.unwrap();

        assert_eq!(report.referenced, 3);
        assert_eq!(report.on_disk, 5);
        assert_eq!(
            report.orphans,
            vec![
                "posts/stale/forgotten.jpg".to_string(),
                "profile_pics/old.jpg".to_string()
            ]
        );
        assert!(report.purge.deleted.is_empty());
        assert!(dir.path().join("profile_pics/old.jpg").exists());
    }

    #[tokio::test]
    async fn test_purge_deletes_orphans_and_empty_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let (_store, service) = seeded(dir.path()).await;

        let report = service.run(false).await.unwrap();

        assert_eq!(report.purge.deleted.len(), 2);
        assert_eq!(report.purge.removed_directories, vec!["posts/stale".to_string()]);
        assert!(!dir.path().join("profile_pics/old.jpg").exists());
        assert!(dir.path().join("profile_pics/default.jpg").exists());
        assert!(dir.path().join("posts/inline.jpg").exists());
        assert!(dir.path().join("post_images/cover.jpg").exists());
    }

    #[tokio::test]
    async fn test_placeholder_reference_is_not_counted() {
        let dir = tempfile::tempdir().unwrap();
        let (store, service) = seeded(dir.path()).await;
        store
            .insert_profile(Profile {
                user_id: Uuid::new_v4(),
                nickname: String::new(),
                bio: String::new(),
                image: "profile_pics/default.jpg".to_string(),
                updated_at: Utc::now(),
            })
            .await;

        let referenced = service.referenced_paths().await.unwrap();
        assert!(!referenced.contains("profile_pics/default.jpg"));
        assert_eq!(referenced.len(), 3);
    }
}
