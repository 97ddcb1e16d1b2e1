//! Project metadata cache with modification-time validation

use crate::error::{RefswitchError, RefswitchResult};
use crate::project::ProjectDescription;
use crate::store::{clear_dir, dir_stats, path_key, StoreStats};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// Cached description of one project file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    /// When the description was captured
    pub captured_at: DateTime<Utc>,

    /// The captured description
    pub project: ProjectDescription,
}

impl CacheEntry {
    /// An entry is stale once the project file changed after capture
    pub fn is_stale(&self, modified: DateTime<Utc>) -> bool {
        modified > self.captured_at
    }
}

/// Metadata cache keyed by project path
pub struct MetadataCache {
    cache_dir: PathBuf,
}

impl MetadataCache {
    /// Create a cache rooted at `cache_dir` (created on first write)
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Directory holding the cache entries
    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Get a cached description if one exists and the project file has not
    /// changed since it was captured
    ///
    /// Unreadable or unparseable entries are deleted.
    pub async fn get(&self, project: &Path) -> Option<ProjectDescription> {
        let path = self.entry_path(project);

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Unreadable cache entry for {}: {}", project.display(), e);
                self.evict(&path).await;
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&content) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Corrupt cache entry for {}: {}", project.display(), e);
                self.evict(&path).await;
                return None;
            }
        };

        let modified = match fs::metadata(project).await.and_then(|m| m.modified()) {
            Ok(time) => DateTime::<Utc>::from(time),
            Err(e) => {
                debug!("Cannot stat {}: {}", project.display(), e);
                return None;
            }
        };

        if entry.is_stale(modified) {
            debug!("Cache entry for {} is stale", project.display());
            return None;
        }

        debug!("Using cached metadata for {}", project.display());
        Some(entry.project)
    }

    /// Store a description captured now
    pub async fn put(&self, project: &Path, description: &ProjectDescription) -> RefswitchResult<()> {
        self.put_at(project, description, Utc::now()).await
    }

    /// Store a description captured at `captured_at`, overwriting any prior entry
    pub async fn put_at(
        &self,
        project: &Path,
        description: &ProjectDescription,
        captured_at: DateTime<Utc>,
    ) -> RefswitchResult<()> {
        fs::create_dir_all(&self.cache_dir).await.map_err(|e| {
            RefswitchError::io(format!("creating cache dir {}", self.cache_dir.display()), e)
        })?;

        let entry = CacheEntry {
            captured_at,
            project: description.clone(),
        };
        let path = self.entry_path(project);
        let content = serde_json::to_string_pretty(&entry)?;

        fs::write(&path, content)
            .await
            .map_err(|e| RefswitchError::io(format!("writing cache file {}", path.display()), e))?;

        debug!("Cached metadata for {}", project.display());
        Ok(())
    }

    /// Drop the entry for `project`, if any
    pub async fn remove(&self, project: &Path) {
        let path = self.entry_path(project);
        if path.exists() {
            self.evict(&path).await;
        }
    }

    /// Remove every cache entry
    pub async fn clear(&self) -> RefswitchResult<usize> {
        clear_dir(&self.cache_dir, "json").await
    }

    /// Entry count and size on disk
    pub async fn stats(&self) -> RefswitchResult<StoreStats> {
        dir_stats(&self.cache_dir, "json").await
    }

    async fn evict(&self, path: &Path) {
        if let Err(e) = fs::remove_file(path).await {
            warn!("Failed to remove cache entry {}: {}", path.display(), e);
        }
    }

    fn entry_path(&self, project: &Path) -> PathBuf {
        self.cache_dir.join(format!("{}.json", path_key(project)))
    }
}
