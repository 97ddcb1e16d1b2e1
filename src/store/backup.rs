//! Project file backups for per-run rollback
//!
//! Only the latest pre-mutation copy of each file is kept.

use crate::error::{RefswitchError, RefswitchResult};
use crate::store::{clear_dir, dir_stats, path_key, StoreStats};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Backup store keyed by project path
pub struct BackupManager {
    backup_dir: PathBuf,
}

impl BackupManager {
    /// Create a backup manager rooted at `backup_dir` (created on first backup)
    pub fn new(backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            backup_dir: backup_dir.into(),
        }
    }

    /// Directory holding the backups
    pub fn dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Copy the current content of `path`, replacing any earlier backup
    pub async fn backup(&self, path: &Path) -> RefswitchResult<PathBuf> {
        fs::create_dir_all(&self.backup_dir).await.map_err(|e| {
            RefswitchError::io(format!("creating backup dir {}", self.backup_dir.display()), e)
        })?;

        let target = self.backup_path(path);
        fs::copy(path, &target)
            .await
            .map_err(|e| RefswitchError::io(format!("backing up {}", path.display()), e))?;

        debug!("Backed up {} to {}", path.display(), target.display());
        Ok(target)
    }

    /// Overwrite `path` with its backup
    ///
    /// Returns `false` and leaves the file untouched when no backup exists.
    pub async fn restore(&self, path: &Path) -> RefswitchResult<bool> {
        let source = self.backup_path(path);
        if !source.exists() {
            warn!("No backup for {}, leaving it untouched", path.display());
            return Ok(false);
        }

        fs::copy(&source, path)
            .await
            .map_err(|e| RefswitchError::io(format!("restoring {}", path.display()), e))?;

        info!("Restored {} from backup", path.display());
        Ok(true)
    }

    /// Remove every backup
    pub async fn clear(&self) -> RefswitchResult<usize> {
        clear_dir(&self.backup_dir, "bak").await
    }

    /// Backup count and size on disk
    pub async fn stats(&self) -> RefswitchResult<StoreStats> {
        dir_stats(&self.backup_dir, "bak").await
    }

    fn backup_path(&self, path: &Path) -> PathBuf {
        self.backup_dir.join(format!("{}.bak", path_key(path)))
    }
}
