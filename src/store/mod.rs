//! Path-keyed on-disk stores
//!
//! Both the metadata cache and the backup store key their files by a SHA256
//! hash of the absolute project path, so keys are filesystem-safe and fixed
//! length regardless of how deep the project lives.
//!
//! | Store | File | Content |
//! |-------|------|---------|
//! | Metadata cache | `<hash>.json` | `{capturedAt, project}` |
//! | Backups | `<hash>.bak` | raw copy of the project file |
//!
//! Directories are passed in by the caller; nothing here is process-global.

pub mod backup;
pub mod metadata;

pub use backup::BackupManager;
pub use metadata::{CacheEntry, MetadataCache};

use crate::error::{RefswitchError, RefswitchResult};
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::fs;

/// Stable hex key for an absolute path
pub fn path_key(path: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.to_string_lossy().as_bytes());
    hex::encode(hasher.finalize())
}

/// Entry count and total size of a store directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub entries: usize,
    pub bytes: u64,
}

/// Count files with `extension` in `dir` (a missing directory is empty)
pub(crate) async fn dir_stats(dir: &Path, extension: &str) -> RefswitchResult<StoreStats> {
    let mut stats = StoreStats::default();
    if !dir.exists() {
        return Ok(stats);
    }

    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| RefswitchError::io(format!("reading directory {}", dir.display()), e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| RefswitchError::io("reading store entry", e))?
    {
        if entry.path().extension().is_some_and(|ext| ext == extension) {
            let meta = entry
                .metadata()
                .await
                .map_err(|e| RefswitchError::io("reading store entry metadata", e))?;
            stats.entries += 1;
            stats.bytes += meta.len();
        }
    }

    Ok(stats)
}

/// Remove files with `extension` from `dir`, returning how many were removed
pub(crate) async fn clear_dir(dir: &Path, extension: &str) -> RefswitchResult<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| RefswitchError::io(format!("reading directory {}", dir.display()), e))?;

    let mut removed = 0;
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| RefswitchError::io("reading store entry", e))?
    {
        if entry.path().extension().is_some_and(|ext| ext == extension) {
            fs::remove_file(entry.path())
                .await
                .map_err(|e| RefswitchError::io("removing store entry", e))?;
            removed += 1;
        }
    }

    Ok(removed)
}
