//! Restore command - put project files back from their backups
//!
//! Recovers from a run that was killed before it could roll back itself.

use crate::audit::AuditLog;
use crate::cli::args::RestoreArgs;
use crate::config::Config;
use crate::error::{RefswitchError, RefswitchResult};
use crate::paths;
use crate::store::{BackupManager, MetadataCache};
use crate::ui::{self, UiContext};
use serde_json::json;
use std::path::PathBuf;

/// Execute the restore command
pub async fn execute(args: RestoreArgs, config: &Config) -> RefswitchResult<()> {
    let ctx = UiContext::detect();
    let backups = BackupManager::new(config.storage.backup_dir());
    let cache = MetadataCache::new(config.storage.cache_dir());
    let audit = AuditLog::new(config);

    let mut restored = Vec::new();
    let mut missing: Vec<PathBuf> = Vec::new();

    for file in &args.files {
        let path = paths::absolute(file);
        if backups.restore(&path).await? {
            cache.remove(&path).await;
            ui::step_ok(&ctx, &format!("Restored {}", path.display()));
            restored.push(path);
        } else {
            ui::step_warn(&ctx, &format!("No backup for {}", path.display()));
            missing.push(path);
        }
    }

    audit
        .log(
            "restore.completed",
            &json!({ "restored": restored, "missing": missing }),
        )
        .await;

    match missing.into_iter().next() {
        Some(first) => Err(RefswitchError::BackupNotFound(first)),
        None => Ok(()),
    }
}
