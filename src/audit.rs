//! Audit logging for project mutations
//!
//! Writes JSON lines to `~/.local/state/refswitch/audit.log`. Every line
//! carries the run id, so the replacements, attach and rollback of one run
//! can be read back together.

use crate::config::{Config, ConfigManager};
use chrono::Utc;
use std::path::PathBuf;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::warn;
use uuid::Uuid;

/// File-based audit logger that appends JSON lines
pub struct AuditLog {
    enabled: bool,
    path: PathBuf,
    run_id: Uuid,
}

impl AuditLog {
    /// Create an audit logger for one run from config
    pub fn new(config: &Config) -> Self {
        Self::with_path(ConfigManager::audit_log_path(), config.general.audit_log)
    }

    /// Create an audit logger writing to `path`
    pub fn with_path(path: PathBuf, enabled: bool) -> Self {
        Self {
            enabled,
            path,
            run_id: Uuid::new_v4(),
        }
    }

    /// An audit logger that drops every event
    pub fn disabled() -> Self {
        Self::with_path(PathBuf::new(), false)
    }

    /// Identifier shared by every event of this run
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Log an audit event as a JSON line
    ///
    /// IO failures are logged and dropped; the audit trail never fails a run.
    pub async fn log(&self, event: &str, data: &serde_json::Value) {
        if !self.enabled {
            return;
        }

        let entry = serde_json::json!({
            "timestamp": Utc::now().to_rfc3339(),
            "run_id": self.run_id.to_string(),
            "event": event,
            "data": data,
        });

        let mut line = match serde_json::to_string(&entry) {
            Ok(s) => s,
            Err(e) => {
                warn!("Failed to serialize audit event: {}", e);
                return;
            }
        };
        line.push('\n');

        if let Err(e) = self.append(&line).await {
            warn!("Failed to write audit log: {}", e);
        }
    }

    async fn append(&self, line: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}
