//! Configuration schema for refswitch
//!
//! Configuration is stored at `~/.config/refswitch/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Build tool settings
    pub dotnet: DotnetConfig,

    /// Reference switching defaults
    pub switch: SwitchConfig,

    /// Metadata cache and backup locations
    pub storage: StorageConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,

    /// Enable audit logging
    pub audit_log: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
            audit_log: true,
        }
    }
}

/// Build tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DotnetConfig {
    /// Executable used for every build tool invocation
    pub executable: String,

    /// Project file extensions picked up when scanning folders
    pub project_extensions: Vec<String>,
}

impl Default for DotnetConfig {
    fn default() -> Self {
        Self {
            executable: "dotnet".to_string(),
            project_extensions: vec!["csproj".to_string()],
        }
    }
}

/// Reference switching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchConfig {
    /// Solution folder that receives attached projects
    pub solution_folder: String,

    /// Follow project references transitively by default
    pub recursive: bool,

    /// Maximum number of project files read concurrently
    pub read_concurrency: usize,
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            solution_folder: "external".to_string(),
            recursive: false,
            read_concurrency: 8,
        }
    }
}

impl SwitchConfig {
    /// Concurrency limit, never below one
    pub fn concurrency(&self) -> usize {
        self.read_concurrency.max(1)
    }
}

/// Storage locations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Metadata cache directory (defaults to `<temp>/refswitch/cache`)
    pub cache_dir: Option<PathBuf>,

    /// Backup directory (defaults to `<temp>/refswitch/backups`)
    pub backup_dir: Option<PathBuf>,
}

impl StorageConfig {
    fn temp_root() -> PathBuf {
        std::env::temp_dir().join("refswitch")
    }

    /// Resolved metadata cache directory
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir
            .clone()
            .unwrap_or_else(|| Self::temp_root().join("cache"))
    }

    /// Resolved backup directory
    pub fn backup_dir(&self) -> PathBuf {
        self.backup_dir
            .clone()
            .unwrap_or_else(|| Self::temp_root().join("backups"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.dotnet.executable, "dotnet");
        assert_eq!(config.dotnet.project_extensions, vec!["csproj"]);
        assert_eq!(config.switch.solution_folder, "external");
        assert!(!config.switch.recursive);
        assert!(config.general.audit_log);
    }

    #[test]
    fn parse_partial_config() {
        let toml_str = r#"
            [switch]
            recursive = true
            read_concurrency = 0

            [storage]
            cache_dir = "/var/cache/refswitch"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(config.switch.recursive);
        assert_eq!(config.switch.concurrency(), 1);
        assert_eq!(config.switch.solution_folder, "external");
        assert_eq!(
            config.storage.cache_dir(),
            PathBuf::from("/var/cache/refswitch")
        );
        assert!(config.storage.backup_dir().ends_with("refswitch/backups"));
    }

    #[test]
    fn serialize_roundtrip_keeps_sections() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[dotnet]"));
        assert!(toml_str.contains("[switch]"));
    }
}
