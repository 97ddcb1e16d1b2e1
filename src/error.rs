//! Error types for refswitch
//!
//! All modules use `RefswitchResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for refswitch operations
pub type RefswitchResult<T> = Result<T, RefswitchError>;

/// All errors that can occur in refswitch
#[derive(Error, Debug)]
pub enum RefswitchError {
    // Configuration errors
    #[error("Provide path to solution")]
    SolutionMissing,

    #[error("Solution {0} doesn't exist")]
    SolutionNotFound(PathBuf),

    #[error("Empty projects folders list. Provide at least one")]
    NoProjectFolders,

    #[error("These projects folders don't exist: {}", join_paths(.0))]
    ProjectFoldersMissing(Vec<PathBuf>),

    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Build tool errors
    #[error("Build tool not found: {name}")]
    ToolNotFound { name: String },

    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command execution error: {command}: {stderr}")]
    CommandExecution { command: String, stderr: String },

    // Project errors
    #[error("Malformed project file {path}: {reason}")]
    MalformedProject { path: PathBuf, reason: String },

    #[error("No backup found for {0}")]
    BackupNotFound(PathBuf),

    // Run errors
    #[error("Switch aborted: {source}")]
    SwitchAborted {
        #[source]
        source: Box<RefswitchError>,
    },

    #[error("Interrupted")]
    Interrupted,

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl RefswitchError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a command execution error
    pub fn command_exec(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::CommandExecution {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    /// Wrap a fatal error raised during a run
    pub fn aborted(source: RefswitchError) -> Self {
        Self::SwitchAborted {
            source: Box::new(source),
        }
    }

    /// The innermost error behind an aborted run
    pub fn root_cause(&self) -> &RefswitchError {
        match self {
            Self::SwitchAborted { source } => source.root_cause(),
            other => other,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self.root_cause() {
            Self::ToolNotFound { .. } => Some("Install the .NET SDK from https://dot.net"),
            Self::NoProjectFolders => Some("Pass at least one folder with -f <folder>"),
            Self::MalformedProject { .. } => Some("Fix the project file or exclude its folder"),
            Self::Interrupted => Some("Every file touched by the run was restored"),
            Self::BackupNotFound(_) => {
                Some("Backups only exist for projects touched by a previous switch")
            }
            _ => None,
        }
    }
}
