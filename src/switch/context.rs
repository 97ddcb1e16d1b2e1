//! Run configuration for a switch

use crate::config::Config;
use crate::error::{RefswitchError, RefswitchResult};
use std::path::PathBuf;

/// Everything one switch run needs to know
#[derive(Debug, Clone)]
pub struct SwitchContext {
    /// Solution whose projects are rewritten
    pub solution_path: PathBuf,
    /// Roots scanned for local projects, in priority order
    pub project_folders: Vec<PathBuf>,
    /// Follow project references transitively
    pub recursive: bool,
    /// Compute and report, but do not mutate
    pub dry_run: bool,
    /// Skip metadata cache lookups
    pub disable_cache: bool,
    /// Solution folder that receives attached projects
    pub solution_folder: String,
    /// Project file extensions picked up when scanning
    pub project_extensions: Vec<String>,
    /// Maximum concurrent project reads
    pub read_concurrency: usize,
}

impl SwitchContext {
    /// Create a context with defaults taken from `config`
    pub fn from_config(
        config: &Config,
        solution_path: PathBuf,
        project_folders: Vec<PathBuf>,
    ) -> Self {
        Self {
            solution_path,
            project_folders,
            recursive: config.switch.recursive,
            dry_run: false,
            disable_cache: false,
            solution_folder: config.switch.solution_folder.clone(),
            project_extensions: config.dotnet.project_extensions.clone(),
            read_concurrency: config.switch.concurrency(),
        }
    }

    /// Check the solution and folders before any work starts
    pub fn validate(&self) -> RefswitchResult<()> {
        if self.solution_path.as_os_str().is_empty() {
            return Err(RefswitchError::SolutionMissing);
        }

        if !self.solution_path.is_file() {
            return Err(RefswitchError::SolutionNotFound(self.solution_path.clone()));
        }

        if self.project_folders.is_empty() {
            return Err(RefswitchError::NoProjectFolders);
        }

        let missing: Vec<PathBuf> = self
            .project_folders
            .iter()
            .filter(|f| !f.is_dir())
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(RefswitchError::ProjectFoldersMissing(missing));
        }

        Ok(())
    }
}
