//! Build tool abstraction
//!
//! Every operation refswitch needs from the .NET build tool goes through
//! this trait, so the switching engine can run against the real CLI or an
//! in-memory double.

use crate::error::RefswitchResult;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Abstract build tool interface
///
/// Path listings are returned as reported by the tool (usually relative to
/// the solution or project directory); callers resolve them.
#[async_trait]
pub trait BuildTool: Send + Sync {
    /// List the projects of a solution, in solution order
    async fn list_solution_projects(&self, solution: &Path) -> RefswitchResult<Vec<PathBuf>>;

    /// List the package identifiers a project references
    async fn list_packages(&self, project: &Path) -> RefswitchResult<Vec<String>>;

    /// List the project references of a project
    async fn list_references(&self, project: &Path) -> RefswitchResult<Vec<PathBuf>>;

    /// Remove a package reference from a project
    async fn remove_package(&self, project: &Path, package: &str) -> RefswitchResult<()>;

    /// Add a project reference to a project
    async fn add_reference(&self, project: &Path, reference: &Path) -> RefswitchResult<()>;

    /// Restore a project's dependencies
    async fn restore(&self, project: &Path) -> RefswitchResult<()>;

    /// Add projects to a solution under a solution folder
    async fn add_to_solution(
        &self,
        solution: &Path,
        solution_folder: &str,
        projects: &[PathBuf],
    ) -> RefswitchResult<()>;

    /// Report the tool version string
    async fn version(&self) -> RefswitchResult<String>;

    /// Get the human-readable tool name for display
    fn tool_name(&self) -> &str;
}
