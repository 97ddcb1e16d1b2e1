//! Project metadata reader
//!
//! Builds a `ProjectDescription` from a project file. Live package and
//! reference data comes from the build tool; the assembly name comes from a
//! scan of the project XML. Results are written to the metadata cache, and a
//! valid cache entry short-circuits every build tool call.

use crate::dotnet::BuildTool;
use crate::error::RefswitchResult;
use crate::paths;
use crate::project::msbuild::read_assembly_name;
use crate::project::ProjectDescription;
use crate::store::MetadataCache;
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Reads project descriptions, consulting the metadata cache first
pub struct ProjectReader {
    tool: Arc<dyn BuildTool>,
    cache: MetadataCache,
    use_cache: bool,
}

impl ProjectReader {
    /// Create a reader; with `use_cache` off, lookups are skipped but fresh
    /// reads still refresh the cache
    pub fn new(tool: Arc<dyn BuildTool>, cache: MetadataCache, use_cache: bool) -> Self {
        Self {
            tool,
            cache,
            use_cache,
        }
    }

    /// The build tool used for fresh reads
    pub fn tool(&self) -> &Arc<dyn BuildTool> {
        &self.tool
    }

    /// Forget cached metadata for a project that was just mutated
    ///
    /// Modification times can be coarser than the capture timestamp, so a
    /// mutation right after a read is not guaranteed to look newer.
    pub async fn invalidate(&self, path: &Path) {
        self.cache.remove(&paths::absolute(path)).await;
    }

    /// Describe the project at `path`
    pub async fn read(&self, path: &Path) -> RefswitchResult<ProjectDescription> {
        let path = paths::absolute(path);

        if self.use_cache {
            if let Some(description) = self.cache.get(&path).await {
                return Ok(description);
            }
        }

        let captured_at = Utc::now();
        let assembly_name = read_assembly_name(&path).await?;

        // Listing works on stale restore output, so a failed restore only warns
        if let Err(e) = self.tool.restore(&path).await {
            warn!("Restore failed for {}: {}", path.display(), e);
        }

        let packages = self.tool.list_packages(&path).await?;
        let project_dir = paths::parent_dir(&path);
        let references = self
            .tool
            .list_references(&path)
            .await?
            .iter()
            .map(|r| paths::resolve(&project_dir, r))
            .collect();

        let description = ProjectDescription::new(path.clone(), assembly_name, packages, references);
        debug!(
            "Read {}: {} package(s), {} reference(s)",
            description.name(),
            description.packages().len(),
            description.references().len()
        );

        if let Err(e) = self.cache.put_at(&path, &description, captured_at).await {
            warn!("Failed to cache metadata for {}: {}", path.display(), e);
        }

        Ok(description)
    }
}
