//! Local project index
//!
//! Answers "does a local project satisfy package X?". Projects are found by
//! walking the configured folders, read concurrently through the metadata
//! reader, and indexed by assembly name and by project name.

use crate::error::{RefswitchError, RefswitchResult};
use crate::paths;
use crate::project::{ProjectDescription, ProjectReader};
use futures_util::stream::{self, StreamExt, TryStreamExt};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

/// Directories never searched for project files
const SKIPPED_DIRS: &[&str] = &[".git", "bin", "obj", "node_modules"];

/// Index of the projects available as source
#[derive(Debug, Default)]
pub struct LocalProjectIndex {
    projects: Vec<ProjectDescription>,
    by_assembly: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl LocalProjectIndex {
    /// Build an index from already-read descriptions
    ///
    /// Descriptions sharing a path are collapsed; for duplicate assembly or
    /// project names the first description wins.
    pub fn from_projects(descriptions: impl IntoIterator<Item = ProjectDescription>) -> Self {
        let mut index = Self::default();
        let mut seen = HashSet::new();

        for description in descriptions {
            if !seen.insert(description.path().to_path_buf()) {
                continue;
            }

            let slot = index.projects.len();
            if !description.assembly_name().is_empty() {
                index
                    .by_assembly
                    .entry(match_key(description.assembly_name()))
                    .or_insert(slot);
            }
            index
                .by_name
                .entry(match_key(description.name()))
                .or_insert(slot);
            index.projects.push(description);
        }

        index
    }

    /// Scan `folders` and read every project found
    ///
    /// Missing folders are skipped. Reads run with at most `concurrency`
    /// in flight; `on_read` is called once per finished read.
    pub async fn build(
        reader: &ProjectReader,
        folders: &[PathBuf],
        extensions: &[String],
        concurrency: usize,
        on_read: &(dyn Fn(&ProjectDescription) + Send + Sync),
    ) -> RefswitchResult<Self> {
        let folders = folders.to_vec();
        let extensions = extensions.to_vec();
        let files = tokio::task::spawn_blocking(move || discover(&folders, &extensions))
            .await
            .map_err(|e| RefswitchError::Internal(format!("project discovery panicked: {e}")))?;

        info!("Found {} local project file(s)", files.len());

        let descriptions: Vec<ProjectDescription> = stream::iter(files)
            .map(|file| async move {
                let description = reader.read(&file).await?;
                on_read(&description);
                Ok::<_, RefswitchError>(description)
            })
            .buffered(concurrency.max(1))
            .try_collect()
            .await?;

        Ok(Self::from_projects(descriptions))
    }

    /// Find the local project satisfying `package`: by assembly name first,
    /// then by project name
    pub fn find(&self, package: &str) -> Option<&ProjectDescription> {
        let key = match_key(package);
        self.by_assembly
            .get(&key)
            .or_else(|| self.by_name.get(&key))
            .map(|&slot| &self.projects[slot])
    }

    /// All indexed projects, in discovery order
    pub fn projects(&self) -> &[ProjectDescription] {
        &self.projects
    }

    /// Number of indexed projects
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

/// Package identifiers are case-insensitive
fn match_key(name: &str) -> String {
    name.to_lowercase()
}

/// Find project files under `folders`, in folder order then file name order
///
/// Folders that do not exist are skipped. Paths are canonical, so a file
/// reachable from two folders (or through a symlink) is listed once.
pub fn discover(folders: &[PathBuf], extensions: &[String]) -> Vec<PathBuf> {
    let extensions: Vec<String> = extensions.iter().map(|e| e.to_lowercase()).collect();
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for folder in folders {
        let folder = paths::absolute(folder);
        if !folder.is_dir() {
            debug!("Skipping missing folder {}", folder.display());
            continue;
        }

        let walker = WalkDir::new(&folder)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_skipped_dir(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !entry.path().is_file() || !has_extension(entry.path(), &extensions) {
                continue;
            }
            let path = paths::canonical(entry.path());
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }

    files
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| extensions.contains(&ext))
}
