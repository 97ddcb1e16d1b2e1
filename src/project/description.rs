//! Project metadata value type

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What refswitch knows about one project file
///
/// Built once per read (cache hit or miss) and never mutated afterwards.
/// Identity is the project path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDescription {
    name: String,
    path: PathBuf,
    assembly_name: String,
    packages: Vec<String>,
    references: Vec<PathBuf>,
}

impl ProjectDescription {
    /// Create a description; the name is derived from the file name and
    /// duplicate packages and references are dropped, keeping first-seen order
    pub fn new(
        path: PathBuf,
        assembly_name: impl Into<String>,
        packages: Vec<String>,
        references: Vec<PathBuf>,
    ) -> Self {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            name,
            path,
            assembly_name: assembly_name.into(),
            packages: dedup(packages),
            references: dedup(references),
        }
    }

    /// Project name (file name without extension)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute path of the project file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Declared `AssemblyName`, empty when the project does not set one
    pub fn assembly_name(&self) -> &str {
        &self.assembly_name
    }

    /// Package identifiers referenced by the project
    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    /// Absolute paths of referenced projects
    pub fn references(&self) -> &[PathBuf] {
        &self.references
    }
}

fn dedup<T: PartialEq>(items: Vec<T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
