//! Outcome of a switch run

use serde::Serialize;
use std::path::PathBuf;

/// One package reference replaced by a project reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Replacement {
    /// Project whose package reference was replaced
    pub project: PathBuf,
    /// Package identifier that was removed
    pub package: String,
    /// Local project now referenced instead
    pub local_project: PathBuf,
}

/// Summary of a completed run
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchReport {
    /// Nothing was mutated
    pub dry_run: bool,
    /// Projects processed, in visiting order
    pub visited: Vec<PathBuf>,
    /// Replacements performed (or planned, in a dry run)
    pub replacements: Vec<Replacement>,
    /// Projects added to the solution (or that would be, in a dry run)
    pub attached: Vec<PathBuf>,
}

impl SwitchReport {
    /// Check if the run found nothing to attach
    pub fn nothing_to_add(&self) -> bool {
        self.attached.is_empty()
    }
}
