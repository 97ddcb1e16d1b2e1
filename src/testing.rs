//! In-memory build tool for tests
//!
//! Mutating calls also append a marker to the project file on disk, so
//! rollback can be checked against real file content.

use crate::dotnet::BuildTool;
use crate::error::{RefswitchError, RefswitchResult};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    ListSolution(PathBuf),
    ListPackages(PathBuf),
    ListReferences(PathBuf),
    Restore(PathBuf),
    RemovePackage(PathBuf, String),
    AddReference(PathBuf, PathBuf),
    AddToSolution {
        solution: PathBuf,
        folder: String,
        projects: Vec<PathBuf>,
    },
}

impl Call {
    pub(crate) fn is_mutation(&self) -> bool {
        matches!(
            self,
            Call::RemovePackage(..) | Call::AddReference(..) | Call::AddToSolution { .. }
        )
    }
}

#[derive(Default)]
struct State {
    solutions: HashMap<PathBuf, Vec<PathBuf>>,
    packages: HashMap<PathBuf, Vec<String>>,
    references: HashMap<PathBuf, Vec<PathBuf>>,
    fail_listing: HashSet<PathBuf>,
    fail_restore: HashSet<PathBuf>,
    fail_add_reference: HashSet<PathBuf>,
    fail_attach: bool,
    calls: Vec<Call>,
}

#[derive(Default)]
pub(crate) struct FakeTool {
    state: Mutex<State>,
}

impl FakeTool {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub(crate) fn set_solution(&self, solution: &Path, projects: &[&Path]) {
        self.state().solutions.insert(
            solution.to_path_buf(),
            projects.iter().map(|p| p.to_path_buf()).collect(),
        );
    }

    pub(crate) fn set_packages(&self, project: &Path, packages: &[&str]) {
        self.state().packages.insert(
            project.to_path_buf(),
            packages.iter().map(|p| p.to_string()).collect(),
        );
    }

    pub(crate) fn set_references(&self, project: &Path, references: &[&Path]) {
        self.state().references.insert(
            project.to_path_buf(),
            references.iter().map(|p| p.to_path_buf()).collect(),
        );
    }

    pub(crate) fn set_raw_references(&self, project: &Path, references: &[&str]) {
        self.state().references.insert(
            project.to_path_buf(),
            references.iter().map(PathBuf::from).collect(),
        );
    }

    pub(crate) fn fail_listing(&self, project: &Path) {
        self.state().fail_listing.insert(project.to_path_buf());
    }

    pub(crate) fn fail_restore(&self, project: &Path) {
        self.state().fail_restore.insert(project.to_path_buf());
    }

    pub(crate) fn fail_add_reference(&self, project: &Path) {
        self.state().fail_add_reference.insert(project.to_path_buf());
    }

    pub(crate) fn fail_attach(&self) {
        self.state().fail_attach = true;
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub(crate) fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    pub(crate) fn list_count(&self, project: &Path) -> usize {
        self.count(|c| matches!(c, Call::ListPackages(p) if p == project))
    }

    pub(crate) fn restore_count(&self, project: &Path) -> usize {
        self.count(|c| matches!(c, Call::Restore(p) if p == project))
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.state().calls.iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.state().calls.push(call);
    }
}

fn append_marker(project: &Path, marker: &str) {
    if let Ok(mut file) = std::fs::OpenOptions::new().append(true).open(project) {
        let _ = writeln!(file, "<!-- {marker} -->");
    }
}

fn failure(command: &str, project: &Path) -> RefswitchError {
    RefswitchError::command_exec(
        format!("dotnet {command} {}", project.display()),
        "simulated failure",
    )
}

#[async_trait]
impl BuildTool for FakeTool {
    async fn list_solution_projects(&self, solution: &Path) -> RefswitchResult<Vec<PathBuf>> {
        self.record(Call::ListSolution(solution.to_path_buf()));
        Ok(self
            .state()
            .solutions
            .get(solution)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_packages(&self, project: &Path) -> RefswitchResult<Vec<String>> {
        self.record(Call::ListPackages(project.to_path_buf()));
        let state = self.state();
        if state.fail_listing.contains(project) {
            return Err(failure("list package", project));
        }
        Ok(state.packages.get(project).cloned().unwrap_or_default())
    }

    async fn list_references(&self, project: &Path) -> RefswitchResult<Vec<PathBuf>> {
        self.record(Call::ListReferences(project.to_path_buf()));
        let state = self.state();
        if state.fail_listing.contains(project) {
            return Err(failure("list reference", project));
        }
        Ok(state.references.get(project).cloned().unwrap_or_default())
    }

    async fn remove_package(&self, project: &Path, package: &str) -> RefswitchResult<()> {
        self.record(Call::RemovePackage(project.to_path_buf(), package.to_string()));
        if let Some(packages) = self.state().packages.get_mut(project) {
            packages.retain(|p| p != package);
        }
        append_marker(project, &format!("removed package {package}"));
        Ok(())
    }

    async fn add_reference(&self, project: &Path, reference: &Path) -> RefswitchResult<()> {
        self.record(Call::AddReference(
            project.to_path_buf(),
            reference.to_path_buf(),
        ));
        let mut state = self.state();
        if state.fail_add_reference.contains(project) {
            return Err(failure("add reference", project));
        }
        state
            .references
            .entry(project.to_path_buf())
            .or_default()
            .push(reference.to_path_buf());
        drop(state);
        append_marker(project, &format!("reference {}", reference.display()));
        Ok(())
    }

    async fn restore(&self, project: &Path) -> RefswitchResult<()> {
        self.record(Call::Restore(project.to_path_buf()));
        if self.state().fail_restore.contains(project) {
            return Err(failure("restore", project));
        }
        Ok(())
    }

    async fn add_to_solution(
        &self,
        solution: &Path,
        solution_folder: &str,
        projects: &[PathBuf],
    ) -> RefswitchResult<()> {
        self.record(Call::AddToSolution {
            solution: solution.to_path_buf(),
            folder: solution_folder.to_string(),
            projects: projects.to_vec(),
        });
        for project in projects {
            append_marker(solution, &format!("project {}", project.display()));
        }
        if self.state().fail_attach {
            return Err(failure("sln add", solution));
        }
        Ok(())
    }

    async fn version(&self) -> RefswitchResult<String> {
        Ok("8.0.100".to_string())
    }

    fn tool_name(&self) -> &str {
        "fake-dotnet"
    }
}
