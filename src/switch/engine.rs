//! Reference-switching engine
//!
//! Walks the solution's projects and replaces every package reference that a
//! local project satisfies with a project reference. The walk is an explicit
//! stack over an arena of descriptions keyed by path:
//!
//! - `Visit(path)` moves a project from unseen to processing, backs it up,
//!   performs its replacements and, in recursive mode, schedules its own
//!   references followed by each replacement project and that project's
//!   references.
//! - `Finish(path)` is pushed underneath the scheduled children and moves the
//!   project to processed once they are done.
//!
//! A project that is processing or processed is never visited again, which
//! makes reference cycles terminate. Any failure restores every file backed
//! up in the run and aborts it; the solution is only touched by the final
//! batched attach.

use crate::audit::AuditLog;
use crate::dotnet::BuildTool;
use crate::error::{RefswitchError, RefswitchResult};
use crate::paths;
use crate::project::{LocalProjectIndex, ProjectDescription, ProjectReader};
use crate::store::BackupManager;
use crate::switch::context::SwitchContext;
use crate::switch::report::{Replacement, SwitchReport};
use futures_util::stream::{self, StreamExt};
use serde_json::json;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Per-run state of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitState {
    Processing,
    Processed,
}

#[derive(Debug)]
enum Step {
    Visit(PathBuf),
    Finish(PathBuf),
}

/// Switches package references to project references for one solution
pub struct Switcher {
    context: SwitchContext,
    reader: ProjectReader,
    backups: BackupManager,
    audit: AuditLog,
    interrupted: Arc<AtomicBool>,
}

impl Switcher {
    /// Create a switcher; storage and audit are owned by the caller's setup
    pub fn new(
        context: SwitchContext,
        reader: ProjectReader,
        backups: BackupManager,
        audit: AuditLog,
    ) -> Self {
        Self {
            context,
            reader,
            backups,
            audit,
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Share an interrupt flag; once set, the run stops at the next project
    /// and rolls back
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupted = flag;
        self
    }

    fn check_interrupted(&self) -> RefswitchResult<()> {
        if self.interrupted.load(Ordering::SeqCst) {
            return Err(RefswitchError::Interrupted);
        }
        Ok(())
    }

    /// The run configuration
    pub fn context(&self) -> &SwitchContext {
        &self.context
    }

    fn tool(&self) -> &Arc<dyn BuildTool> {
        self.reader.tool()
    }

    /// Scan the configured folders into a local project index
    pub async fn build_index(
        &self,
        on_read: &(dyn Fn(&ProjectDescription) + Send + Sync),
    ) -> RefswitchResult<LocalProjectIndex> {
        LocalProjectIndex::build(
            &self.reader,
            &self.context.project_folders,
            &self.context.project_extensions,
            self.context.read_concurrency,
            on_read,
        )
        .await
        .map_err(RefswitchError::aborted)
    }

    /// Build the index, then switch
    pub async fn run(
        &self,
        on_read: &(dyn Fn(&ProjectDescription) + Send + Sync),
    ) -> RefswitchResult<SwitchReport> {
        let index = self.build_index(on_read).await?;
        self.switch(&index).await
    }

    /// Switch every solution project against `index`
    pub async fn switch(&self, index: &LocalProjectIndex) -> RefswitchResult<SwitchReport> {
        let solution = paths::absolute(&self.context.solution_path);
        self.audit
            .log(
                "switch.started",
                &json!({
                    "solution": solution,
                    "recursive": self.context.recursive,
                    "dry_run": self.context.dry_run,
                    "local_projects": index.len(),
                }),
            )
            .await;

        let mut walk = Walk::new(self, index);
        let outcome = match walk.run(&solution).await {
            Ok(()) => self.attach(&solution, &mut walk).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(attached) => {
                let report = walk.into_report(attached);
                self.audit
                    .log(
                        "switch.completed",
                        &json!({
                            "replacements": report.replacements.len(),
                            "attached": report.attached.len(),
                        }),
                    )
                    .await;
                Ok(report)
            }
            Err(e) => {
                warn!("Switch failed, rolling back: {}", e);
                let restored = walk.rollback().await;
                self.audit
                    .log(
                        "switch.rolled_back",
                        &json!({ "error": e.to_string(), "restored": restored }),
                    )
                    .await;
                Err(RefswitchError::aborted(e))
            }
        }
    }

    /// Add the selected projects and their references to the solution
    async fn attach(&self, solution: &Path, walk: &mut Walk<'_>) -> RefswitchResult<Vec<PathBuf>> {
        self.check_interrupted()?;
        let attach = walk.attach_list();
        if attach.is_empty() {
            info!("Nothing to add");
            return Ok(attach);
        }

        if self.context.dry_run {
            info!(
                "Would attach {} project(s) to {} under '{}'",
                attach.len(),
                solution.display(),
                self.context.solution_folder
            );
            return Ok(attach);
        }

        info!("Attach external projects to solution");
        walk.backup(solution).await?;
        self.tool()
            .add_to_solution(solution, &self.context.solution_folder, &attach)
            .await?;
        self.audit
            .log(
                "switch.attached",
                &json!({
                    "solution": solution,
                    "folder": self.context.solution_folder,
                    "projects": attach,
                }),
            )
            .await;
        Ok(attach)
    }
}

/// State of one run
struct Walk<'a> {
    switcher: &'a Switcher,
    index: &'a LocalProjectIndex,
    arena: HashMap<PathBuf, ProjectDescription>,
    states: HashMap<PathBuf, VisitState>,
    visited: Vec<PathBuf>,
    backed_up: Vec<PathBuf>,
    to_attach: Vec<PathBuf>,
    replacements: Vec<Replacement>,
}

impl<'a> Walk<'a> {
    fn new(switcher: &'a Switcher, index: &'a LocalProjectIndex) -> Self {
        let arena = index
            .projects()
            .iter()
            .map(|p| (p.path().to_path_buf(), p.clone()))
            .collect();

        Self {
            switcher,
            index,
            arena,
            states: HashMap::new(),
            visited: Vec::new(),
            backed_up: Vec::new(),
            to_attach: Vec::new(),
            replacements: Vec::new(),
        }
    }

    fn context(&self) -> &SwitchContext {
        &self.switcher.context
    }

    fn tool(&self) -> &Arc<dyn BuildTool> {
        self.switcher.tool()
    }

    async fn run(&mut self, solution: &Path) -> RefswitchResult<()> {
        let solution_dir = paths::parent_dir(solution);
        let projects: Vec<PathBuf> = self
            .tool()
            .list_solution_projects(solution)
            .await?
            .iter()
            .map(|p| paths::resolve(&solution_dir, p))
            .collect();

        info!("Solution lists {} project(s)", projects.len());
        self.prefetch(&projects).await;

        let mut stack: Vec<Step> = projects.into_iter().rev().map(Step::Visit).collect();
        while let Some(step) = stack.pop() {
            match step {
                Step::Visit(path) => {
                    if self.states.contains_key(&path) {
                        debug!("Already processed {}", path.display());
                        continue;
                    }
                    self.switcher.check_interrupted()?;
                    let children = self.visit(&path).await?;
                    stack.push(Step::Finish(path));
                    stack.extend(
                        children
                            .into_iter()
                            .rev()
                            .filter(|c| !self.states.contains_key(c))
                            .map(Step::Visit),
                    );
                }
                Step::Finish(path) => {
                    self.states.insert(path, VisitState::Processed);
                }
            }
        }

        Ok(())
    }

    /// Read solution projects concurrently ahead of the walk
    ///
    /// Failed reads are left out of the arena; the walk reads them again in
    /// order, so the failure surfaces (and rolls back) at the right point.
    async fn prefetch(&mut self, projects: &[PathBuf]) {
        let reader = &self.switcher.reader;
        let missing: Vec<&PathBuf> = projects
            .iter()
            .filter(|p| !self.arena.contains_key(*p))
            .collect();

        let results: Vec<_> = stream::iter(missing)
            .map(|path| async move { (path, reader.read(path).await) })
            .buffered(self.context().read_concurrency.max(1))
            .collect()
            .await;

        for (path, result) in results {
            match result {
                Ok(description) => {
                    self.arena.insert(path.clone(), description);
                }
                Err(e) => debug!("Prefetch of {} failed: {}", path.display(), e),
            }
        }
    }

    async fn describe(&mut self, path: &Path) -> RefswitchResult<ProjectDescription> {
        if let Some(description) = self.arena.get(path) {
            return Ok(description.clone());
        }
        let description = self.switcher.reader.read(path).await?;
        self.arena.insert(path.to_path_buf(), description.clone());
        Ok(description)
    }

    async fn backup(&mut self, path: &Path) -> RefswitchResult<()> {
        self.switcher.backups.backup(path).await?;
        self.backed_up.push(path.to_path_buf());
        Ok(())
    }

    /// Process one project and return the projects to visit next
    async fn visit(&mut self, path: &Path) -> RefswitchResult<Vec<PathBuf>> {
        info!("Process project {}", path.display());
        self.states.insert(path.to_path_buf(), VisitState::Processing);
        self.visited.push(path.to_path_buf());

        let dry_run = self.context().dry_run;
        if !dry_run {
            self.backup(path).await?;
        }

        let description = self.describe(path).await?;
        let mut discovered: Vec<PathBuf> = Vec::new();

        for package in description.packages() {
            let Some(local) = self.index.find(package) else {
                continue;
            };
            if local.path() == path {
                debug!("{} satisfies its own package {}", path.display(), package);
                continue;
            }

            let local_path = local.path().to_path_buf();
            info!(
                "Replace package {} with project {}",
                package,
                local_path.display()
            );
            push_unique(&mut self.to_attach, &local_path);

            if !dry_run {
                self.tool().remove_package(path, package).await?;
                let referenced = description.references().contains(&local_path)
                    || discovered.contains(&local_path);
                if !referenced {
                    self.tool().add_reference(path, &local_path).await?;
                }
                self.switcher.reader.invalidate(path).await;
                self.switcher
                    .audit
                    .log(
                        "switch.replaced",
                        &json!({
                            "project": path,
                            "package": package,
                            "local_project": local_path,
                        }),
                    )
                    .await;
            }

            self.replacements.push(Replacement {
                project: path.to_path_buf(),
                package: package.clone(),
                local_project: local_path.clone(),
            });
            push_unique(&mut discovered, &local_path);
        }

        if !self.context().recursive {
            return Ok(Vec::new());
        }

        let mut children: Vec<PathBuf> = description.references().to_vec();
        for local in &discovered {
            children.push(local.clone());
            if let Some(local_description) = self.arena.get(local) {
                children.extend(local_description.references().iter().cloned());
            }
        }
        Ok(children)
    }

    /// Attached projects, then each one's recorded references, deduplicated
    fn attach_list(&self) -> Vec<PathBuf> {
        let mut list = Vec::new();
        for project in &self.to_attach {
            push_unique(&mut list, project);
        }
        for project in &self.to_attach {
            if let Some(description) = self.arena.get(project) {
                for reference in description.references() {
                    push_unique(&mut list, reference);
                }
            }
        }
        list
    }

    /// Restore every file backed up in this run
    async fn rollback(&self) -> Vec<PathBuf> {
        let mut restored = Vec::new();
        for path in &self.backed_up {
            match self.switcher.backups.restore(path).await {
                Ok(true) => {
                    self.switcher.reader.invalidate(path).await;
                    restored.push(path.clone());
                }
                Ok(false) => {}
                Err(e) => warn!("Failed to restore {}: {}", path.display(), e),
            }
        }
        restored
    }

    fn into_report(self, attached: Vec<PathBuf>) -> SwitchReport {
        SwitchReport {
            dry_run: self.switcher.context.dry_run,
            visited: self.visited,
            replacements: self.replacements,
            attached,
        }
    }
}

fn push_unique(list: &mut Vec<PathBuf>, path: &Path) {
    if !list.iter().any(|p| p == path) {
        list.push(path.to_path_buf());
    }
}
