//! `dotnet` CLI build tool
//!
//! Implements the BuildTool trait by spawning the .NET CLI and parsing its
//! line-oriented output. Commands run one at a time per call; the engine is
//! responsible for never issuing mutating commands concurrently.

use crate::dotnet::output::{error_output, parse_listing, parse_packages};
use crate::dotnet::tool::BuildTool;
use crate::error::{RefswitchError, RefswitchResult};
use crate::paths;
use async_trait::async_trait;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Build tool backed by the `dotnet` executable
pub struct DotnetCli {
    executable: String,
}

impl DotnetCli {
    /// Create a tool that invokes `executable`
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Check if the executable can be spawned at all
    pub async fn is_installed(&self) -> bool {
        Command::new(&self.executable)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn describe(&self, args: &[OsString]) -> String {
        let mut line = self.executable.clone();
        for arg in args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }

    /// Execute a command and return its standard output
    async fn exec(&self, args: &[OsString]) -> RefswitchResult<String> {
        let command = self.describe(args);
        debug!("Executing: {}", command);

        let output = Command::new(&self.executable)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    RefswitchError::ToolNotFound {
                        name: self.executable.clone(),
                    }
                } else {
                    RefswitchError::command_failed(command.clone(), e)
                }
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if output.status.success() {
            Ok(stdout)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(RefswitchError::command_exec(
                command,
                error_output(&stdout, &stderr),
            ))
        }
    }
}

impl Default for DotnetCli {
    fn default() -> Self {
        Self::new("dotnet")
    }
}

fn args<I, S>(items: I) -> Vec<OsString>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().to_os_string())
        .collect()
}

#[async_trait]
impl BuildTool for DotnetCli {
    async fn list_solution_projects(&self, solution: &Path) -> RefswitchResult<Vec<PathBuf>> {
        let stdout = self
            .exec(&args([OsStr::new("sln"), solution.as_os_str(), OsStr::new("list")]))
            .await?;
        Ok(parse_listing(&stdout)
            .iter()
            .map(|l| paths::from_tool_output(l))
            .collect())
    }

    async fn list_packages(&self, project: &Path) -> RefswitchResult<Vec<String>> {
        let stdout = self
            .exec(&args([OsStr::new("list"), project.as_os_str(), OsStr::new("package")]))
            .await?;
        Ok(parse_packages(&stdout))
    }

    async fn list_references(&self, project: &Path) -> RefswitchResult<Vec<PathBuf>> {
        let stdout = self
            .exec(&args([OsStr::new("list"), project.as_os_str(), OsStr::new("reference")]))
            .await?;
        Ok(parse_listing(&stdout)
            .iter()
            .map(|l| paths::from_tool_output(l))
            .collect())
    }

    async fn remove_package(&self, project: &Path, package: &str) -> RefswitchResult<()> {
        self.exec(&args([
            OsStr::new("remove"),
            project.as_os_str(),
            OsStr::new("package"),
            OsStr::new(package),
        ]))
        .await?;
        Ok(())
    }

    async fn add_reference(&self, project: &Path, reference: &Path) -> RefswitchResult<()> {
        self.exec(&args([
            OsStr::new("add"),
            project.as_os_str(),
            OsStr::new("reference"),
            reference.as_os_str(),
        ]))
        .await?;
        Ok(())
    }

    async fn restore(&self, project: &Path) -> RefswitchResult<()> {
        self.exec(&args([OsStr::new("restore"), project.as_os_str()]))
            .await?;
        Ok(())
    }

    async fn add_to_solution(
        &self,
        solution: &Path,
        solution_folder: &str,
        projects: &[PathBuf],
    ) -> RefswitchResult<()> {
        let mut command = args([
            OsStr::new("sln"),
            solution.as_os_str(),
            OsStr::new("add"),
            OsStr::new("-s"),
            OsStr::new(solution_folder),
        ]);
        command.extend(projects.iter().map(|p| p.as_os_str().to_os_string()));
        self.exec(&command).await?;
        Ok(())
    }

    async fn version(&self) -> RefswitchResult<String> {
        let stdout = self.exec(&args(["--version"])).await?;
        Ok(stdout.trim().to_string())
    }

    fn tool_name(&self) -> &str {
        &self.executable
    }
}
