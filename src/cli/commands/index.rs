//! Index command - list the local projects available for switching

use crate::cli::args::{IndexArgs, OutputFormat};
use crate::cli::commands::project_reader;
use crate::config::Config;
use crate::error::{RefswitchError, RefswitchResult};
use crate::project::{LocalProjectIndex, ProjectDescription};
use crate::ui::{ReadProgress, UiContext};
use console::style;
use std::path::PathBuf;

/// Execute the index command
pub async fn execute(args: IndexArgs, config: &Config) -> RefswitchResult<()> {
    let missing: Vec<PathBuf> = args
        .folders
        .iter()
        .filter(|f| !f.is_dir())
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(RefswitchError::ProjectFoldersMissing(missing));
    }

    let reader = project_reader(config, args.no_cache);

    // Progress output would corrupt machine-readable formats
    let ctx = match args.format {
        OutputFormat::Table => UiContext::detect(),
        OutputFormat::Json | OutputFormat::Plain => UiContext::non_interactive(),
    };
    let progress = matches!(args.format, OutputFormat::Table)
        .then(|| ReadProgress::new(&ctx, "local projects"));

    let index = LocalProjectIndex::build(
        &reader,
        &args.folders,
        &config.dotnet.project_extensions,
        config.switch.concurrency(),
        &|d| {
            if let Some(ref p) = progress {
                p.on_read(d.name());
            }
        },
    )
    .await;
    if let Some(ref p) = progress {
        p.finish();
    }
    let index = index?;

    if index.is_empty() {
        if matches!(args.format, OutputFormat::Json) {
            println!("[]");
        } else {
            println!("No projects found.");
        }
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => print_table(index.projects()),
        OutputFormat::Json => print_json(index.projects())?,
        OutputFormat::Plain => print_plain(index.projects()),
    }

    Ok(())
}

fn print_table(projects: &[ProjectDescription]) {
    println!(
        "{:<30} {:<36} {:>8} {:>10}  {}",
        "NAME", "ASSEMBLY", "PACKAGES", "REFERENCES", "PATH"
    );
    println!("{}", "-".repeat(100));

    for project in projects {
        let assembly = if project.assembly_name().is_empty() {
            style("-").dim().to_string()
        } else {
            project.assembly_name().to_string()
        };

        println!(
            "{:<30} {:<36} {:>8} {:>10}  {}",
            project.name(),
            assembly,
            project.packages().len(),
            project.references().len(),
            project.path().display()
        );
    }

    println!();
    println!("Total: {} project(s)", projects.len());
}

fn print_json(projects: &[ProjectDescription]) -> RefswitchResult<()> {
    println!("{}", serde_json::to_string_pretty(projects)?);
    Ok(())
}

fn print_plain(projects: &[ProjectDescription]) {
    for project in projects {
        println!("{}", project.path().display());
    }
}
