//! Switch command - replace package references with local projects

use crate::audit::AuditLog;
use crate::cli::args::SwitchArgs;
use crate::cli::commands::project_reader;
use crate::config::Config;
use crate::error::RefswitchResult;
use crate::store::BackupManager;
use crate::switch::{SwitchContext, SwitchReport, Switcher};
use crate::ui::{self, ReadProgress, TaskSpinner, UiContext};
use console::style;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Execute the switch command
pub async fn execute(args: SwitchArgs, config: &Config) -> RefswitchResult<()> {
    let ctx = UiContext::detect();
    let json = args.json;

    let context = run_context(args, config);
    context.validate()?;

    let dry_run = context.dry_run;
    let reader = project_reader(config, context.disable_cache);
    let audit = AuditLog::new(config);
    debug!("Switch run {}", audit.run_id());

    let switcher = Switcher::new(
        context,
        reader,
        BackupManager::new(config.storage.backup_dir()),
        audit,
    )
    .with_interrupt(interrupt_flag());

    let title = if dry_run {
        "refswitch (dry run)"
    } else {
        "refswitch"
    };
    ui::intro(&ctx, title);

    let progress = ReadProgress::new(&ctx, "local projects");
    let index = switcher.build_index(&|d| progress.on_read(d.name())).await;
    progress.finish();
    let index = index?;
    ui::step_ok_detail(
        &ctx,
        "Indexed local projects",
        &format!("{} found", index.len()),
    );

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start(if dry_run {
        "Planning reference switch..."
    } else {
        "Switching references..."
    });

    let report = match switcher.switch(&index).await {
        Ok(report) => {
            spinner.clear();
            report
        }
        Err(e) => {
            spinner.stop_error("Switch failed, touched files were restored");
            return Err(e);
        }
    };

    print_report(&ctx, &report, &switcher.context().solution_folder);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

/// Config values overridden by command-line flags
fn run_context(args: SwitchArgs, config: &Config) -> SwitchContext {
    let mut context = SwitchContext::from_config(config, args.solution, args.folders);
    if args.recursive {
        context.recursive = true;
    } else if args.no_recursive {
        context.recursive = false;
    }
    context.dry_run = args.dry_run;
    context.disable_cache = args.no_cache;
    if let Some(folder) = args.solution_folder {
        context.solution_folder = folder;
    }
    context
}

/// Flag set on Ctrl-C so the engine can stop and roll back
fn interrupt_flag() -> Arc<AtomicBool> {
    let flag = Arc::new(AtomicBool::new(false));
    let handle = flag.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                warn!("Interrupt received, stopping after the current project");
                handle.store(true, Ordering::SeqCst);
            }
            Err(e) => debug!("Cannot listen for Ctrl-C: {}", e),
        }
    });
    flag
}

fn print_report(ctx: &UiContext, report: &SwitchReport, solution_folder: &str) {
    for replacement in &report.replacements {
        ui::step_ok(
            ctx,
            &format!(
                "{}: {} -> {}",
                file_name(&replacement.project),
                style(&replacement.package).cyan(),
                replacement.local_project.display()
            ),
        );
    }

    if report.nothing_to_add() {
        ui::outro_success(ctx, "Nothing to add");
        return;
    }

    for project in &report.attached {
        ui::remark(ctx, &project.display().to_string());
    }

    let verb = if report.dry_run { "Would attach" } else { "Attached" };
    ui::outro_success(
        ctx,
        &format!(
            "{} {} project(s) under '{}' ({} replacement(s) in {} project(s))",
            verb,
            report.attached.len(),
            solution_folder,
            report.replacements.len(),
            report.visited.len()
        ),
    );
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
