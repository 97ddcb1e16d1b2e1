//! refswitch - package-to-project reference switcher
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use refswitch::cli::{Cli, Commands};
use refswitch::config::{Config, ConfigManager};
use refswitch::error::RefswitchResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> RefswitchResult<()> {
    let cli = Cli::parse();

    // Completions must not print anything besides the script
    if let Commands::Completions { shell } = cli.command {
        return refswitch::cli::commands::completions(shell);
    }

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };

    // Config errors are reported after logging is up, with default settings
    let loaded = config_manager.load().await;
    let log_format = loaded
        .as_ref()
        .map(|c| c.general.log_format.as_str())
        .unwrap_or("text");
    init_logging(cli.verbose, log_format);
    let config: Config = loaded?;
    debug!("Loaded configuration from {}", config_manager.path().display());

    refswitch::ui::init_theme();

    match cli.command {
        Commands::Completions { .. } => unreachable!("Completions handled above"),
        Commands::Switch(args) => refswitch::cli::commands::switch(args, &config).await,
        Commands::Index(args) => refswitch::cli::commands::index(args, &config).await,
        Commands::Restore(args) => refswitch::cli::commands::restore(args, &config).await,
        Commands::Cache(args) => refswitch::cli::commands::cache(args, &config).await,
        Commands::Status => refswitch::cli::commands::status(&config, &config_manager).await,
        Commands::Config(args) => {
            refswitch::cli::commands::config(args, &config, &config_manager).await
        }
    }
}

/// 0 = warn, 1 = info, 2+ = debug
fn init_logging(verbose: u8, format: &str) {
    let filter = match verbose {
        0 => EnvFilter::new("refswitch=warn"),
        1 => EnvFilter::new("refswitch=info"),
        _ => EnvFilter::new("refswitch=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if format == "json" {
        builder.json().init();
    } else {
        builder.with_target(false).without_time().init();
    }
}
