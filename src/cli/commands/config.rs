//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::{RefswitchError, RefswitchResult};
use crate::ui::{self, UiContext};
use std::path::PathBuf;

const VALID_KEYS: &[&str] = &[
    "general.log_format",
    "general.audit_log",
    "dotnet.executable",
    "dotnet.project_extensions",
    "switch.solution_folder",
    "switch.recursive",
    "switch.read_concurrency",
    "storage.cache_dir",
    "storage.backup_dir",
];

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    config: &Config,
    manager: &ConfigManager,
) -> RefswitchResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => println!("{}", manager.path().display()),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value }) => {
            set_and_save(manager, config, &key, &value).await?
        }
    }

    Ok(())
}

fn show_config(config: &Config) -> RefswitchResult<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

async fn init_config(manager: &ConfigManager, force: bool) -> RefswitchResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn_hint(
            &ctx,
            &format!("Config already exists at {}", path.display()),
            "Use --force to overwrite",
        );
        return Ok(());
    }

    manager.save(&Config::default()).await?;
    ui::step_ok_detail(
        &ctx,
        "Configuration initialized",
        &path.display().to_string(),
    );

    Ok(())
}

async fn set_and_save(
    manager: &ConfigManager,
    config: &Config,
    key: &str,
    value: &str,
) -> RefswitchResult<()> {
    let ctx = UiContext::detect();

    if !VALID_KEYS.contains(&key) {
        ui::step_error_detail(&ctx, "Unknown config key", key);
        ui::remark(&ctx, "Valid keys:");
        for key in VALID_KEYS {
            eprintln!("  {}", key);
        }
        return Err(RefswitchError::User(format!("Unknown config key: {}", key)));
    }

    let mut config = config.clone();
    set_value(&mut config, key, value)?;
    manager.save(&config).await?;
    ui::step_ok(&ctx, &format!("Set {} = {}", key, value));

    Ok(())
}

/// Apply a dot-separated `key = value` to `config`
fn set_value(config: &mut Config, key: &str, value: &str) -> RefswitchResult<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "log_format"] => {
            if !matches!(value, "text" | "json") {
                return Err(RefswitchError::User(format!(
                    "Invalid log format: {}. Use text or json",
                    value
                )));
            }
            config.general.log_format = value.to_string();
        }
        ["general", "audit_log"] => config.general.audit_log = parse_bool(value)?,

        ["dotnet", "executable"] => config.dotnet.executable = value.to_string(),
        ["dotnet", "project_extensions"] => {
            config.dotnet.project_extensions = parse_list(value)
                .into_iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect();
        }

        ["switch", "solution_folder"] => config.switch.solution_folder = value.to_string(),
        ["switch", "recursive"] => config.switch.recursive = parse_bool(value)?,
        ["switch", "read_concurrency"] => config.switch.read_concurrency = parse_usize(value)?,

        ["storage", "cache_dir"] => config.storage.cache_dir = optional_path(value),
        ["storage", "backup_dir"] => config.storage.backup_dir = optional_path(value),

        _ => {
            return Err(RefswitchError::User(format!(
                "Unknown config key: {}",
                key
            )))
        }
    }

    Ok(())
}

fn parse_bool(value: &str) -> RefswitchResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(RefswitchError::User(format!(
            "Invalid boolean value: {}. Use true/false",
            value
        ))),
    }
}

fn parse_usize(value: &str) -> RefswitchResult<usize> {
    value
        .parse()
        .map_err(|_| RefswitchError::User(format!("Invalid number: {}", value)))
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// An empty value resets the path to its default
fn optional_path(value: &str) -> Option<PathBuf> {
    (!value.is_empty()).then(|| PathBuf::from(value))
}
