//! Status command - check the build tool and show storage locations

use crate::config::{Config, ConfigManager};
use crate::dotnet::{parse_version, BuildTool, DotnetCli, MIN_SDK_VERSION};
use crate::error::RefswitchResult;
use console::{style, Emoji};

static CHECK: Emoji<'_, '_> = Emoji("✓ ", "[OK] ");
static CROSS: Emoji<'_, '_> = Emoji("✗ ", "[FAIL] ");
static WARN: Emoji<'_, '_> = Emoji("⚠ ", "[WARN] ");

/// Execute the status command
pub async fn execute(config: &Config, manager: &ConfigManager) -> RefswitchResult<()> {
    println!("{}", style("refswitch status").bold().cyan());

    let sdk_ok = check_dotnet(config).await;

    println!();
    println!("{}", style("Locations:").bold());
    let config_state = if manager.path().exists() {
        "exists"
    } else {
        "defaults"
    };
    println!(
        "  Config:  {} ({})",
        manager.path().display(),
        style(config_state).dim()
    );
    println!("  Cache:   {}", config.storage.cache_dir().display());
    println!("  Backups: {}", config.storage.backup_dir().display());
    if config.general.audit_log {
        println!("  Audit:   {}", ConfigManager::audit_log_path().display());
    } else {
        println!("  Audit:   {}", style("disabled").dim());
    }

    println!();
    if sdk_ok {
        println!("{}", style("All critical checks passed").green().bold());
    } else {
        println!(
            "{}",
            style("Some checks failed - see above for details")
                .yellow()
                .bold()
        );
    }

    Ok(())
}

async fn check_dotnet(config: &Config) -> bool {
    println!();
    println!("{}", style(".NET SDK:").bold());

    let dotnet = DotnetCli::new(&config.dotnet.executable);
    if !dotnet.is_installed().await {
        println!(
            "  {} {} - Install from https://dot.net",
            CROSS,
            style(format!("{} not found", config.dotnet.executable)).red()
        );
        return false;
    }

    println!("  {} {}", CHECK, style("Installed").green());

    let raw = match dotnet.version().await {
        Ok(raw) => raw,
        Err(e) => {
            println!("  {} {} - {}", CROSS, style("Version check failed").red(), e);
            return false;
        }
    };

    match parse_version(&raw) {
        Some(version) if version >= MIN_SDK_VERSION => {
            println!("  {} Version: {}", CHECK, version);
            true
        }
        Some(version) => {
            println!(
                "  {} Version {} - solution folders need {} or newer",
                CROSS,
                style(version).red(),
                MIN_SDK_VERSION
            );
            false
        }
        None => {
            println!(
                "  {} {} '{}'",
                WARN,
                style("Unrecognized version").yellow(),
                raw.trim()
            );
            true
        }
    }
}
