//! Cache command - manage the metadata cache and backups

use crate::cli::args::{CacheAction, CacheArgs};
use crate::config::Config;
use crate::error::RefswitchResult;
use crate::store::{BackupManager, MetadataCache, StoreStats};
use crate::ui::{self, UiContext};
use std::path::Path;

/// Execute the cache command
pub async fn execute(args: CacheArgs, config: &Config) -> RefswitchResult<()> {
    let cache = MetadataCache::new(config.storage.cache_dir());
    let backups = BackupManager::new(config.storage.backup_dir());

    match args.action {
        CacheAction::Path => {
            println!("cache:   {}", cache.dir().display());
            println!("backups: {}", backups.dir().display());
            Ok(())
        }
        CacheAction::Info => show_info(&cache, &backups).await,
        CacheAction::Clear { backups: with_backups } => {
            clear(&cache, with_backups.then_some(&backups)).await
        }
    }
}

async fn show_info(cache: &MetadataCache, backups: &BackupManager) -> RefswitchResult<()> {
    let ctx = UiContext::detect();

    ui::section(&ctx, "Metadata cache");
    print_stats(&ctx, cache.dir(), cache.stats().await?);

    ui::section(&ctx, "Backups");
    print_stats(&ctx, backups.dir(), backups.stats().await?);

    Ok(())
}

fn print_stats(ctx: &UiContext, dir: &Path, stats: StoreStats) {
    ui::key_value(ctx, "Location", &dir.display().to_string());
    ui::key_value(ctx, "Entries", &stats.entries.to_string());
    ui::key_value(ctx, "Size", &format_size(stats.bytes));
}

async fn clear(cache: &MetadataCache, backups: Option<&BackupManager>) -> RefswitchResult<()> {
    let ctx = UiContext::detect();

    let removed = cache.clear().await?;
    ui::step_ok(&ctx, &format!("Removed {} cached project(s)", removed));

    if let Some(backups) = backups {
        let removed = backups.clear().await?;
        ui::step_ok(&ctx, &format!("Removed {} backup(s)", removed));
    }

    Ok(())
}

/// Format bytes as human-readable size
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
