//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// refswitch - switch package references to local project references
///
/// Replaces every NuGet package reference in a solution that a local
/// project satisfies with a project reference, and adds those projects to
/// the solution.
#[derive(Parser, Debug)]
#[command(name = "refswitch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "REFSWITCH_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Switch package references in a solution to local projects
    Switch(SwitchArgs),

    /// List the local projects found in the given folders
    Index(IndexArgs),

    /// Restore project files from their last backup
    Restore(RestoreArgs),

    /// Manage the metadata cache and backups
    Cache(CacheArgs),

    /// Check the build tool and show storage locations
    Status,

    /// Show or edit configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

/// Arguments for the switch command
#[derive(Parser, Debug)]
pub struct SwitchArgs {
    /// Solution file to rewrite
    pub solution: PathBuf,

    /// Folder to scan for local projects (repeatable)
    #[arg(short = 'f', long = "folder", value_name = "FOLDER")]
    pub folders: Vec<PathBuf>,

    /// Follow project references transitively
    #[arg(short, long)]
    pub recursive: bool,

    /// Only touch the solution's own projects, even if config enables recursion
    #[arg(long, conflicts_with = "recursive")]
    pub no_recursive: bool,

    /// Report what would change without touching any file
    #[arg(long)]
    pub dry_run: bool,

    /// Ignore cached project metadata
    #[arg(long)]
    pub no_cache: bool,

    /// Solution folder receiving the attached projects (default: from config)
    #[arg(long)]
    pub solution_folder: Option<String>,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the index command
#[derive(Parser, Debug)]
pub struct IndexArgs {
    /// Folder to scan for local projects (repeatable)
    #[arg(short = 'f', long = "folder", value_name = "FOLDER", required = true)]
    pub folders: Vec<PathBuf>,

    /// Ignore cached project metadata
    #[arg(long)]
    pub no_cache: bool,

    /// Output format
    #[arg(long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the restore command
#[derive(Parser, Debug)]
pub struct RestoreArgs {
    /// Project or solution files to restore
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., switch.solution_folder)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Output format for listings
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Subcommand for cache
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Show the metadata cache and backup directories
    Path,

    /// Show entry counts and sizes
    Info,

    /// Delete cached metadata
    Clear {
        /// Also delete backups
        #[arg(long)]
        backups: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_switch() {
        let cli = Cli::parse_from([
            "refswitch",
            "switch",
            "App.sln",
            "-f",
            "../libs",
            "--folder",
            "../shared",
            "--recursive",
        ]);
        match cli.command {
            Commands::Switch(args) => {
                assert_eq!(args.solution, PathBuf::from("App.sln"));
                assert_eq!(
                    args.folders,
                    vec![PathBuf::from("../libs"), PathBuf::from("../shared")]
                );
                assert!(args.recursive);
                assert!(!args.dry_run);
                assert!(args.solution_folder.is_none());
            }
            _ => panic!("expected Switch command"),
        }
    }

    #[test]
    fn cli_switch_allows_empty_folders() {
        let cli = Cli::parse_from(["refswitch", "switch", "App.sln", "--dry-run"]);
        match cli.command {
            Commands::Switch(args) => {
                assert!(args.folders.is_empty());
                assert!(args.dry_run);
            }
            _ => panic!("expected Switch command"),
        }
    }

    #[test]
    fn cli_index_requires_folder() {
        assert!(Cli::try_parse_from(["refswitch", "index"]).is_err());
        let cli = Cli::parse_from(["refswitch", "index", "-f", "libs", "--format", "json"]);
        match cli.command {
            Commands::Index(args) => assert!(matches!(args.format, OutputFormat::Json)),
            _ => panic!("expected Index command"),
        }
    }

    #[test]
    fn cli_parses_cache_clear() {
        let cli = Cli::parse_from(["refswitch", "cache", "clear", "--backups"]);
        match cli.command {
            Commands::Cache(CacheArgs {
                action: CacheAction::Clear { backups },
            }) => assert!(backups),
            _ => panic!("expected Cache clear command"),
        }
    }

    #[test]
    fn cli_parses_completions() {
        let cli = Cli::parse_from(["refswitch", "completions", "zsh"]);
        assert!(matches!(
            cli.command,
            Commands::Completions { shell: Shell::Zsh }
        ));
    }

    #[test]
    fn cli_verbose_levels() {
        let cli = Cli::parse_from(["refswitch", "status"]);
        assert_eq!(cli.verbose, 0);

        let cli = Cli::parse_from(["refswitch", "-v", "status"]);
        assert_eq!(cli.verbose, 1);

        let cli = Cli::parse_from(["refswitch", "-vv", "status"]);
        assert_eq!(cli.verbose, 2);
    }
}
