//! Completions command - print a shell completion script

use crate::cli::args::Cli;
use crate::error::RefswitchResult;
use clap::CommandFactory;
use clap_complete::{generate, Shell};

/// Execute the completions command
pub fn execute(shell: Shell) -> RefswitchResult<()> {
    let mut command = Cli::command();
    generate(shell, &mut command, "refswitch", &mut std::io::stdout());
    Ok(())
}
