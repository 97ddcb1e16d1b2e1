//! .NET build tool integration
//!
//! The build tool is treated as an opaque service: solutions and project
//! references are listed and mutated through `dotnet` subcommands, never by
//! editing files directly.

mod cli;
pub mod output;
mod tool;

pub use cli::DotnetCli;
pub use output::parse_version;
pub use tool::BuildTool;

/// Oldest SDK that supports `sln add --solution-folder`
pub const MIN_SDK_VERSION: semver::Version = semver::Version::new(3, 0, 0);
