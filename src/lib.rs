//! refswitch - switch NuGet package references to local project references
//!
//! Scans folders of local .NET projects, replaces every package reference
//! in a solution that a local project satisfies with a project reference,
//! and attaches the local projects to the solution. Every mutated file is
//! backed up first and restored if the run fails.

pub mod audit;
pub mod cli;
pub mod config;
pub mod dotnet;
pub mod error;
pub mod paths;
pub mod project;
pub mod store;
pub mod switch;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{RefswitchError, RefswitchResult};
