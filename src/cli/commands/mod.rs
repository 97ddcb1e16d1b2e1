//! CLI command implementations

pub mod cache;
pub mod completions;
pub mod config;
pub mod index;
pub mod restore;
pub mod status;
pub mod switch;

pub use cache::execute as cache;
pub use completions::execute as completions;
pub use config::execute as config;
pub use index::execute as index;
pub use restore::execute as restore;
pub use status::execute as status;
pub use switch::execute as switch;

use crate::config::Config;
use crate::dotnet::{BuildTool, DotnetCli};
use crate::project::ProjectReader;
use crate::store::MetadataCache;
use std::sync::Arc;

/// Project reader wired to the configured build tool and cache
pub(crate) fn project_reader(config: &Config, no_cache: bool) -> ProjectReader {
    let tool: Arc<dyn BuildTool> = Arc::new(DotnetCli::new(&config.dotnet.executable));
    ProjectReader::new(
        tool,
        MetadataCache::new(config.storage.cache_dir()),
        !no_cache,
    )
}
