//! Content loaders for reading arena data from files.
//!
//! Every loader parses, then validates, so a returned value is ready to hand
//! to the runtime. All loaders use the formats defined in [`crate::formats`].

pub mod ability;
pub mod config;
pub mod tree;

pub use ability::AbilityLoader;
pub use config::ConfigLoader;
pub use tree::TreeLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
