//! Ability catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use crate::formats::AbilitySpec;
use crate::loaders::{LoadResult, read_file};

/// Loader for ability catalogs from RON files.
///
/// A catalog is a list of [`AbilitySpec`]s. Effect names are not resolved
/// here; the runtime checks them against its effect registry.
pub struct AbilityLoader;

impl AbilityLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<AbilitySpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse a catalog and check ids and timings.
    pub fn parse(content: &str) -> LoadResult<Vec<AbilitySpec>> {
        let specs: Vec<AbilitySpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ability catalog RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for spec in &specs {
            if !seen.insert(spec.id) {
                anyhow::bail!("Duplicate ability id {} ({})", spec.id, spec.name);
            }
            spec.validate()
                .map_err(|e| anyhow::anyhow!("Invalid ability {} ({}): {}", spec.id, spec.name, e))?;
        }

        Ok(specs)
    }

    /// Catalog bundled with the crate.
    pub fn embedded() -> LoadResult<Vec<AbilitySpec>> {
        Self::parse(include_str!("../../data/abilities.ron"))
    }
}
