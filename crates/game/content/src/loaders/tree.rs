//! Decision tree definition loader.

use std::path::Path;

use ron::extensions::Extensions;

use crate::formats::{TreeDefinition, TreeSet};
use crate::loaders::{LoadResult, read_file};

/// Loader for named decision tree definitions from RON files.
///
/// Only syntax and subtree references are checked here. Numeric ranges are
/// validated when the runtime compiles a tree. Optional leaf parameters are
/// written bare (`min_interval: 0.5`), without `Some(..)`.
pub struct TreeLoader;

impl TreeLoader {
    pub fn load(path: &Path) -> LoadResult<TreeSet> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<TreeSet> {
        let trees: TreeSet = ron::Options::default()
            .with_default_extension(Extensions::IMPLICIT_SOME)
            .from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse tree RON: {}", e))?;

        for (name, tree) in &trees {
            check_references(&trees, name, tree)?;
        }
        Ok(trees)
    }

    /// Trees bundled with the crate.
    pub fn embedded() -> LoadResult<TreeSet> {
        Self::parse(include_str!("../../data/trees.ron"))
    }
}

fn check_references(trees: &TreeSet, owner: &str, tree: &TreeDefinition) -> LoadResult<()> {
    match tree {
        TreeDefinition::Sequence(children) | TreeDefinition::Selector(children) => children
            .iter()
            .try_for_each(|child| check_references(trees, owner, child)),
        TreeDefinition::Inverter(child) | TreeDefinition::Succeed(child) => {
            check_references(trees, owner, child)
        }
        TreeDefinition::Subtree(name) if !trees.contains_key(name) => {
            anyhow::bail!("Tree '{}' references unknown subtree '{}'", owner, name)
        }
        TreeDefinition::Subtree(_) | TreeDefinition::Leaf(_) => Ok(()),
    }
}
