//! Serialized content formats.
mod ability;
mod tree;

pub use ability::{AbilitySpec, EffectSpec};
pub use tree::{LeafDefinition, TreeDefinition, TreeSet};
