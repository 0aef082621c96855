//! Data-driven content definitions and loaders.
//!
//! This crate houses the serialized forms of arena content and loaders for
//! RON/TOML data files:
//! - Ability catalogs (RON): cooldowns and effect pipelines by effect name
//! - Decision tree definitions (RON): named trees of composites and leaves
//! - Arena configuration (TOML)
//!
//! Formats carry names and plain numbers only. Resolving effect names and
//! compiling trees happens in the runtime, which owns the executors and the
//! leaf implementations.

pub mod formats;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use formats::{AbilitySpec, EffectSpec, LeafDefinition, TreeDefinition, TreeSet};

#[cfg(feature = "loaders")]
pub use loaders::{AbilityLoader, ConfigLoader, LoadResult, TreeLoader};
