//! Behavior tree AI for non-player entities.
//!
//! Decision making runs in three steps every tick:
//!
//! 1. **Refresh**: the provider copies the entity's ability readiness into its
//!    [`DecisionContext`] and clears the intent
//! 2. **Evaluate**: the shared [`CompiledTree`] runs once from the root
//! 3. **Emit**: the assembled intent is handed to the entity's controller
//!
//! # Core Components
//!
//! - [`BehaviorTreeProvider`]: the [`IntentProvider`](crate::providers::IntentProvider)
//!   for AI entities
//! - [`DecisionContext`]: per-entity blackboard with spatial queries
//! - [`nodes`]: conditions and actions over the context
//! - [`subtrees`]: reusable patterns and tactics
//! - [`presets`]: complete archetypes built from subtrees
//! - [`build`], [`build_named`], [`build_all`]: compile data-driven definitions

pub mod context;
pub mod definition;
pub mod memory;
pub mod nodes;
pub mod presets;
pub mod provider;
pub mod subtrees;

use behavior_tree::Behavior;

pub use context::DecisionContext;
pub use definition::{BuildError, CompiledTree, TreeRequirements, build, build_all, build_named};
pub use memory::{MemoryKey, NodeMemory, SearchThrottle};
pub use provider::BehaviorTreeProvider;

/// Boxed tree node over the decision context.
pub type BehaviorTree = Box<dyn Behavior<DecisionContext>>;
