//! Reusable behavior tree subtrees.
//!
//! Subtrees are organized into two layers:
//!
//! - **Layer 1 (Patterns)**: one condition chain gating one action
//! - **Layer 2 (Tactics)**: goal-oriented selectors over several patterns
//!
//! ```text
//! tactics::melee_engagement()
//!   ├─ patterns::strike_when_in_reach()
//!   ├─ patterns::dash_when_far()
//!   └─ patterns::chase_target()
//! ```
//!
//! Every subtree returns [`BehaviorTree`] so they compose freely with each
//! other and with the engine's composites.

pub mod patterns;
pub mod tactics;

pub use super::BehaviorTree;
