//! Arena-specific behavior tree nodes.
//!
//! Nodes read and write the [`DecisionContext`](super::DecisionContext).
//! They are divided into:
//!
//! - `conditions`: check the context and return Success/Failure
//! - `actions`: write the intent (or the target) and usually succeed

pub mod actions;
pub mod conditions;

pub use actions::*;
pub use conditions::*;
