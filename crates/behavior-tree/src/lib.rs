//! Lightweight behavior tree library for per-tick decision making.
//!
//! Trees are evaluated once per simulation tick from the root and every node
//! fully resolves during that evaluation:
//!
//! - **No Running state**: nodes either succeed or fail within the tick
//! - **Failure is ordinary**: an unmet condition is `Ok(Status::Failure)`
//! - **Programmer errors propagate**: a node that finds its context missing a
//!   required field returns [`BehaviorError`], and every composite forwards it
//!   unchanged
//! - **Shareable trees**: nodes take `&self`, so one tree can drive many
//!   entities; per-entity memory belongs in the context
//!
//! # Architecture
//!
//! - [`Behavior`]: Core trait for all nodes
//! - [`Status`]: Success or Failure (no Running state)
//! - Composite nodes: [`Sequence`], [`Selector`]
//! - Decorator nodes: [`Inverter`], [`AlwaysSucceed`]
//! - [`Leaf`]: closure-backed condition or action

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod decorator;
pub mod error;
pub mod leaf;
pub mod status;

// Re-export core types for ergonomic API
pub use behavior::Behavior;
pub use composite::{Selector, Sequence};
pub use decorator::{AlwaysSucceed, Inverter};
pub use error::{BehaviorError, Outcome};
pub use leaf::Leaf;
pub use status::Status;
