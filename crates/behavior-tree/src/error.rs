//! Errors raised by behavior nodes.
//!
//! Only programmer errors live here. A condition that does not hold is a
//! [`Status::Failure`](crate::Status::Failure), never an error.

use thiserror::Error;

use crate::Status;

/// Result of evaluating a node.
pub type Outcome = Result<Status, BehaviorError>;

/// A node could not be evaluated because the tree or its context is broken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BehaviorError {
    /// The context lacks a field the node cannot work without.
    #[error("node `{node}` requires context field `{field}`")]
    MissingContext {
        node: &'static str,
        field: &'static str,
    },

    /// The node detected a broken invariant in its own configuration.
    #[error("node `{node}` is misconfigured: {reason}")]
    Misconfigured { node: &'static str, reason: String },
}

impl BehaviorError {
    /// Shorthand for [`BehaviorError::MissingContext`].
    pub const fn missing(node: &'static str, field: &'static str) -> Self {
        Self::MissingContext { node, field }
    }
}
