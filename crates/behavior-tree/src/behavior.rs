//! Core behavior trait.
//!
//! This module defines the [`Behavior`] trait, which is the fundamental
//! abstraction for all behavior tree nodes. The trait is generic over a
//! context type `C`, allowing nodes to read the entity's blackboard and write
//! its requests.

use crate::Outcome;

/// A behavior tree node that can be evaluated against a context.
///
/// Nodes take `&self`: a built tree is immutable and may be shared by many
/// entities. Anything a node must remember between ticks is stored in the
/// context.
pub trait Behavior<C>: Send + Sync {
    /// Evaluate this behavior node against the given context.
    ///
    /// # Returns
    ///
    /// - `Ok(Status::Success)` if the behavior succeeded
    /// - `Ok(Status::Failure)` if the behavior failed
    /// - `Err(_)` if the context is missing something the node requires
    fn tick(&self, ctx: &mut C) -> Outcome;
}

/// Blanket implementation for boxed behaviors.
///
/// This allows `Box<dyn Behavior<C>>` to also implement `Behavior<C>`,
/// enabling dynamic dispatch and heterogeneous collections of nodes.
impl<C> Behavior<C> for Box<dyn Behavior<C>> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Outcome {
        (**self).tick(ctx)
    }
}
