//! Closure-backed leaf nodes.

use crate::{Behavior, Outcome};

/// A terminal node backed by a closure.
///
/// Handy for one-off conditions and for tests; game code with real logic
/// usually implements [`Behavior`] on a named struct instead.
pub struct Leaf<F> {
    name: &'static str,
    run: F,
}

impl<F> Leaf<F> {
    pub fn new(name: &'static str, run: F) -> Self {
        Self { name, run }
    }

    /// Name used in logs.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<C, F> Behavior<C> for Leaf<F>
where
    F: Fn(&mut C) -> Outcome + Send + Sync,
{
    #[inline]
    fn tick(&self, ctx: &mut C) -> Outcome {
        (self.run)(ctx)
    }
}
