//! Decorator behavior nodes.
//!
//! Decorators wrap a single child behavior and modify its result.
//! This module provides [`Inverter`] (NOT logic) and [`AlwaysSucceed`] (optional branches).
//! Both take exactly one child by construction.

use crate::{Behavior, Outcome, Status};

/// Inverts the result of its child behavior.
///
/// # Semantics
///
/// - If the child returns `Success`, the inverter returns `Failure`
/// - If the child returns `Failure`, the inverter returns `Success`
/// - Errors pass through untouched
///
/// This is analogous to a logical NOT (!) operation.
pub struct Inverter<C> {
    child: Box<dyn Behavior<C>>,
}

impl<C> Inverter<C> {
    /// Creates a new inverter that wraps the given child behavior.
    pub fn new(child: Box<dyn Behavior<C>>) -> Self {
        Self { child }
    }
}

impl<C> Behavior<C> for Inverter<C> {
    fn tick(&self, ctx: &mut C) -> Outcome {
        self.child.tick(ctx).map(Status::invert)
    }
}

/// Always returns `Success`, regardless of the child's result.
///
/// # Semantics
///
/// - If the child returns `Success`, returns `Success`
/// - If the child returns `Failure`, **still returns `Success`**
/// - Errors still propagate; only ordinary failure is swallowed
///
/// Useful for optional steps inside a sequence (e.g. "face the target if there is one").
pub struct AlwaysSucceed<C> {
    child: Box<dyn Behavior<C>>,
}

impl<C> AlwaysSucceed<C> {
    /// Creates a new always-succeed wrapper around the given child behavior.
    pub fn new(child: Box<dyn Behavior<C>>) -> Self {
        Self { child }
    }
}

impl<C> Behavior<C> for AlwaysSucceed<C> {
    fn tick(&self, ctx: &mut C) -> Outcome {
        self.child.tick(ctx)?;
        Ok(Status::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BehaviorError;

    struct TestContext {
        value: i32,
    }

    struct IsPositive;
    impl Behavior<TestContext> for IsPositive {
        fn tick(&self, ctx: &mut TestContext) -> Outcome {
            Ok(Status::from_bool(ctx.value > 0))
        }
    }

    struct FailAndIncrement;
    impl Behavior<TestContext> for FailAndIncrement {
        fn tick(&self, ctx: &mut TestContext) -> Outcome {
            ctx.value += 1;
            Ok(Status::Failure)
        }
    }

    struct Broken;
    impl Behavior<TestContext> for Broken {
        fn tick(&self, _ctx: &mut TestContext) -> Outcome {
            Err(BehaviorError::missing("broken", "self_position"))
        }
    }

    #[test]
    fn inverter_inverts_success() {
        let inverter = Inverter::new(Box::new(IsPositive));

        let mut ctx = TestContext { value: 10 };
        assert_eq!(inverter.tick(&mut ctx), Ok(Status::Failure));
    }

    #[test]
    fn inverter_inverts_failure() {
        let inverter = Inverter::new(Box::new(IsPositive));

        let mut ctx = TestContext { value: -10 };
        assert_eq!(inverter.tick(&mut ctx), Ok(Status::Success));
    }

    #[test]
    fn double_inversion_is_identity() {
        let twice = Inverter::new(Box::new(Inverter::new(Box::new(IsPositive))));

        for value in [-3, 0, 3] {
            let mut ctx = TestContext { value };
            assert_eq!(twice.tick(&mut ctx), IsPositive.tick(&mut ctx));
        }
    }

    #[test]
    fn inverter_passes_errors_through() {
        let inverter = Inverter::new(Box::new(Broken));

        let mut ctx = TestContext { value: 0 };
        assert!(inverter.tick(&mut ctx).is_err());
    }

    #[test]
    fn always_succeed_on_failure() {
        let always = AlwaysSucceed::new(Box::new(FailAndIncrement));

        let mut ctx = TestContext { value: 0 };
        assert_eq!(always.tick(&mut ctx), Ok(Status::Success));
        assert_eq!(ctx.value, 1); // Child still executed
    }

    #[test]
    fn always_succeed_keeps_errors() {
        let always = AlwaysSucceed::new(Box::new(Broken));

        let mut ctx = TestContext { value: 0 };
        assert!(always.tick(&mut ctx).is_err());
    }
}
