//! Condition nodes for AI behavior trees.
//!
//! Condition nodes inspect the context and return Success or Failure. They
//! never touch the intent.

use behavior_tree::{Behavior, Outcome, Status};

use crate::providers::ai::DecisionContext;

/// Succeeds while the context holds a valid target.
///
/// # Example
///
/// ```rust,ignore
/// use behavior_tree::Sequence;
/// use arena_runtime::providers::ai::nodes::*;
///
/// // Chase only when something is targeted
/// Sequence::new(vec![Box::new(HasTarget), Box::new(MoveToward)])
/// ```
pub struct HasTarget;

impl Behavior<DecisionContext> for HasTarget {
    fn tick(&self, ctx: &mut DecisionContext) -> Outcome {
        Ok(ctx.valid_target().is_some().into())
    }
}

/// Succeeds when the distance to the target lies in `[min, max]`.
///
/// Fails without a target. Errors if the entity has no position, which means
/// it was evaluated after leaving the world.
pub struct TargetInRange {
    pub min: f32,
    pub max: f32,
}

impl Behavior<DecisionContext> for TargetInRange {
    fn tick(&self, ctx: &mut DecisionContext) -> Outcome {
        let Some(offset) = ctx.offset_to_target("target_in_range")? else {
            return Ok(Status::Failure);
        };
        let distance = offset.length();
        Ok((self.min..=self.max).contains(&distance).into())
    }
}

/// Succeeds when the ability in `slot` exists and is off cooldown.
pub struct AbilityReady(pub usize);

impl Behavior<DecisionContext> for AbilityReady {
    fn tick(&self, ctx: &mut DecisionContext) -> Outcome {
        Ok(ctx.ability(self.0).is_some_and(|slot| slot.ready).into())
    }
}
