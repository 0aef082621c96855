//! Action nodes for AI behavior trees.
//!
//! Action nodes write the tick's [`InputIntent`](arena_core::InputIntent).
//! Nothing happens until the state machine consumes it.

use std::ops::RangeInclusive;
use std::time::Duration;

use behavior_tree::{Behavior, Outcome, Status};
use tracing::debug;

use crate::providers::ai::{DecisionContext, MemoryKey};

/// Throttled target acquisition.
///
/// Searches for the nearest target at most once per interval, with the
/// interval drawn per entity from `[min, max]` so entities spawned together
/// do not search in lockstep. Stores the result as the context's target and
/// succeeds if there is one.
pub struct AcquireTarget {
    key: MemoryKey,
    interval: RangeInclusive<Duration>,
}

impl AcquireTarget {
    /// `min` must not exceed `max`.
    pub fn new(min: Duration, max: Duration) -> Self {
        Self {
            key: MemoryKey::next(),
            interval: min..=max,
        }
    }

    pub fn key(&self) -> MemoryKey {
        self.key
    }
}

impl Behavior<DecisionContext> for AcquireTarget {
    fn tick(&self, ctx: &mut DecisionContext) -> Outcome {
        ctx.target = ctx.search_target(self.key, self.interval.clone());
        Ok(ctx.target.is_some().into())
    }
}

/// Moves straight toward the target.
pub struct MoveToward;

impl Behavior<DecisionContext> for MoveToward {
    fn tick(&self, ctx: &mut DecisionContext) -> Outcome {
        let Some(offset) = ctx.offset_to_target("move_toward")? else {
            return Ok(Status::Failure);
        };
        ctx.intent.set_movement(offset.normalize_or_zero());
        Ok(Status::Success)
    }
}

/// Moves straight away from the target.
pub struct MoveAway;

impl Behavior<DecisionContext> for MoveAway {
    fn tick(&self, ctx: &mut DecisionContext) -> Outcome {
        let Some(offset) = ctx.offset_to_target("move_away")? else {
            return Ok(Status::Failure);
        };
        ctx.intent.set_movement(-offset.normalize_or_zero());
        Ok(Status::Success)
    }
}

/// Turns to face the target and aims the next ability at it.
pub struct FaceTarget;

impl Behavior<DecisionContext> for FaceTarget {
    fn tick(&self, ctx: &mut DecisionContext) -> Outcome {
        let Some(offset) = ctx.offset_to_target("face_target")? else {
            return Ok(Status::Failure);
        };
        ctx.intent.face(offset);
        ctx.intent.target = ctx.target;
        Ok(Status::Success)
    }
}

/// Requests the ability in a slot.
///
/// Fails if the slot is empty or on cooldown, so it can gate the rest of a
/// sequence.
pub struct RequestAbility(pub usize);

impl Behavior<DecisionContext> for RequestAbility {
    fn tick(&self, ctx: &mut DecisionContext) -> Outcome {
        match ctx.ability(self.0) {
            Some(slot) if slot.ready => {
                ctx.intent.ability_requested = Some(slot.id);
                ctx.intent.target = ctx.target;
                Ok(Status::Success)
            }
            Some(_) => Ok(Status::Failure),
            None => {
                debug!(target: "arena::ai", entity = %ctx.entity, slot = self.0, "no ability in slot");
                Ok(Status::Failure)
            }
        }
    }
}

/// Requests a dash along the current movement (or facing).
pub struct RequestDash;

impl Behavior<DecisionContext> for RequestDash {
    fn tick(&self, ctx: &mut DecisionContext) -> Outcome {
        ctx.intent.dash_requested = true;
        Ok(Status::Success)
    }
}

/// Requests an interaction with whatever the entity faces.
pub struct Interact;

impl Behavior<DecisionContext> for Interact {
    fn tick(&self, ctx: &mut DecisionContext) -> Outcome {
        ctx.intent.interact_requested = true;
        Ok(Status::Success)
    }
}

/// Stands still. Always succeeds; use it as the last selector option.
pub struct Idle;

impl Behavior<DecisionContext> for Idle {
    fn tick(&self, ctx: &mut DecisionContext) -> Outcome {
        ctx.intent.move_vector = arena_core::Vec2::ZERO;
        Ok(Status::Success)
    }
}
