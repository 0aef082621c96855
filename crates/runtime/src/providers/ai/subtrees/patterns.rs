//! Layer 1: Basic if-then patterns.
//!
//! Each pattern gates one action behind its conditions and fails when the
//! conditions do not hold, so patterns slot directly into a priority
//! selector.
//!
//! # Naming Convention
//!
//! Patterns follow the `action_when_condition()` convention where there is a
//! condition to name.

use std::ops::RangeInclusive;
use std::time::Duration;

use behavior_tree::builder::{always_succeed, inverter, sequence};

use super::BehaviorTree;
use crate::providers::ai::nodes::{
    AbilityReady, AcquireTarget, FaceTarget, HasTarget, Idle, MoveAway, MoveToward, RequestAbility,
    RequestDash, TargetInRange,
};

// ============================================================================
// Perception Patterns
// ============================================================================

/// Refresh the target on a throttled schedule. Always succeeds.
///
/// Put this first in a root sequence so the rest of the tree sees a current
/// target without the search gating anything.
pub fn keep_target_fresh(search: RangeInclusive<Duration>) -> BehaviorTree {
    always_succeed(Box::new(AcquireTarget::new(*search.start(), *search.end())))
}

// ============================================================================
// Combat Patterns
// ============================================================================

/// Cast the ability in `slot` when the target is within `reach`.
pub fn strike_when_in_reach(slot: usize, reach: f32) -> BehaviorTree {
    sequence(vec![
        Box::new(HasTarget),
        Box::new(TargetInRange { min: 0.0, max: reach }),
        Box::new(FaceTarget),
        Box::new(AbilityReady(slot)),
        Box::new(RequestAbility(slot)),
    ])
}

/// Cast the ability in `slot` at the target from any distance.
pub fn cast_at_target(slot: usize) -> BehaviorTree {
    sequence(vec![
        Box::new(HasTarget),
        Box::new(FaceTarget),
        Box::new(AbilityReady(slot)),
        Box::new(RequestAbility(slot)),
    ])
}

// ============================================================================
// Movement Patterns
// ============================================================================

/// Dash at the target when its distance lies in `band`.
pub fn dash_when_far(band: RangeInclusive<f32>) -> BehaviorTree {
    sequence(vec![
        Box::new(HasTarget),
        Box::new(TargetInRange {
            min: *band.start(),
            max: *band.end(),
        }),
        Box::new(MoveToward),
        Box::new(RequestDash),
    ])
}

/// Move toward the target.
pub fn chase_target() -> BehaviorTree {
    sequence(vec![Box::new(HasTarget), Box::new(MoveToward)])
}

/// Back away when the target is closer than `distance`.
pub fn retreat_when_close(distance: f32) -> BehaviorTree {
    sequence(vec![
        Box::new(HasTarget),
        Box::new(TargetInRange {
            min: 0.0,
            max: distance,
        }),
        Box::new(MoveAway),
    ])
}

/// Close in when the target is further than `distance`.
pub fn approach_when_far(distance: f32) -> BehaviorTree {
    sequence(vec![
        Box::new(HasTarget),
        inverter(Box::new(TargetInRange {
            min: 0.0,
            max: distance,
        })),
        Box::new(MoveToward),
    ])
}

// ============================================================================
// Fallback Patterns
// ============================================================================

/// Stand still. Always succeeds.
///
/// Every complete AI should include this as the final selector option.
pub fn idle_fallback() -> BehaviorTree {
    Box::new(Idle)
}
