//! Layer 2: Goal-oriented tactical behaviors.
//!
//! Tactics combine patterns to achieve one combat goal. Each tactic fails
//! only when none of its patterns apply, leaving the caller to fall back.

use std::ops::RangeInclusive;

use behavior_tree::builder::selector;

use super::{BehaviorTree, patterns};

/// Melee engagement: strike in reach, dash across `dash_band`, otherwise
/// chase.
pub fn melee_engagement(slot: usize, reach: f32, dash_band: RangeInclusive<f32>) -> BehaviorTree {
    selector(vec![
        patterns::strike_when_in_reach(slot, reach),
        patterns::dash_when_far(dash_band),
        patterns::chase_target(),
    ])
}

/// Kiting: keep the target between `keep_away` and `max_range` and cast
/// whenever the ability is ready.
pub fn kiting(slot: usize, keep_away: f32, max_range: f32) -> BehaviorTree {
    selector(vec![
        patterns::retreat_when_close(keep_away),
        patterns::approach_when_far(max_range),
        patterns::cast_at_target(slot),
    ])
}
