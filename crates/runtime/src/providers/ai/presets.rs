//! Complete AI definitions for common archetypes.
//!
//! # Architecture
//!
//! Presets are composed from the subtree layers:
//!
//! ```text
//! brute()
//!   └─ Sequence
//!       ├─ patterns::keep_target_fresh()
//!       └─ Selector
//!           ├─ tactics::melee_engagement()   ← Layer 2
//!           └─ patterns::idle_fallback()     ← Layer 1
//! ```
//!
//! Data-driven trees loaded from RON replace a preset of the same name.

use std::ops::RangeInclusive;
use std::time::Duration;

use behavior_tree::builder::{selector, sequence};

use super::subtrees::{patterns, tactics};
use super::{CompiledTree, TreeRequirements};

/// Melee reach of the brute's slot-0 ability.
pub const BRUTE_REACH: f32 = 1.5;
/// Distances at which the brute dashes in.
pub const BRUTE_DASH_BAND: RangeInclusive<f32> = 4.0..=10.0;
/// Closer than this and the kiter backs off.
pub const KITER_KEEP_AWAY: f32 = 3.0;
/// Further than this and the kiter closes in.
pub const KITER_MAX_RANGE: f32 = 8.0;

/// Brute: chases the nearest hostile, dashes to close distance and uses its
/// first ability in melee range.
///
/// Needs one learned ability.
pub fn brute(search: RangeInclusive<Duration>) -> CompiledTree {
    CompiledTree::new(
        sequence(vec![
            patterns::keep_target_fresh(search),
            selector(vec![
                tactics::melee_engagement(0, BRUTE_REACH, BRUTE_DASH_BAND),
                patterns::idle_fallback(),
            ]),
        ]),
        TreeRequirements { ability_slots: 1 },
    )
}

/// Kiter: keeps its distance and casts its first ability whenever ready.
///
/// Needs one learned ability.
pub fn kiter(search: RangeInclusive<Duration>) -> CompiledTree {
    CompiledTree::new(
        sequence(vec![
            patterns::keep_target_fresh(search),
            selector(vec![
                tactics::kiting(0, KITER_KEEP_AWAY, KITER_MAX_RANGE),
                patterns::idle_fallback(),
            ]),
        ]),
        TreeRequirements { ability_slots: 1 },
    )
}

/// Training dummy: never acts.
pub fn dummy() -> CompiledTree {
    CompiledTree::new(patterns::idle_fallback(), TreeRequirements::default())
}

/// Every preset by name.
pub fn all(search: RangeInclusive<Duration>) -> Vec<(&'static str, CompiledTree)> {
    vec![
        ("brute", brute(search.clone())),
        ("kiter", kiter(search)),
        ("dummy", dummy()),
    ]
}
