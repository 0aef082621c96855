//! Decision context: the per-entity blackboard read and written during one
//! tree evaluation.
//!
//! A context is created when an AI entity spawns and lives as long as the
//! entity. Each tick the provider refreshes the ability snapshot and clears
//! the intent; the current target and node memory carry over.
use std::fmt;
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;

use arena_core::{AbilitySlot, EntityId, InputIntent, SpatialQuery, TargetProvider, Vec2};
use behavior_tree::BehaviorError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use super::memory::{MemoryKey, NodeMemory};

pub struct DecisionContext {
    /// The entity making the decision.
    pub entity: EntityId,

    /// Current target, if any. Cleared by nodes once it becomes invalid.
    pub target: Option<EntityId>,

    /// Intent being assembled this tick.
    pub intent: InputIntent,

    abilities: Vec<AbilitySlot>,
    delta: Duration,
    memory: NodeMemory,
    rng: ChaCha8Rng,
    spatial: Arc<dyn SpatialQuery>,
    targets: Arc<dyn TargetProvider>,
}

impl DecisionContext {
    /// Creates a context. The RNG is seeded from the entity id so throttle
    /// timings are reproducible per entity but differ between entities.
    pub fn new(
        entity: EntityId,
        spatial: Arc<dyn SpatialQuery>,
        targets: Arc<dyn TargetProvider>,
    ) -> Self {
        Self {
            entity,
            target: None,
            intent: InputIntent::default(),
            abilities: Vec::new(),
            delta: Duration::ZERO,
            memory: NodeMemory::default(),
            rng: ChaCha8Rng::seed_from_u64(u64::from(entity.0)),
            spatial,
            targets,
        }
    }

    /// Prepares for a new evaluation.
    pub fn begin_tick(&mut self, abilities: &[AbilitySlot], delta: Duration) {
        self.abilities.clear();
        self.abilities.extend_from_slice(abilities);
        self.delta = delta;
        self.intent.reset();
    }

    pub fn abilities(&self) -> &[AbilitySlot] {
        &self.abilities
    }

    pub fn ability(&self, slot: usize) -> Option<AbilitySlot> {
        self.abilities.get(slot).copied()
    }

    /// Time since the previous evaluation.
    pub fn delta(&self) -> Duration {
        self.delta
    }

    pub fn memory(&self) -> &NodeMemory {
        &self.memory
    }

    /// Drops the target and all node memory, so the next evaluation starts
    /// as if the entity had just spawned.
    pub fn forget(&mut self) {
        self.target = None;
        self.memory.clear();
        self.intent.reset();
    }

    /// Own position. Every spatial node needs it, so its absence is an error
    /// rather than a failure.
    pub fn self_position(&self, node: &'static str) -> Result<Vec2, BehaviorError> {
        self.spatial
            .position(self.entity)
            .ok_or(BehaviorError::missing(node, "self_position"))
    }

    /// Position of the current target, dropping the target if it is gone.
    pub fn target_position(&mut self) -> Option<Vec2> {
        let target = self.valid_target()?;
        self.spatial.position(target)
    }

    /// The current target if it is still valid. An invalid target is cleared.
    pub fn valid_target(&mut self) -> Option<EntityId> {
        let target = self.target?;
        if self.spatial.is_valid_target(target) {
            Some(target)
        } else {
            trace!(target: "arena::ai", entity = %self.entity, lost = %target, "target no longer valid");
            self.target = None;
            None
        }
    }

    /// Vector from self to the current target.
    pub fn offset_to_target(&mut self, node: &'static str) -> Result<Option<Vec2>, BehaviorError> {
        let origin = self.self_position(node)?;
        Ok(self.target_position().map(|target| target - origin))
    }

    /// Throttled nearest-target search.
    ///
    /// Queries the target provider when the node's timer has run out, then
    /// re-arms it with a random interval from `interval`. The first search is
    /// also delayed by a random interval, so entities spawned together spread
    /// their searches out. Between searches the cached result is returned as
    /// long as it stays valid.
    pub fn search_target(
        &mut self,
        key: MemoryKey,
        interval: RangeInclusive<Duration>,
    ) -> Option<EntityId> {
        let delta = self.delta;
        let throttle = self
            .memory
            .throttle(key, || self.rng.gen_range(interval.clone()));
        throttle.until_next = throttle.until_next.saturating_sub(delta);

        if throttle.until_next.is_zero() {
            throttle.cached = self.targets.nearest_target(self.entity);
            throttle.until_next = self.rng.gen_range(interval);
            trace!(
                target: "arena::ai",
                entity = %self.entity,
                found = ?throttle.cached,
                next_in = ?throttle.until_next,
                "target search"
            );
        } else if let Some(cached) = throttle.cached {
            if !self.spatial.is_valid_target(cached) {
                throttle.cached = None;
            }
        }

        throttle.cached
    }
}

impl fmt::Debug for DecisionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecisionContext")
            .field("entity", &self.entity)
            .field("target", &self.target)
            .field("intent", &self.intent)
            .field("abilities", &self.abilities)
            .field("delta", &self.delta)
            .field("memory", &self.memory)
            .finish_non_exhaustive()
    }
}
