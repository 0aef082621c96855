//! Bounded per-entity ability collection.
use std::sync::Arc;
use std::time::Duration;

use arrayvec::ArrayVec;

use super::{AbilityCast, AbilityDefinition, AbilityError, AbilityInstance};
use crate::cancel::CancelToken;
use crate::config::ArenaConfig;
use crate::cooldown::CooldownStatus;
use crate::notify::{Notification, NotificationSink};
use crate::types::{AbilityId, EntityId};

/// Readiness snapshot of one learned ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AbilitySlot {
    pub id: AbilityId,
    pub ready: bool,
}

/// The abilities an entity knows, in learn order.
///
/// Slot indices (used by player input and decision trees) are positions in
/// this order.
#[derive(Debug, Default)]
pub struct AbilitySet {
    abilities: ArrayVec<AbilityInstance, { ArenaConfig::MAX_ABILITIES }>,
}

impl AbilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }

    pub fn contains(&self, id: AbilityId) -> bool {
        self.get(id).is_some()
    }

    pub fn learn(&mut self, definition: Arc<AbilityDefinition>) -> Result<(), AbilityError> {
        if self.contains(definition.id) {
            return Err(AbilityError::AlreadyKnown(definition.id));
        }
        self.abilities
            .try_push(AbilityInstance::new(definition))
            .map_err(|_| AbilityError::Full {
                capacity: ArenaConfig::MAX_ABILITIES,
            })
    }

    /// Removes an ability. Later slots shift down by one.
    pub fn forget(&mut self, id: AbilityId) -> Result<AbilityInstance, AbilityError> {
        let index = self
            .abilities
            .iter()
            .position(|ability| ability.id() == id)
            .ok_or(AbilityError::Unknown(id))?;
        Ok(self.abilities.remove(index))
    }

    pub fn get(&self, id: AbilityId) -> Option<&AbilityInstance> {
        self.abilities.iter().find(|ability| ability.id() == id)
    }

    pub fn slot(&self, index: usize) -> Option<&AbilityInstance> {
        self.abilities.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AbilityInstance> {
        self.abilities.iter()
    }

    pub fn slots(&self) -> Vec<AbilitySlot> {
        self.abilities
            .iter()
            .map(|ability| AbilitySlot {
                id: ability.id(),
                ready: !ability.is_on_cooldown(),
            })
            .collect()
    }

    pub fn execute(
        &mut self,
        id: AbilityId,
        caster: EntityId,
        target: Option<EntityId>,
        cancel: CancelToken,
    ) -> Result<AbilityCast, AbilityError> {
        self.abilities
            .iter_mut()
            .find(|ability| ability.id() == id)
            .ok_or(AbilityError::Unknown(id))?
            .execute(caster, target, cancel)
    }

    /// Advances every cooldown and reports changes to `sink`.
    pub fn tick(&mut self, elapsed: Duration, entity: EntityId, sink: &dyn NotificationSink) {
        for ability in &mut self.abilities {
            match ability.tick_cooldown(elapsed) {
                CooldownStatus::Idle => {}
                CooldownStatus::Ticking { remaining } => {
                    sink.notify(Notification::CooldownChanged {
                        entity,
                        ability: ability.id(),
                        remaining,
                        percent: ability.cooldown().percent(),
                    });
                }
                CooldownStatus::Ended => {
                    sink.notify(Notification::CooldownChanged {
                        entity,
                        ability: ability.id(),
                        remaining: Duration::ZERO,
                        percent: 0.0,
                    });
                    sink.notify(Notification::CooldownEnded {
                        entity,
                        ability: ability.id(),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Collect(Mutex<Vec<Notification>>);

    impl NotificationSink for Collect {
        fn notify(&self, notification: Notification) {
            self.0.lock().unwrap().push(notification);
        }
    }

    fn definition(id: u32, cooldown_ms: u64) -> Arc<AbilityDefinition> {
        Arc::new(AbilityDefinition::new(
            AbilityId(id),
            format!("ability-{id}"),
            Duration::from_millis(cooldown_ms),
        ))
    }

    #[test]
    fn learn_rejects_duplicates() {
        let mut set = AbilitySet::new();
        set.learn(definition(1, 100)).unwrap();
        assert_eq!(
            set.learn(definition(1, 100)),
            Err(AbilityError::AlreadyKnown(AbilityId(1)))
        );
    }

    #[test]
    fn learn_rejects_past_capacity() {
        let mut set = AbilitySet::new();
        for id in 0..ArenaConfig::MAX_ABILITIES as u32 {
            set.learn(definition(id, 100)).unwrap();
        }
        assert!(matches!(
            set.learn(definition(99, 100)),
            Err(AbilityError::Full { .. })
        ));
    }

    #[test]
    fn forget_shifts_slots() {
        let mut set = AbilitySet::new();
        set.learn(definition(1, 100)).unwrap();
        set.learn(definition(2, 100)).unwrap();
        set.forget(AbilityId(1)).unwrap();

        assert_eq!(set.slot(0).map(AbilityInstance::id), Some(AbilityId(2)));
        assert!(matches!(
            set.forget(AbilityId(1)),
            Err(AbilityError::Unknown(_))
        ));
    }

    #[test]
    fn slots_report_readiness() {
        let mut set = AbilitySet::new();
        set.learn(definition(1, 100)).unwrap();
        set.learn(definition(2, 100)).unwrap();
        set.execute(AbilityId(2), EntityId(1), None, CancelToken::new())
            .unwrap();

        assert_eq!(
            set.slots(),
            vec![
                AbilitySlot { id: AbilityId(1), ready: true },
                AbilitySlot { id: AbilityId(2), ready: false },
            ]
        );
    }

    #[test]
    fn tick_notifies_changes_and_end_once() {
        let mut set = AbilitySet::new();
        set.learn(definition(1, 200)).unwrap();
        set.execute(AbilityId(1), EntityId(3), None, CancelToken::new())
            .unwrap();
        let sink = Collect::default();

        for _ in 0..4 {
            set.tick(Duration::from_millis(100), EntityId(3), &sink);
        }

        let events = sink.0.into_inner().unwrap();
        let ended = events
            .iter()
            .filter(|n| matches!(n, Notification::CooldownEnded { .. }))
            .count();
        let changed = events
            .iter()
            .filter(|n| matches!(n, Notification::CooldownChanged { .. }))
            .count();
        assert_eq!(ended, 1);
        assert_eq!(changed, 2);
    }
}
