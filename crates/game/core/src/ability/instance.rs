//! Per-entity ability instance.
use std::sync::Arc;
use std::time::Duration;

use super::{AbilityCast, AbilityDefinition, AbilityError};
use crate::cancel::CancelToken;
use crate::cooldown::{CooldownStatus, CooldownTimer};
use crate::types::{AbilityId, EntityId};

/// A learned ability: its definition plus this entity's cooldown.
#[derive(Debug)]
pub struct AbilityInstance {
    definition: Arc<AbilityDefinition>,
    cooldown: CooldownTimer,
}

impl AbilityInstance {
    pub fn new(definition: Arc<AbilityDefinition>) -> Self {
        let cooldown = CooldownTimer::new(definition.cooldown);
        Self {
            definition,
            cooldown,
        }
    }

    pub fn id(&self) -> AbilityId {
        self.definition.id
    }

    pub fn definition(&self) -> &Arc<AbilityDefinition> {
        &self.definition
    }

    pub fn cooldown(&self) -> &CooldownTimer {
        &self.cooldown
    }

    pub fn is_on_cooldown(&self) -> bool {
        self.cooldown.is_on_cooldown()
    }

    pub fn remaining(&self) -> Duration {
        self.cooldown.remaining()
    }

    /// Starts a cast.
    ///
    /// Fails immediately while on cooldown; nothing is queued. On success the
    /// cooldown restarts now, before any effect has run.
    pub fn execute(
        &mut self,
        caster: EntityId,
        target: Option<EntityId>,
        cancel: CancelToken,
    ) -> Result<AbilityCast, AbilityError> {
        if self.cooldown.is_on_cooldown() {
            return Err(AbilityError::OnCooldown {
                ability: self.id(),
                remaining: self.cooldown.remaining(),
            });
        }

        self.cooldown.start();
        Ok(AbilityCast::new(
            Arc::clone(&self.definition),
            caster,
            target,
            cancel,
        ))
    }

    pub(crate) fn tick_cooldown(&mut self, elapsed: Duration) -> CooldownStatus {
        self.cooldown.tick(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(cooldown_ms: u64) -> AbilityInstance {
        AbilityInstance::new(Arc::new(AbilityDefinition::new(
            AbilityId(7),
            "slam",
            Duration::from_millis(cooldown_ms),
        )))
    }

    #[test]
    fn execute_starts_cooldown_at_cast_time() {
        let mut ability = instance(2000);

        let cast = ability.execute(EntityId(1), None, CancelToken::new());
        assert!(cast.is_ok());
        assert!(ability.is_on_cooldown());
        assert_eq!(ability.remaining(), Duration::from_secs(2));
    }

    #[test]
    fn execute_fails_while_on_cooldown() {
        let mut ability = instance(500);
        ability.execute(EntityId(1), None, CancelToken::new()).unwrap();

        ability.tick_cooldown(Duration::from_millis(200));
        let err = ability
            .execute(EntityId(1), None, CancelToken::new())
            .unwrap_err();
        assert_eq!(
            err,
            AbilityError::OnCooldown {
                ability: AbilityId(7),
                remaining: Duration::from_millis(300),
            }
        );
        // A rejected cast does not touch the running cooldown.
        assert_eq!(ability.remaining(), Duration::from_millis(300));
    }

    #[test]
    fn recast_possible_once_cooldown_reaches_zero() {
        let mut ability = instance(300);
        ability.execute(EntityId(1), None, CancelToken::new()).unwrap();

        ability.tick_cooldown(Duration::from_millis(300));
        assert!(!ability.is_on_cooldown());
        assert!(ability.execute(EntityId(1), None, CancelToken::new()).is_ok());
    }
}
