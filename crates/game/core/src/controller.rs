//! Per-entity control entry point.
use std::sync::Arc;
use std::time::Duration;

use crate::ability::{AbilityDefinition, AbilityError, AbilitySet, AbilitySlot};
use crate::config::ControlConfig;
use crate::env::{Actuator, Interactor};
use crate::fsm::{StateContext, StateKind, StateMachine};
use crate::intent::InputIntent;
use crate::notify::NotificationSink;
use crate::types::{AbilityId, EntityId};

/// Everything one controlled entity needs between "intent" and
/// "collaborator calls": its abilities, its state machine and the
/// collaborators they drive.
///
/// Dropping the controller cancels any in-flight cast.
pub struct EntityController {
    entity: EntityId,
    abilities: AbilitySet,
    machine: StateMachine,
    actuator: Box<dyn Actuator>,
    interactor: Arc<dyn Interactor>,
    sink: Arc<dyn NotificationSink>,
}

impl EntityController {
    pub fn new(
        entity: EntityId,
        config: &ControlConfig,
        actuator: Box<dyn Actuator>,
        interactor: Arc<dyn Interactor>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            entity,
            abilities: AbilitySet::new(),
            machine: StateMachine::new(entity, config),
            actuator,
            interactor,
            sink,
        }
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn state(&self) -> StateKind {
        self.machine.state()
    }

    pub fn machine(&self) -> &StateMachine {
        &self.machine
    }

    pub fn abilities(&self) -> &AbilitySet {
        &self.abilities
    }

    pub fn ability_slots(&self) -> Vec<AbilitySlot> {
        self.abilities.slots()
    }

    pub fn actuator(&self) -> &dyn Actuator {
        self.actuator.as_ref()
    }

    /// Remaining cooldown of a learned ability.
    pub fn cooldown_remaining(&self, ability: AbilityId) -> Option<Duration> {
        self.abilities.get(ability).map(|instance| instance.remaining())
    }

    pub fn learn_ability(&mut self, definition: Arc<AbilityDefinition>) -> Result<(), AbilityError> {
        self.abilities.learn(definition)
    }

    /// Removes an ability, cancelling its cast if one is in flight.
    pub fn forget_ability(&mut self, ability: AbilityId) -> Result<(), AbilityError> {
        if self
            .machine
            .current_cast()
            .is_some_and(|cast| cast.ability() == ability)
        {
            self.machine.cancel_cast();
        }
        self.abilities.forget(ability).map(drop)
    }

    /// Advances cooldowns, then the state machine.
    pub fn tick(&mut self, intent: Option<&InputIntent>, dt: Duration) {
        self.abilities.tick(dt, self.entity, self.sink.as_ref());

        let mut ctx = StateContext {
            actuator: self.actuator.as_mut(),
            abilities: &mut self.abilities,
            interactor: self.interactor.as_ref(),
            sink: self.sink.as_ref(),
        };
        self.machine.tick(intent, dt, &mut ctx);
    }

    /// Cancels the in-flight cast; the entity returns to Idle next tick.
    pub fn cancel_ability(&mut self) -> bool {
        self.machine.cancel_cast()
    }

    /// Hard reset: cancels any cast and enters Idle now.
    pub fn reset(&mut self) {
        let mut ctx = StateContext {
            actuator: self.actuator.as_mut(),
            abilities: &mut self.abilities,
            interactor: self.interactor.as_ref(),
            sink: self.sink.as_ref(),
        };
        self.machine.force_idle(&mut ctx);
    }
}

impl Drop for EntityController {
    fn drop(&mut self) {
        self.machine.cancel_cast();
    }
}
