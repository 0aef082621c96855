use std::time::Duration;

use glam::Vec2;
use tracing::{debug, error, warn};

use super::state::ActiveState;
use super::{StateKind, Target, TransitionTable, Trigger};
use crate::ability::{AbilityCast, AbilitySet};
use crate::cancel::CancelToken;
use crate::config::ControlConfig;
use crate::env::{Actuator, Interactor};
use crate::error::ArenaError;
use crate::intent::InputIntent;
use crate::notify::{Notification, NotificationSink};
use crate::types::EntityId;

/// Collaborators a state machine drives during one tick.
pub struct StateContext<'a> {
    pub actuator: &'a mut dyn Actuator,
    pub abilities: &'a mut AbilitySet,
    pub interactor: &'a dyn Interactor,
    pub sink: &'a dyn NotificationSink,
}

/// Per-entity finite state machine over [`StateKind`].
#[derive(Debug)]
pub struct StateMachine {
    entity: EntityId,
    table: TransitionTable,
    active: ActiveState,
    move_epsilon: f32,
    max_chain: u8,
}

impl StateMachine {
    pub fn new(entity: EntityId, config: &ControlConfig) -> Self {
        Self::with_table(entity, TransitionTable::standard(), config)
    }

    pub fn with_table(entity: EntityId, table: TransitionTable, config: &ControlConfig) -> Self {
        Self {
            entity,
            table,
            active: ActiveState::Idle,
            move_epsilon: config.move_epsilon,
            max_chain: config.max_transition_chain,
        }
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn state(&self) -> StateKind {
        self.active.kind()
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// The cast owned by the Ability state, if any.
    pub fn current_cast(&self) -> Option<&AbilityCast> {
        self.active.cast()
    }

    /// Cancels the in-flight cast. The machine leaves Ability on its next
    /// tick. Returns `false` when nothing was running.
    pub fn cancel_cast(&self) -> bool {
        match self.active.cast() {
            Some(cast) if !cast.is_finished() => {
                cast.request_cancel();
                true
            }
            _ => false,
        }
    }

    /// Runs one tick. `None` means no intent could be produced; the machine
    /// falls back to Idle.
    pub fn tick(&mut self, intent: Option<&InputIntent>, dt: Duration, ctx: &mut StateContext<'_>) {
        let Some(intent) = intent else {
            if self.state() != StateKind::Idle {
                warn!(
                    target: "arena::fsm",
                    entity = %self.entity,
                    state = %self.state(),
                    "no intent available, falling back to idle"
                );
                self.force_idle(ctx);
            }
            return;
        };

        if let Some(target) = self.pending_transition(intent, &*ctx.actuator) {
            self.switch(target, intent, ctx);
        }
        self.update(intent, dt, ctx);
    }

    /// Hard reset: cancels any cast and enters Idle immediately.
    pub fn force_idle(&mut self, ctx: &mut StateContext<'_>) {
        self.cancel_cast();
        self.switch(Target::Fixed(StateKind::Idle), &InputIntent::default(), ctx);
    }

    fn pending_transition(&self, intent: &InputIntent, actuator: &dyn Actuator) -> Option<Target> {
        self.table
            .leaving(self.state())
            .find(|row| self.holds(row.trigger, intent, actuator))
            .map(|row| row.to)
    }

    fn holds(&self, trigger: Trigger, intent: &InputIntent, actuator: &dyn Actuator) -> bool {
        match trigger {
            Trigger::AbilityCancelled => self.active.cast().is_some_and(AbilityCast::is_cancelled),
            Trigger::DashRequestedAndReady => intent.dash_requested && actuator.is_dash_ready(),
            Trigger::AbilityRequested => intent.ability_requested.is_some(),
            Trigger::InteractRequested => intent.interact_requested,
            Trigger::DashFinished => !actuator.is_dashing(),
            Trigger::AbilityComplete => self.active.cast().is_none_or(AbilityCast::is_finished),
            Trigger::Always => true,
            Trigger::MoveNonZero => intent.is_moving(self.move_epsilon),
            Trigger::MoveZero => !intent.is_moving(self.move_epsilon),
        }
    }

    fn resolve(&self, target: Target, intent: &InputIntent) -> StateKind {
        match target {
            Target::Fixed(kind) => kind,
            Target::ByMoveVector if intent.is_moving(self.move_epsilon) => StateKind::Move,
            Target::ByMoveVector => StateKind::Idle,
        }
    }

    fn switch(&mut self, target: Target, intent: &InputIntent, ctx: &mut StateContext<'_>) {
        let mut next = Some(target);
        let mut hops = 0u8;

        while let Some(target) = next {
            if hops == self.max_chain {
                error!(
                    target: "arena::fsm",
                    entity = %self.entity,
                    state = %self.state(),
                    hops,
                    "transition chain did not settle, forcing idle"
                );
                debug_assert!(hops < self.max_chain, "transition chain exceeded {hops} hops");
                self.exit(ctx);
                self.enter(StateKind::Idle, intent, ctx);
                return;
            }
            hops += 1;

            let kind = self.resolve(target, intent);
            self.exit(ctx);
            next = self.enter(kind, intent, ctx);
        }
    }

    fn exit(&mut self, ctx: &mut StateContext<'_>) {
        let previous = std::mem::take(&mut self.active);
        let kind = previous.kind();

        if let ActiveState::Ability(Some(mut cast)) = previous {
            if let Some(outcome) = cast.abort().outcome() {
                ctx.sink.notify(Notification::AbilityResolved {
                    entity: self.entity,
                    outcome,
                });
            }
        }

        debug!(target: "arena::fsm", entity = %self.entity, state = %kind, "exit");
        ctx.sink.notify(Notification::StateExited {
            entity: self.entity,
            state: kind,
        });
    }

    /// Enters `kind` and returns the follow-up transition its enter hook
    /// requests, if any.
    fn enter(
        &mut self,
        kind: StateKind,
        intent: &InputIntent,
        ctx: &mut StateContext<'_>,
    ) -> Option<Target> {
        let (state, follow_up) = match kind {
            StateKind::Idle => {
                ctx.actuator.move_by(Vec2::ZERO);
                (ActiveState::Idle, None)
            }
            StateKind::Move => (ActiveState::Move, None),
            StateKind::Dash => {
                let direction = if intent.is_moving(self.move_epsilon) {
                    intent.move_vector.try_normalize().unwrap_or(intent.last_facing)
                } else {
                    intent.last_facing
                };
                if ctx.actuator.start_dash(direction) {
                    (ActiveState::Dash, None)
                } else {
                    debug!(target: "arena::fsm", entity = %self.entity, "dash refused by actuator");
                    (ActiveState::Dash, Some(Target::ByMoveVector))
                }
            }
            StateKind::Ability => {
                ctx.actuator.move_by(Vec2::ZERO);
                match self.begin_cast(intent, ctx.abilities) {
                    Some(cast) => (ActiveState::Ability(Some(cast)), None),
                    None => (ActiveState::Ability(None), Some(Target::ByMoveVector)),
                }
            }
            StateKind::Interact => {
                let responded = ctx.interactor.interact(self.entity, intent.last_facing);
                debug!(target: "arena::fsm", entity = %self.entity, responded, "interaction attempted");
                (ActiveState::Interact, Some(Target::ByMoveVector))
            }
        };

        self.active = state;
        debug!(target: "arena::fsm", entity = %self.entity, state = %kind, "enter");
        ctx.sink.notify(Notification::StateEntered {
            entity: self.entity,
            state: kind,
        });
        follow_up
    }

    fn begin_cast(&self, intent: &InputIntent, abilities: &mut AbilitySet) -> Option<AbilityCast> {
        let Some(ability) = intent.ability_requested else {
            warn!(target: "arena::fsm", entity = %self.entity, "entered ability state without a request");
            return None;
        };

        match abilities.execute(ability, self.entity, intent.target, CancelToken::new()) {
            Ok(cast) => Some(cast),
            Err(e) if e.severity().is_recoverable() => {
                debug!(target: "arena::ability", entity = %self.entity, ability = %ability, error = %e, "cast rejected");
                None
            }
            Err(e) => {
                warn!(
                    target: "arena::ability",
                    entity = %self.entity,
                    ability = %ability,
                    code = e.error_code(),
                    error = %e,
                    "cast rejected"
                );
                None
            }
        }
    }

    fn update(&mut self, intent: &InputIntent, dt: Duration, ctx: &mut StateContext<'_>) {
        match &mut self.active {
            ActiveState::Move => ctx.actuator.move_by(intent.move_vector.clamp_length_max(1.0)),
            ActiveState::Ability(Some(cast)) => {
                cast.step(dt);
            }
            ActiveState::Idle | ActiveState::Dash | ActiveState::Ability(None) | ActiveState::Interact => {}
        }
    }
}
