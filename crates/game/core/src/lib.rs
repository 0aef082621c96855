//! Per-entity control core for a real-time top-down action game.
//!
//! `arena-core` decides nothing about rendering, physics or damage. It owns
//! the logic between "what does this entity want" and "which collaborator
//! gets called":
//!
//! - [`intent`]: the normalized [`InputIntent`] produced each tick by a
//!   player adapter or an AI tree
//! - [`cooldown`]: per-ability [`CooldownTimer`]s advanced by elapsed time
//! - [`ability`]: definitions, per-entity instances and multi-tick casts
//!   with explicit [`CancelToken`] cancellation
//! - [`fsm`]: the Idle / Move / Dash / Ability / Interact state machine
//! - [`controller`]: [`EntityController`], the per-entity `tick` entry point
//! - [`env`]: traits implemented by the embedding game (actuator, perception,
//!   interaction)
//! - [`notify`]: notifications for UI and animation collaborators
pub mod ability;
pub mod cancel;
pub mod config;
pub mod controller;
pub mod cooldown;
pub mod env;
pub mod error;
pub mod fsm;
pub mod intent;
pub mod notify;
pub mod types;

pub use ability::{
    AbilityCast, AbilityDefinition, AbilityError, AbilityInstance, AbilitySet, AbilitySlot,
    CastOutcome, CastProgress, EffectError, EffectExecutor, EffectStep,
};
pub use cancel::CancelToken;
pub use config::{AiConfig, ArenaConfig, ControlConfig, InputConfig, MovementConfig};
pub use controller::EntityController;
pub use cooldown::{CooldownStatus, CooldownTimer};
pub use env::{Actuator, Interactor, NoInteraction, SpatialQuery, TargetProvider};
pub use error::{ArenaError, ConfigError, ErrorSeverity};
pub use fsm::{StateContext, StateKind, StateMachine, Target, Transition, TransitionTable, Trigger};
pub use intent::InputIntent;
pub use notify::{Notification, NotificationSink, NullSink};
pub use types::{AbilityId, EntityId};

pub use glam::Vec2;
