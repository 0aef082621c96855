//! Runtime orchestration for arena entity control.
//!
//! This crate wires the per-entity control core from `arena-core` to intent
//! sources, content and a small kinematic world. Consumers embed [`Runtime`]
//! to spawn entities, feed player input, tick the simulation and subscribe
//! to notifications.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`providers`] turns player input and decision trees into intents
//! - [`catalog`] resolves ability specs against registered effects
//! - [`events`] broadcasts control notifications
//! - [`world`] implements the actuator and perception collaborators
pub mod catalog;
pub mod error;
pub mod events;
pub mod providers;
pub mod runtime;
pub mod world;

pub use catalog::{AbilityCatalog, EffectRegistry};
pub use error::{Result, RuntimeError};
pub use events::EventBus;
pub use providers::ai::{BehaviorTreeProvider, BuildError, CompiledTree, TreeRequirements};
pub use providers::{IntentProvider, IntentSource, PlayerInputAdapter, ProviderKind, RawInput};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use world::{Body, BodyActuator, Faction, SharedWorld, World, WorldView};
