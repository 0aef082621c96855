//! High-level runtime orchestrator.
//!
//! The runtime owns the world, one controller plus intent source per entity,
//! the shared decision trees and the event bus. It exposes a builder-based
//! API for clients to load content and a fixed-step [`Runtime::tick`] to
//! drive the simulation.
//!
//! Every tick runs each entity in ascending id order:
//!
//! 1. read the entity's ability readiness
//! 2. ask its intent source for an intent
//! 3. advance the entity's controller with that intent
//!
//! and finally integrates the world once.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use arena_content::{AbilitySpec, TreeSet};
use arena_core::{
    AbilityDefinition, AbilityId, ArenaConfig, EffectExecutor, EntityController, EntityId,
    Interactor, NoInteraction, Notification, StateKind, Vec2,
};
use tokio::sync::broadcast;
use tracing::{debug, error, info};

use crate::catalog::{AbilityCatalog, EffectRegistry};
use crate::error::{Result, RuntimeError};
use crate::events::EventBus;
use crate::providers::ai::{self, BehaviorTreeProvider, CompiledTree, presets};
use crate::providers::{IntentProvider, IntentSource, PlayerInputAdapter, ProviderKind, RawInput};
use crate::world::{BodyActuator, Faction, SharedWorld, World, WorldView};

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub arena_config: ArenaConfig,
    /// Notifications buffered per subscriber before it starts lagging.
    pub event_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            arena_config: ArenaConfig::default(),
            event_buffer_size: 256,
        }
    }
}

struct ControlledEntity {
    controller: EntityController,
    source: IntentSource,
}

/// Main runtime that drives every controlled entity.
///
/// Design: one synchronous tick per simulation frame. Entities are isolated
/// from each other's failures: a broken decision tree idles its own entity
/// and is reported after the rest of the frame has run.
pub struct Runtime {
    config: RuntimeConfig,
    world: SharedWorld,
    view: Arc<WorldView>,
    entities: BTreeMap<EntityId, ControlledEntity>,
    catalog: AbilityCatalog,
    trees: BTreeMap<String, Arc<CompiledTree>>,
    interactor: Arc<dyn Interactor>,
    events: Arc<EventBus>,
    clock: Duration,
    ticks: u64,
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("config", &self.config)
            .field("clock", &self.clock)
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Subscribe to control notifications
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.events.subscribe()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn world(&self) -> &SharedWorld {
        &self.world
    }

    pub fn catalog(&self) -> &AbilityCatalog {
        &self.catalog
    }

    /// Names of the registered decision trees.
    pub fn tree_names(&self) -> impl Iterator<Item = &str> {
        self.trees.keys().map(String::as_str)
    }

    /// Simulated time elapsed over every tick.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn entity_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys().copied()
    }

    /// Spawns a player-controlled entity. Input arrives via
    /// [`submit_input`](Self::submit_input).
    pub fn spawn_player(
        &mut self,
        entity: EntityId,
        position: Vec2,
        abilities: &[AbilityId],
    ) -> Result<()> {
        let adapter = PlayerInputAdapter::new(&self.config.arena_config.input);
        self.spawn(
            entity,
            position,
            Faction::Player,
            abilities,
            IntentSource::Player(adapter),
        )
    }

    /// Spawns an entity driven by the decision tree called `tree`.
    ///
    /// Fails if the tree reads more ability slots than `abilities` fills.
    pub fn spawn_ai(
        &mut self,
        entity: EntityId,
        position: Vec2,
        faction: Faction,
        tree: &str,
        abilities: &[AbilityId],
    ) -> Result<()> {
        let compiled = self
            .trees
            .get(tree)
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownTree(tree.to_owned()))?;

        let required = compiled.requirements().ability_slots;
        if abilities.len() < required {
            return Err(RuntimeError::MissingAbilities {
                entity,
                tree: tree.to_owned(),
                known: abilities.len(),
                required,
            });
        }

        let provider = BehaviorTreeProvider::new(
            compiled,
            entity,
            self.view.clone(),
            self.view.clone(),
        );
        self.spawn(entity, position, faction, abilities, IntentSource::Ai(provider))
    }

    /// Spawns an entity driven by an arbitrary intent provider.
    pub fn spawn_with_provider(
        &mut self,
        entity: EntityId,
        position: Vec2,
        faction: Faction,
        abilities: &[AbilityId],
        provider: impl IntentProvider + 'static,
    ) -> Result<()> {
        self.spawn(
            entity,
            position,
            faction,
            abilities,
            IntentSource::Custom(Box::new(provider)),
        )
    }

    fn spawn(
        &mut self,
        entity: EntityId,
        position: Vec2,
        faction: Faction,
        abilities: &[AbilityId],
        source: IntentSource,
    ) -> Result<()> {
        if self.entities.contains_key(&entity) {
            return Err(RuntimeError::DuplicateEntity(entity));
        }

        let mut controller = EntityController::new(
            entity,
            &self.config.arena_config.control,
            Box::new(BodyActuator::new(entity, self.world.clone())),
            self.interactor.clone(),
            self.events.clone(),
        );
        for &id in abilities {
            let definition = self
                .catalog
                .get(id)
                .ok_or(RuntimeError::UnknownAbility(id))?;
            controller.learn_ability(definition.clone())?;
        }

        self.world.write().insert(entity, position, faction);
        info!(
            target: "arena::runtime",
            %entity,
            %faction,
            provider = %source.kind(),
            abilities = abilities.len(),
            "spawned"
        );
        self.entities
            .insert(entity, ControlledEntity { controller, source });
        Ok(())
    }

    /// Removes an entity. Its in-flight cast is cancelled.
    pub fn despawn(&mut self, entity: EntityId) -> Result<()> {
        self.entities
            .remove(&entity)
            .ok_or(RuntimeError::UnknownEntity(entity))?;
        self.world.write().remove(entity);
        info!(target: "arena::runtime", %entity, "despawned");
        Ok(())
    }

    /// Feeds a device sample to a player-controlled entity.
    pub fn submit_input(&mut self, entity: EntityId, input: RawInput) -> Result<()> {
        let slot = self.entity_mut(entity)?;
        let adapter = slot
            .source
            .as_player_mut()
            .ok_or(RuntimeError::NotPlayerControlled(entity))?;
        adapter.submit(input);
        Ok(())
    }

    /// Cancels the entity's in-flight cast. Returns whether one was running.
    pub fn cancel_ability(&mut self, entity: EntityId) -> Result<bool> {
        Ok(self.entity_mut(entity)?.controller.cancel_ability())
    }

    /// Cancels any cast, forces the entity into Idle and clears its intent
    /// source.
    pub fn reset_entity(&mut self, entity: EntityId) -> Result<()> {
        let slot = self.entity_mut(entity)?;
        slot.controller.reset();
        slot.source.reset();
        Ok(())
    }

    pub fn state_of(&self, entity: EntityId) -> Option<StateKind> {
        self.entities.get(&entity).map(|e| e.controller.state())
    }

    pub fn provider_of(&self, entity: EntityId) -> Option<ProviderKind> {
        self.entities.get(&entity).map(|e| e.source.kind())
    }

    pub fn cooldown_of(&self, entity: EntityId, ability: AbilityId) -> Option<Duration> {
        self.entities
            .get(&entity)?
            .controller
            .cooldown_remaining(ability)
    }

    pub fn position_of(&self, entity: EntityId) -> Option<Vec2> {
        self.world.read().body(entity).map(|body| body.position)
    }

    /// Advances the simulation by `dt`.
    ///
    /// Every entity is ticked even when some fail to decide; those fall back
    /// to Idle for this tick. The first decision error is returned after the
    /// world has been integrated.
    pub fn tick(&mut self, dt: Duration) -> Result<()> {
        let mut first_error = None;

        for (&entity, slot) in self.entities.iter_mut() {
            let abilities = slot.controller.ability_slots();
            match slot.source.next_intent(&abilities, dt) {
                Ok(intent) => slot.controller.tick(Some(&intent), dt),
                Err(source) => {
                    error!(
                        target: "arena::runtime",
                        %entity,
                        provider = %slot.source.kind(),
                        error = %source,
                        "decision failed; idling"
                    );
                    slot.controller.tick(None, dt);
                    first_error.get_or_insert(RuntimeError::Decision { entity, source });
                }
            }
        }

        self.world.write().integrate(dt);
        self.clock += dt;
        self.ticks += 1;

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn entity_mut(&mut self, entity: EntityId) -> Result<&mut ControlledEntity> {
        self.entities
            .get_mut(&entity)
            .ok_or(RuntimeError::UnknownEntity(entity))
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    effects: EffectRegistry,
    specs: Vec<AbilitySpec>,
    definitions: Vec<AbilityDefinition>,
    tree_set: TreeSet,
    trees: Vec<(String, CompiledTree)>,
    interactor: Option<Arc<dyn Interactor>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            effects: EffectRegistry::new(),
            specs: Vec::new(),
            definitions: Vec::new(),
            tree_set: TreeSet::new(),
            trees: Vec::new(),
            interactor: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override only the arena tuning
    pub fn arena_config(mut self, config: ArenaConfig) -> Self {
        self.config.arena_config = config;
        self
    }

    /// Register an effect executor referenced by ability specs
    pub fn effect(mut self, effect: Arc<dyn EffectExecutor>) -> Self {
        self.effects.register(effect);
        self
    }

    /// Replace the effect registry
    pub fn effects(mut self, registry: EffectRegistry) -> Self {
        self.effects = registry;
        self
    }

    /// Add serialized ability specs, resolved against the effect registry at
    /// build time
    pub fn abilities(mut self, specs: impl IntoIterator<Item = AbilitySpec>) -> Self {
        self.specs.extend(specs);
        self
    }

    /// Add an already-resolved ability. Its id must not repeat one from
    /// [`abilities`](Self::abilities) or an earlier call.
    pub fn ability(mut self, definition: AbilityDefinition) -> Self {
        self.definitions.push(definition);
        self
    }

    /// Add data-driven tree definitions. A tree named like a preset replaces
    /// the preset. Search intervals a definition omits come from the arena
    /// configuration.
    pub fn trees(mut self, trees: TreeSet) -> Self {
        self.tree_set.extend(trees);
        self
    }

    /// Add a tree built in code
    pub fn tree(mut self, name: impl Into<String>, tree: CompiledTree) -> Self {
        self.trees.push((name.into(), tree));
        self
    }

    /// Set the interaction collaborator (default: nothing to interact with)
    pub fn interactor(mut self, interactor: Arc<dyn Interactor>) -> Self {
        self.interactor = Some(interactor);
        self
    }

    /// Build the runtime
    pub fn build(self) -> Result<Runtime> {
        let arena = &self.config.arena_config;
        arena.validate()?;

        let mut catalog = AbilityCatalog::from_specs(&self.specs, &self.effects)?;
        for definition in self.definitions {
            catalog.insert(definition)?;
        }

        let search = arena.ai.search_interval()?;
        let mut trees: BTreeMap<String, Arc<CompiledTree>> = presets::all(search.clone())
            .into_iter()
            .map(|(name, tree)| (name.to_owned(), Arc::new(tree)))
            .collect();
        for (name, tree) in ai::build_all(&self.tree_set, search)? {
            trees.insert(name, Arc::new(tree));
        }
        for (name, tree) in self.trees {
            trees.insert(name, Arc::new(tree));
        }

        let world = World::new(arena)?.shared();
        let view = Arc::new(WorldView::new(world.clone()));
        let events = Arc::new(EventBus::with_capacity(self.config.event_buffer_size));

        debug!(
            target: "arena::runtime",
            abilities = catalog.len(),
            trees = trees.len(),
            effects = self.effects.len(),
            "runtime built"
        );

        Ok(Runtime {
            config: self.config,
            world,
            view,
            entities: BTreeMap::new(),
            catalog,
            trees,
            interactor: self
                .interactor
                .unwrap_or_else(|| Arc::new(NoInteraction)),
            events,
            clock: Duration::ZERO,
            ticks: 0,
        })
    }
}
