//! End-to-end runtime scenarios: content loading, spawning, AI and player
//! control, cancellation and failure isolation.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use arena_content::{AbilityLoader, TreeLoader};
use arena_core::{
    AbilityDefinition, AbilityId, AbilitySlot, ArenaConfig, EffectError, EffectExecutor,
    EntityId, InputIntent, Notification, StateKind, Vec2,
};
use arena_runtime::{Faction, IntentProvider, ProviderKind, RawInput, Runtime, RuntimeError};
use behavior_tree::BehaviorError;

const TICK: Duration = Duration::from_millis(100);
const CLEAVE: AbilityId = AbilityId(1);
const LEAP: AbilityId = AbilityId(2);
const PLAYER: EntityId = EntityId::PLAYER;
const BRUTE: EntityId = EntityId(10);

/// Effect that counts how often it ran.
struct Counter {
    name: &'static str,
    hits: AtomicUsize,
}

impl Counter {
    fn new(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            hits: AtomicUsize::new(0),
        })
    }

    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl EffectExecutor for Counter {
    fn name(&self) -> &str {
        self.name
    }

    fn execute(&self, _caster: EntityId, _target: Option<EntityId>) -> Result<bool, EffectError> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }
}

struct Effects {
    announce: Arc<Counter>,
    strike: Arc<Counter>,
    knockback: Arc<Counter>,
}

fn runtime() -> (Runtime, Effects) {
    runtime_with(ArenaConfig::default())
}

fn runtime_with(config: ArenaConfig) -> (Runtime, Effects) {
    let effects = Effects {
        announce: Counter::new("announce"),
        strike: Counter::new("strike"),
        knockback: Counter::new("knockback"),
    };
    let runtime = Runtime::builder()
        .arena_config(config)
        .effect(effects.announce.clone())
        .effect(effects.strike.clone())
        .effect(effects.knockback.clone())
        .abilities(AbilityLoader::embedded().unwrap())
        .trees(TreeLoader::embedded().unwrap())
        .build()
        .unwrap();
    (runtime, effects)
}

fn drain(rx: &mut tokio::sync::broadcast::Receiver<Notification>) -> Vec<Notification> {
    std::iter::from_fn(|| rx.try_recv().ok()).collect()
}

#[test]
fn embedded_content_builds_every_tree() {
    let (runtime, _) = runtime();
    let names: Vec<_> = runtime.tree_names().collect();
    for expected in ["acquire", "brute", "chase", "dummy", "kiter"] {
        assert!(names.contains(&expected), "missing tree {expected}");
    }
    assert_eq!(runtime.catalog().len(), 3);
}

#[test]
fn unregistered_effect_fails_the_build() {
    let err = Runtime::builder()
        .abilities(AbilityLoader::embedded().unwrap())
        .build()
        .unwrap_err();
    assert!(matches!(err, RuntimeError::UnknownEffect { .. }));
}

#[test]
fn repeated_ability_id_fails_the_build() {
    let err = Runtime::builder()
        .effect(Counter::new("strike"))
        .effect(Counter::new("announce"))
        .effect(Counter::new("knockback"))
        .abilities(AbilityLoader::embedded().unwrap())
        .ability(AbilityDefinition::new(CLEAVE, "shadow", Duration::ZERO))
        .build()
        .unwrap_err();
    assert!(matches!(err, RuntimeError::DuplicateAbility(CLEAVE)));
}

#[test]
fn brute_closes_in_and_strikes() {
    let (mut runtime, effects) = runtime();
    runtime.spawn_player(PLAYER, Vec2::ZERO, &[]).unwrap();
    runtime
        .spawn_ai(BRUTE, Vec2::new(3.0, 0.0), Faction::Hostile, "brute", &[CLEAVE])
        .unwrap();
    assert_eq!(runtime.provider_of(BRUTE), Some(ProviderKind::Ai));

    let mut rx = runtime.subscribe();
    let mut saw_move = false;
    for _ in 0..40 {
        runtime.tick(TICK).unwrap();
        saw_move |= runtime.state_of(BRUTE) == Some(StateKind::Move);
        if effects.strike.hits() > 0 {
            break;
        }
    }

    assert!(saw_move);
    assert_eq!(effects.strike.hits(), 1);
    let distance = runtime.position_of(BRUTE).unwrap().length();
    assert!(distance <= 1.5, "struck from {distance}");
    assert!(runtime.cooldown_of(BRUTE, CLEAVE).unwrap() > Duration::ZERO);

    let events = drain(&mut rx);
    assert!(events.contains(&Notification::StateEntered {
        entity: BRUTE,
        state: StateKind::Ability,
    }));
}

#[test]
fn player_cast_is_cancelled_before_delayed_effects() {
    let (mut runtime, effects) = runtime();
    runtime.spawn_player(PLAYER, Vec2::ZERO, &[LEAP]).unwrap();
    let mut rx = runtime.subscribe();

    runtime
        .submit_input(
            PLAYER,
            RawInput {
                ability_slot: Some(0),
                ..RawInput::default()
            },
        )
        .unwrap();
    runtime.tick(TICK).unwrap();
    assert_eq!(runtime.state_of(PLAYER), Some(StateKind::Ability));
    assert_eq!(effects.announce.hits(), 1);

    assert!(runtime.cancel_ability(PLAYER).unwrap());
    runtime.tick(TICK).unwrap();
    assert_eq!(runtime.state_of(PLAYER), Some(StateKind::Idle));

    for _ in 0..20 {
        runtime.tick(TICK).unwrap();
    }
    assert_eq!(effects.strike.hits(), 0);
    assert_eq!(effects.knockback.hits(), 0);

    let cancelled = drain(&mut rx).into_iter().any(|event| {
        matches!(
            event,
            Notification::AbilityResolved { entity, outcome } if entity == PLAYER && outcome.cancelled
        )
    });
    assert!(cancelled);
}

#[test]
fn player_moves_with_axis_input() {
    let (mut runtime, _) = runtime();
    runtime.spawn_player(PLAYER, Vec2::ZERO, &[]).unwrap();
    runtime
        .submit_input(
            PLAYER,
            RawInput {
                axis: Vec2::Y,
                ..RawInput::default()
            },
        )
        .unwrap();

    runtime.tick(TICK).unwrap();
    assert_eq!(runtime.state_of(PLAYER), Some(StateKind::Move));
    assert!(runtime.position_of(PLAYER).unwrap().y > 0.0);
    assert_eq!(runtime.clock(), TICK);
    assert_eq!(runtime.tick_count(), 1);
}

struct Broken;

impl IntentProvider for Broken {
    fn next_intent(
        &mut self,
        _slots: &[AbilitySlot],
        _dt: Duration,
    ) -> Result<InputIntent, BehaviorError> {
        Err(BehaviorError::missing("broken", "everything"))
    }
}

#[test]
fn decision_errors_are_isolated() {
    let (mut runtime, _) = runtime();
    let broken = EntityId(5);
    runtime
        .spawn_with_provider(broken, Vec2::ZERO, Faction::Neutral, &[], Broken)
        .unwrap();
    runtime
        .spawn_player(PLAYER, Vec2::new(5.0, 0.0), &[])
        .unwrap();
    runtime
        .submit_input(
            PLAYER,
            RawInput {
                axis: Vec2::X,
                ..RawInput::default()
            },
        )
        .unwrap();

    let err = runtime.tick(TICK).unwrap_err();
    assert!(matches!(err, RuntimeError::Decision { entity, .. } if entity == broken));
    assert_eq!(runtime.state_of(broken), Some(StateKind::Idle));
    assert_eq!(runtime.state_of(PLAYER), Some(StateKind::Move));
    assert!(runtime.position_of(PLAYER).unwrap().x > 5.0);
}

#[test]
fn spawn_validation() {
    let (mut runtime, _) = runtime();

    let err = runtime
        .spawn_ai(BRUTE, Vec2::ZERO, Faction::Hostile, "brute", &[])
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::MissingAbilities {
            known: 0,
            required: 1,
            ..
        }
    ));

    let err = runtime
        .spawn_ai(BRUTE, Vec2::ZERO, Faction::Hostile, "nope", &[])
        .unwrap_err();
    assert!(matches!(err, RuntimeError::UnknownTree(_)));

    let err = runtime
        .spawn_player(PLAYER, Vec2::ZERO, &[AbilityId(99)])
        .unwrap_err();
    assert!(matches!(err, RuntimeError::UnknownAbility(AbilityId(99))));

    runtime
        .spawn_ai(BRUTE, Vec2::ZERO, Faction::Hostile, "dummy", &[])
        .unwrap();
    let err = runtime
        .spawn_player(BRUTE, Vec2::ZERO, &[])
        .unwrap_err();
    assert!(matches!(err, RuntimeError::DuplicateEntity(BRUTE)));

    let err = runtime
        .submit_input(BRUTE, RawInput::default())
        .unwrap_err();
    assert!(matches!(err, RuntimeError::NotPlayerControlled(BRUTE)));
}

#[test]
fn despawn_removes_entity_and_body() {
    let (mut runtime, _) = runtime();
    runtime.spawn_player(PLAYER, Vec2::ZERO, &[LEAP]).unwrap();
    runtime
        .submit_input(
            PLAYER,
            RawInput {
                ability_slot: Some(0),
                ..RawInput::default()
            },
        )
        .unwrap();
    runtime.tick(TICK).unwrap();

    runtime.despawn(PLAYER).unwrap();
    assert_eq!(runtime.state_of(PLAYER), None);
    assert_eq!(runtime.position_of(PLAYER), None);
    assert!(matches!(
        runtime.despawn(PLAYER),
        Err(RuntimeError::UnknownEntity(PLAYER))
    ));
    runtime.tick(TICK).unwrap();
}

#[test]
fn brute_ignores_targets_out_of_sight() {
    let (mut runtime, effects) = runtime();
    runtime.spawn_player(PLAYER, Vec2::new(50.0, 0.0), &[]).unwrap();
    runtime
        .spawn_ai(BRUTE, Vec2::ZERO, Faction::Hostile, "brute", &[CLEAVE])
        .unwrap();

    for _ in 0..10 {
        runtime.tick(TICK).unwrap();
    }
    assert_eq!(runtime.state_of(BRUTE), Some(StateKind::Idle));
    assert_eq!(runtime.position_of(BRUTE), Some(Vec2::ZERO));
    assert_eq!(effects.strike.hits(), 0);
}

#[test]
fn configured_search_interval_paces_data_trees() {
    let mut config = ArenaConfig::default();
    config.ai.search_interval_min_secs = 3.0;
    config.ai.search_interval_max_secs = 3.0;
    let (mut runtime, effects) = runtime_with(config);
    runtime.spawn_player(PLAYER, Vec2::ZERO, &[]).unwrap();
    runtime
        .spawn_ai(BRUTE, Vec2::new(1.0, 0.0), Faction::Hostile, "brute", &[CLEAVE])
        .unwrap();

    for _ in 0..25 {
        runtime.tick(TICK).unwrap();
    }
    assert_eq!(runtime.state_of(BRUTE), Some(StateKind::Idle));
    assert_eq!(effects.strike.hits(), 0);

    for _ in 0..10 {
        runtime.tick(TICK).unwrap();
    }
    assert_eq!(effects.strike.hits(), 1);
}

#[test]
fn reset_entity_stops_movement_and_casts() {
    let (mut runtime, effects) = runtime();
    runtime.spawn_player(PLAYER, Vec2::ZERO, &[LEAP]).unwrap();
    runtime
        .submit_input(
            PLAYER,
            RawInput {
                axis: Vec2::X,
                ability_slot: Some(0),
                ..RawInput::default()
            },
        )
        .unwrap();
    runtime.tick(TICK).unwrap();
    assert_eq!(runtime.state_of(PLAYER), Some(StateKind::Ability));

    runtime.reset_entity(PLAYER).unwrap();
    assert_eq!(runtime.state_of(PLAYER), Some(StateKind::Idle));

    let before = runtime.position_of(PLAYER).unwrap();
    for _ in 0..15 {
        runtime.tick(TICK).unwrap();
    }
    assert_eq!(runtime.state_of(PLAYER), Some(StateKind::Idle));
    assert_eq!(runtime.position_of(PLAYER), Some(before));
    assert_eq!(effects.strike.hits(), 0);
}
