//! Scripted arena session: one scripted player against the bundled AI
//! archetypes.

use anyhow::Result;
use arena_core::{AbilityId, EntityId, Notification, Vec2};
use arena_runtime::{Faction, RawInput, Runtime, RuntimeError};
use tokio::sync::broadcast::error::RecvError;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;

const CLEAVE: AbilityId = AbilityId(1);
const LEAP: AbilityId = AbilityId(2);
const BOLT: AbilityId = AbilityId(3);

/// Spawns the player and one entity per AI archetype.
pub fn populate(runtime: &mut Runtime) -> Result<()> {
    runtime.spawn_player(EntityId::PLAYER, Vec2::ZERO, &[CLEAVE, LEAP])?;
    runtime.spawn_ai(EntityId(1), Vec2::new(8.0, 0.0), Faction::Hostile, "brute", &[CLEAVE])?;
    runtime.spawn_ai(EntityId(2), Vec2::new(-5.0, 3.0), Faction::Hostile, "kiter", &[BOLT])?;
    runtime.spawn_ai(EntityId(3), Vec2::new(0.0, -6.0), Faction::Neutral, "dummy", &[])?;
    Ok(())
}

/// Player input for a given tick: walk, cast, dash, cast the long ability
/// and interrupt it.
pub fn scripted_input(tick: u32) -> Option<RawInput> {
    let input = match tick {
        0 => RawInput {
            axis: Vec2::new(1.0, 0.2),
            ..RawInput::default()
        },
        8 => RawInput {
            ability_slot: Some(0),
            ..RawInput::default()
        },
        14 => RawInput {
            axis: Vec2::NEG_Y,
            dash: true,
            ..RawInput::default()
        },
        18 => RawInput::default(),
        24 => RawInput {
            ability_slot: Some(1),
            aim: Some(Vec2::X),
            ..RawInput::default()
        },
        _ => return None,
    };
    Some(input)
}

/// Tick at which the scripted player interrupts its own cast.
pub const CANCEL_AT: u32 = 28;

/// Summary of a finished session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub ticks: u64,
    pub decision_errors: u32,
}

/// Runs the scripted session to completion.
pub async fn run(mut runtime: Runtime, config: &ClientConfig) -> Result<SessionStats> {
    let listener = tokio::spawn(log_notifications(runtime.subscribe()));

    let mut pacing = interval(config.tick);
    pacing.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut stats = SessionStats::default();

    for tick in 0..config.ticks {
        if config.realtime {
            pacing.tick().await;
        }
        if let Some(input) = scripted_input(tick) {
            runtime.submit_input(EntityId::PLAYER, input)?;
        }
        if tick == CANCEL_AT && runtime.cancel_ability(EntityId::PLAYER)? {
            info!("player interrupted its cast");
        }

        match runtime.tick(config.tick) {
            Ok(()) => {}
            Err(err @ RuntimeError::Decision { .. }) => {
                warn!(error = %err, "tick completed with a decision error");
                stats.decision_errors += 1;
            }
            Err(err) => return Err(err.into()),
        }
        // Let the listener drain between ticks.
        tokio::task::yield_now().await;
    }

    stats.ticks = runtime.tick_count();
    for entity in runtime.entity_ids() {
        info!(
            %entity,
            state = ?runtime.state_of(entity),
            position = ?runtime.position_of(entity),
            "final"
        );
    }

    drop(runtime);
    listener.await?;
    Ok(stats)
}

async fn log_notifications(mut rx: tokio::sync::broadcast::Receiver<Notification>) {
    loop {
        match rx.recv().await {
            Ok(Notification::CooldownChanged { .. }) => {}
            Ok(Notification::StateEntered { entity, state }) => {
                debug!(%entity, %state, "state entered");
            }
            Ok(Notification::AbilityResolved { entity, outcome }) => {
                info!(
                    %entity,
                    ability = %outcome.ability,
                    resolved = outcome.resolved,
                    total = outcome.total,
                    cancelled = outcome.cancelled,
                    "ability resolved"
                );
            }
            Ok(notification) => debug!(?notification, "notification"),
            Err(RecvError::Lagged(skipped)) => warn!(skipped, "notification listener lagged"),
            Err(RecvError::Closed) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects;

    fn runtime(config: &ClientConfig) -> Runtime {
        Runtime::builder()
            .arena_config(config.arena_config().unwrap())
            .effects(effects::registry())
            .abilities(config.abilities().unwrap())
            .trees(config.trees().unwrap())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn scripted_session_runs_clean() {
        let config = ClientConfig::default();
        let mut runtime = runtime(&config);
        populate(&mut runtime).unwrap();

        let stats = run(runtime, &config).await.unwrap();
        assert_eq!(stats.ticks, u64::from(config.ticks));
        assert_eq!(stats.decision_errors, 0);
    }

    #[test]
    fn populate_rejects_second_call() {
        let config = ClientConfig::default();
        let mut runtime = runtime(&config);
        populate(&mut runtime).unwrap();
        assert!(populate(&mut runtime).is_err());
    }
}
