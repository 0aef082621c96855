//! Immutable ability definitions.
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::EffectExecutor;
use crate::types::AbilityId;

/// An effect together with how long to wait before applying it.
///
/// `delay` is measured from the previous step (or from the cast for the
/// first step), so a pipeline reads like a script.
#[derive(Clone)]
pub struct EffectStep {
    pub delay: Duration,
    pub effect: Arc<dyn EffectExecutor>,
}

impl EffectStep {
    pub fn new(delay: Duration, effect: Arc<dyn EffectExecutor>) -> Self {
        Self { delay, effect }
    }

    pub fn immediate(effect: Arc<dyn EffectExecutor>) -> Self {
        Self::new(Duration::ZERO, effect)
    }
}

impl fmt::Debug for EffectStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectStep")
            .field("delay", &self.delay)
            .field("effect", &self.effect.name())
            .finish()
    }
}

/// Shared description of an ability: identity, cooldown and effect pipeline.
#[derive(Clone, Debug)]
pub struct AbilityDefinition {
    pub id: AbilityId,
    pub name: String,
    pub cooldown: Duration,
    pub steps: Vec<EffectStep>,
}

impl AbilityDefinition {
    pub fn new(id: AbilityId, name: impl Into<String>, cooldown: Duration) -> Self {
        Self {
            id,
            name: name.into(),
            cooldown,
            steps: Vec::new(),
        }
    }

    /// Appends an effect applied right after the previous step.
    #[must_use]
    pub fn then(self, effect: Arc<dyn EffectExecutor>) -> Self {
        self.then_after(Duration::ZERO, effect)
    }

    /// Appends an effect applied `delay` after the previous step.
    #[must_use]
    pub fn then_after(mut self, delay: Duration, effect: Arc<dyn EffectExecutor>) -> Self {
        self.steps.push(EffectStep::new(delay, effect));
        self
    }

    /// Time from cast to the last effect.
    pub fn resolve_time(&self) -> Duration {
        self.steps.iter().map(|step| step.delay).sum()
    }
}
