//! Effect executors for the demo: they log instead of touching a game.

use std::sync::Arc;

use arena_core::{EffectError, EffectExecutor, EntityId};
use arena_runtime::EffectRegistry;
use tracing::info;

/// Logs each execution. Targeted effects fail without a target.
#[derive(Debug)]
pub struct LoggedEffect {
    name: &'static str,
    needs_target: bool,
}

impl LoggedEffect {
    pub const fn untargeted(name: &'static str) -> Self {
        Self {
            name,
            needs_target: false,
        }
    }

    pub const fn targeted(name: &'static str) -> Self {
        Self {
            name,
            needs_target: true,
        }
    }
}

impl EffectExecutor for LoggedEffect {
    fn name(&self) -> &str {
        self.name
    }

    fn execute(&self, caster: EntityId, target: Option<EntityId>) -> Result<bool, EffectError> {
        if self.needs_target && target.is_none() {
            return Err(EffectError::NoTarget);
        }
        info!(target: "arena::effect", effect = self.name, %caster, ?target, "effect");
        Ok(true)
    }
}

/// Every effect named by the bundled ability catalog.
pub fn registry() -> EffectRegistry {
    EffectRegistry::new()
        .with(Arc::new(LoggedEffect::untargeted("announce")))
        .with(Arc::new(LoggedEffect::untargeted("strike")))
        .with(Arc::new(LoggedEffect::targeted("knockback")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targeted_effect_needs_target() {
        let knockback = LoggedEffect::targeted("knockback");
        assert_eq!(knockback.execute(EntityId(1), None), Err(EffectError::NoTarget));
        assert_eq!(knockback.execute(EntityId(1), Some(EntityId(2))), Ok(true));

        let announce = LoggedEffect::untargeted("announce");
        assert_eq!(announce.execute(EntityId(1), None), Ok(true));
    }

    #[test]
    fn registry_covers_catalog() {
        let registry = registry();
        for name in ["announce", "strike", "knockback"] {
            assert!(registry.get(name).is_some(), "{name}");
        }
    }
}
