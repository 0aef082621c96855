//! Effect registry and resolved ability catalog.
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use arena_content::AbilitySpec;
use arena_core::{AbilityDefinition, AbilityId, EffectExecutor, EffectStep};

use crate::error::{Result, RuntimeError};

/// Effect executors supplied by the embedding game, keyed by name.
#[derive(Clone, Default)]
pub struct EffectRegistry {
    effects: HashMap<String, Arc<dyn EffectExecutor>>,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `effect` under its own name, replacing any previous one.
    pub fn register(&mut self, effect: Arc<dyn EffectExecutor>) {
        self.effects.insert(effect.name().to_owned(), effect);
    }

    pub fn with(mut self, effect: Arc<dyn EffectExecutor>) -> Self {
        self.register(effect);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn EffectExecutor>> {
        self.effects.get(name)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

impl fmt::Debug for EffectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.effects.keys().collect();
        names.sort();
        f.debug_struct("EffectRegistry").field("effects", &names).finish()
    }
}

/// Ability definitions with every effect resolved.
#[derive(Clone, Debug, Default)]
pub struct AbilityCatalog {
    abilities: BTreeMap<AbilityId, Arc<AbilityDefinition>>,
}

impl AbilityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves serialized specs against `registry`.
    ///
    /// Fails on the first unknown effect name, invalid timing or repeated id.
    pub fn from_specs(specs: &[AbilitySpec], registry: &EffectRegistry) -> Result<Self> {
        let mut catalog = Self::new();
        for spec in specs {
            catalog.insert(resolve(spec, registry)?)?;
        }
        Ok(catalog)
    }

    /// Adds `definition`. An id can only be defined once.
    pub fn insert(&mut self, definition: AbilityDefinition) -> Result<()> {
        match self.abilities.entry(definition.id) {
            Entry::Occupied(_) => Err(RuntimeError::DuplicateAbility(definition.id)),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(definition));
                Ok(())
            }
        }
    }

    pub fn get(&self, id: AbilityId) -> Option<&Arc<AbilityDefinition>> {
        self.abilities.get(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = AbilityId> + '_ {
        self.abilities.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }
}

fn resolve(spec: &AbilitySpec, registry: &EffectRegistry) -> Result<AbilityDefinition> {
    let mut definition = AbilityDefinition::new(spec.id, spec.name.clone(), spec.cooldown()?);
    for step in &spec.effects {
        let effect = registry
            .get(&step.effect)
            .ok_or_else(|| RuntimeError::UnknownEffect {
                ability: spec.name.clone(),
                effect: step.effect.clone(),
            })?;
        definition
            .steps
            .push(EffectStep::new(step.delay()?, Arc::clone(effect)));
    }
    Ok(definition)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use arena_content::EffectSpec;
    use arena_core::{EffectError, EntityId};

    use super::*;

    struct Noop;

    impl EffectExecutor for Noop {
        fn name(&self) -> &str {
            "noop"
        }

        fn execute(&self, _: EntityId, _: Option<EntityId>) -> std::result::Result<bool, EffectError> {
            Ok(true)
        }
    }

    fn spec(effect: &str) -> AbilitySpec {
        AbilitySpec {
            id: AbilityId(5),
            name: "pulse".into(),
            cooldown_secs: 1.5,
            effects: vec![EffectSpec {
                effect: effect.into(),
                delay_secs: 0.25,
            }],
        }
    }

    #[test]
    fn resolves_registered_effects() {
        let registry = EffectRegistry::new().with(Arc::new(Noop));
        let catalog = AbilityCatalog::from_specs(&[spec("noop")], &registry).unwrap();

        let pulse = catalog.get(AbilityId(5)).unwrap();
        assert_eq!(pulse.cooldown, Duration::from_millis(1500));
        assert_eq!(pulse.steps.len(), 1);
        assert_eq!(pulse.steps[0].delay, Duration::from_millis(250));
    }

    #[test]
    fn unknown_effect_is_a_configuration_error() {
        let registry = EffectRegistry::new().with(Arc::new(Noop));
        let err = AbilityCatalog::from_specs(&[spec("fireball")], &registry).unwrap_err();
        assert!(matches!(err, RuntimeError::UnknownEffect { effect, .. } if effect == "fireball"));
    }

    #[test]
    fn repeated_ability_id_is_rejected() {
        let registry = EffectRegistry::new().with(Arc::new(Noop));
        let err = AbilityCatalog::from_specs(&[spec("noop"), spec("noop")], &registry).unwrap_err();
        assert!(matches!(err, RuntimeError::DuplicateAbility(AbilityId(5))));

        let mut catalog = AbilityCatalog::from_specs(&[spec("noop")], &registry).unwrap();
        let err = catalog
            .insert(AbilityDefinition::new(AbilityId(5), "other", Duration::ZERO))
            .unwrap_err();
        assert!(matches!(err, RuntimeError::DuplicateAbility(AbilityId(5))));
        assert_eq!(catalog.get(AbilityId(5)).unwrap().name, "pulse");
    }
}
