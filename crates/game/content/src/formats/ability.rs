use std::time::Duration;

use arena_core::config::seconds;
use arena_core::{AbilityId, ConfigError};

/// Serialized ability: identity, cooldown and an effect pipeline referring to
/// effects by name.
///
/// ```ron
/// (
///     id: 3,
///     name: "leap",
///     cooldown_secs: 2.0,
///     effects: [
///         (effect: "knockback", delay_secs: 1.2),
///     ],
/// )
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilitySpec {
    pub id: AbilityId,
    pub name: String,
    pub cooldown_secs: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<EffectSpec>,
}

/// One pipeline step: the effect's registered name and the delay after the
/// previous step.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectSpec {
    pub effect: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub delay_secs: f32,
}

impl AbilitySpec {
    pub fn cooldown(&self) -> Result<Duration, ConfigError> {
        seconds("ability.cooldown_secs", self.cooldown_secs)
    }

    /// Checks every duration of this ability.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cooldown()?;
        for effect in &self.effects {
            effect.delay()?;
        }
        Ok(())
    }
}

impl EffectSpec {
    pub fn delay(&self) -> Result<Duration, ConfigError> {
        seconds("effect.delay_secs", self.delay_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(cooldown_secs: f32, delay_secs: f32) -> AbilitySpec {
        AbilitySpec {
            id: AbilityId(1),
            name: "leap".into(),
            cooldown_secs,
            effects: vec![EffectSpec {
                effect: "strike".into(),
                delay_secs,
            }],
        }
    }

    #[test]
    fn accepts_well_formed_spec() {
        let spec = spec(2.0, 1.2);
        assert!(spec.validate().is_ok());
        assert_eq!(spec.cooldown().unwrap(), Duration::from_secs(2));
    }

    #[test]
    fn rejects_negative_numbers() {
        assert!(spec(-1.0, 0.0).validate().is_err());
        assert!(spec(1.0, -0.5).validate().is_err());
        assert!(spec(f32::NAN, 0.0).validate().is_err());
    }
}
