//! Tunable parameters and compile-time limits.
//!
//! Every section has defaults so a partial TOML file is enough. Call
//! [`ArenaConfig::validate`] once at startup; nothing inside a tick
//! re-checks these values.
use std::ops::RangeInclusive;
use std::time::Duration;

use crate::error::ConfigError;

/// Root configuration for the control core and its default collaborators.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArenaConfig {
    pub control: ControlConfig,
    pub movement: MovementConfig,
    pub ai: AiConfig,
    pub input: InputConfig,
}

impl ArenaConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of abilities a single entity can hold.
    pub const MAX_ABILITIES: usize = 16;

    pub fn new() -> Self {
        Self::default()
    }

    /// Checks every section, returning the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.control.validate()?;
        self.movement.validate()?;
        self.ai.validate()?;
        self.input.validate()
    }
}

/// State machine parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControlConfig {
    /// Move vectors shorter than this count as "no movement".
    pub move_epsilon: f32,
    /// Upper bound on enter-triggered transitions within one tick.
    pub max_transition_chain: u8,
}

impl ControlConfig {
    pub const DEFAULT_MOVE_EPSILON: f32 = 1e-3;
    pub const DEFAULT_MAX_TRANSITION_CHAIN: u8 = 4;

    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("control.move_epsilon", self.move_epsilon)?;
        if self.max_transition_chain == 0 {
            return Err(ConfigError::NotPositive {
                field: "control.max_transition_chain",
                value: 0.0,
            });
        }
        Ok(())
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            move_epsilon: Self::DEFAULT_MOVE_EPSILON,
            max_transition_chain: Self::DEFAULT_MAX_TRANSITION_CHAIN,
        }
    }
}

/// Parameters for the default kinematic actuator.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MovementConfig {
    /// Units per second at full stick deflection.
    pub move_speed: f32,
    /// Units per second while dashing.
    pub dash_speed: f32,
    pub dash_duration_secs: f32,
    pub dash_cooldown_secs: f32,
}

impl MovementConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("movement.move_speed", self.move_speed)?;
        non_negative("movement.dash_speed", self.dash_speed)?;
        positive("movement.dash_duration_secs", self.dash_duration_secs)?;
        non_negative("movement.dash_cooldown_secs", self.dash_cooldown_secs)
    }

    pub fn dash_duration(&self) -> Result<Duration, ConfigError> {
        seconds("movement.dash_duration_secs", self.dash_duration_secs)
    }

    pub fn dash_cooldown(&self) -> Result<Duration, ConfigError> {
        seconds("movement.dash_cooldown_secs", self.dash_cooldown_secs)
    }
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: 4.0,
            dash_speed: 14.0,
            dash_duration_secs: 0.2,
            dash_cooldown_secs: 1.0,
        }
    }
}

/// Parameters for AI perception.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AiConfig {
    /// Lower bound of the randomized target-search interval.
    pub search_interval_min_secs: f32,
    /// Upper bound of the randomized target-search interval.
    pub search_interval_max_secs: f32,
    /// Targets further away than this are never acquired.
    pub sight_range: f32,
}

impl AiConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("ai.search_interval_min_secs", self.search_interval_min_secs)?;
        positive("ai.search_interval_max_secs", self.search_interval_max_secs)?;
        ordered(
            ("ai.search_interval_min_secs", self.search_interval_min_secs),
            ("ai.search_interval_max_secs", self.search_interval_max_secs),
        )?;
        non_negative("ai.sight_range", self.sight_range)
    }

    /// The target-search interval as a duration range.
    pub fn search_interval(&self) -> Result<RangeInclusive<Duration>, ConfigError> {
        let min = seconds("ai.search_interval_min_secs", self.search_interval_min_secs)?;
        let max = seconds("ai.search_interval_max_secs", self.search_interval_max_secs)?;
        Ok(min..=max)
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            search_interval_min_secs: 0.5,
            search_interval_max_secs: 1.0,
            sight_range: 12.0,
        }
    }
}

/// Parameters for the player input adapter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InputConfig {
    /// Stick deflection below this magnitude reads as neutral.
    pub deadzone: f32,
}

impl InputConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("input.deadzone", self.deadzone)?;
        ordered(("input.deadzone", self.deadzone), ("1.0", 1.0))
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { deadzone: 0.1 }
    }
}

/// Converts a seconds value from a config or data file into a [`Duration`],
/// rounded to the microsecond so `1.2` means exactly 1200ms.
pub fn seconds(field: &'static str, value: f32) -> Result<Duration, ConfigError> {
    non_negative(field, value)?;
    let micros = (f64::from(value) * 1e6).round();
    Ok(Duration::from_micros(micros as u64))
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotNonNegative { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    non_negative(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn ordered(min: (&'static str, f32), max: (&'static str, f32)) -> Result<(), ConfigError> {
    if min.1 <= max.1 {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange {
            min_field: min.0,
            min: min.1,
            max_field: max.0,
            max: max.1,
        })
    }
}
