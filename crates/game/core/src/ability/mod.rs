//! Ability sequencing, timing and cancellation.
//!
//! This module never decides what an ability *does*. Effects are external
//! [`EffectExecutor`]s; the core only decides when each one runs.
//!
//! # Lifecycle
//!
//! ```text
//! AbilityDefinition (shared, immutable)
//!   └─ AbilityInstance (per entity: definition + CooldownTimer)
//!        └─ execute() ──► AbilityCast (per cast: effect cursor + clock)
//!                           └─ step(dt) every tick until Completed / Cancelled
//! ```
//!
//! The cooldown starts when `execute` succeeds and is independent of how
//! long the cast's effect pipeline takes to resolve.
mod cast;
mod definition;
mod effect;
mod instance;
mod set;

pub use cast::{AbilityCast, CastOutcome, CastProgress};
pub use definition::{AbilityDefinition, EffectStep};
pub use effect::{EffectError, EffectExecutor};
pub use instance::AbilityInstance;
pub use set::{AbilitySet, AbilitySlot};

use std::time::Duration;

use thiserror::Error;

use crate::error::{ArenaError, ErrorSeverity};
use crate::types::AbilityId;

/// Why an ability could not be learned or cast.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AbilityError {
    #[error("{ability} is on cooldown ({remaining:?} remaining)")]
    OnCooldown {
        ability: AbilityId,
        remaining: Duration,
    },

    #[error("{0} is not known by this entity")]
    Unknown(AbilityId),

    #[error("{0} is already known by this entity")]
    AlreadyKnown(AbilityId),

    #[error("ability set is full ({capacity} abilities)")]
    Full { capacity: usize },
}

impl ArenaError for AbilityError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OnCooldown { .. } => ErrorSeverity::Recoverable,
            Self::Unknown(_) | Self::AlreadyKnown(_) | Self::Full { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OnCooldown { .. } => "ability.on_cooldown",
            Self::Unknown(_) => "ability.unknown",
            Self::AlreadyKnown(_) => "ability.already_known",
            Self::Full { .. } => "ability.full",
        }
    }
}
