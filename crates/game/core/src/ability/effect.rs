//! Effect executor interface.
use thiserror::Error;

use crate::error::{ArenaError, ErrorSeverity};
use crate::types::EntityId;

/// One step of an ability's effect pipeline (damage, heal, spawn, ...).
///
/// Implemented by the embedding game. The core calls `execute` at most once
/// per step per cast and treats `Ok(false)` and `Err(_)` alike: the step
/// failed, the remaining steps still run. A panic inside `execute` is caught
/// and reported as [`EffectError::Panicked`].
pub trait EffectExecutor: Send + Sync {
    /// Name used in logs and catalog lookups.
    fn name(&self) -> &str;

    /// Applies the effect. Returns whether it took hold.
    fn execute(&self, caster: EntityId, target: Option<EntityId>) -> Result<bool, EffectError>;
}

/// Failure raised by an effect executor.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EffectError {
    #[error("target {0} is gone")]
    TargetGone(EntityId),

    #[error("effect requires a target")]
    NoTarget,

    #[error("effect panicked: {0}")]
    Panicked(String),

    #[error("{0}")]
    Failed(String),
}

impl ArenaError for EffectError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::TargetGone(_) | Self::NoTarget | Self::Failed(_) => ErrorSeverity::Recoverable,
            Self::Panicked(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TargetGone(_) => "effect.target_gone",
            Self::NoTarget => "effect.no_target",
            Self::Panicked(_) => "effect.panicked",
            Self::Failed(_) => "effect.failed",
        }
    }
}
