//! Common error infrastructure for arena-core.
//!
//! Domain-specific errors (e.g., [`AbilityError`](crate::AbilityError),
//! [`EffectError`](crate::EffectError)) are defined next to the code that
//! raises them. This module holds the shared severity model and the
//! configuration error raised at startup.
//!
//! # Design Principles
//!
//! - **Expected failures are values**: a cooldown or a missing target is
//!   `Recoverable` and never escalates
//! - **Configuration fails fast**: `Validation` errors are raised while
//!   building trees, catalogs or entities, never inside a tick
//! - **Invariants degrade**: `Internal` errors are logged loudly and the
//!   affected entity falls back to a safe state

use thiserror::Error;

/// Severity level of an error, used for categorization and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Expected outcome of normal play.
    ///
    /// Examples: ability on cooldown, effect target already gone
    Recoverable,

    /// Invalid configuration or input, should not retry without changes.
    ///
    /// Examples: unknown ability id, negative cooldown
    Validation,

    /// Unexpected state inconsistency; indicates a bug.
    ///
    /// Examples: transition chain did not settle, effect executor panicked
    Internal,
}

impl ErrorSeverity {
    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all arena-core errors.
pub trait ArenaError: std::error::Error {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Rejected configuration value.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("`{field}` must be a finite, non-negative number (got {value})")]
    NotNonNegative { field: &'static str, value: f32 },

    #[error("`{field}` must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("`{min_field}` ({min}) must not exceed `{max_field}` ({max})")]
    InvertedRange {
        min_field: &'static str,
        min: f32,
        max_field: &'static str,
        max: f32,
    },
}

impl ArenaError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotNonNegative { .. } => "config.not_non_negative",
            Self::NotPositive { .. } => "config.not_positive",
            Self::InvertedRange { .. } => "config.inverted_range",
        }
    }
}
