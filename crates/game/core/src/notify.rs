//! Outbound notifications for UI and telemetry.
use std::time::Duration;

use crate::ability::CastOutcome;
use crate::fsm::StateKind;
use crate::types::{AbilityId, EntityId};

/// Something observers may want to know about.
///
/// Sent synchronously from inside a tick. Sinks must not call back into the
/// controller that emitted the notification.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Notification {
    /// Sent every tick an ability's cooldown is running, including the tick it
    /// reaches zero.
    CooldownChanged {
        entity: EntityId,
        ability: AbilityId,
        remaining: Duration,
        percent: f32,
    },
    /// Sent once when a cooldown reaches zero.
    CooldownEnded {
        entity: EntityId,
        ability: AbilityId,
    },
    StateEntered {
        entity: EntityId,
        state: StateKind,
    },
    StateExited {
        entity: EntityId,
        state: StateKind,
    },
    /// A cast finished or was cancelled.
    AbilityResolved {
        entity: EntityId,
        outcome: CastOutcome,
    },
}

impl Notification {
    pub fn entity(&self) -> EntityId {
        match self {
            Self::CooldownChanged { entity, .. }
            | Self::CooldownEnded { entity, .. }
            | Self::StateEntered { entity, .. }
            | Self::StateExited { entity, .. }
            | Self::AbilityResolved { entity, .. } => *entity,
        }
    }
}

/// Receiver of [`Notification`]s.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self, _notification: Notification) {}
}
