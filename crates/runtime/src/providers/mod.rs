//! Intent providers: where each entity's per-tick [`InputIntent`] comes from.
//!
//! - [`player`]: converts raw device input submitted by the embedder
//! - [`ai`]: evaluates a shared decision tree against a per-entity context
//!
//! Custom sources implement [`IntentProvider`] directly.

pub mod ai;
pub mod player;

use std::fmt;
use std::time::Duration;

use arena_core::{AbilitySlot, InputIntent};
use behavior_tree::BehaviorError;

pub use ai::BehaviorTreeProvider;
pub use player::{PlayerInputAdapter, RawInput};

/// Produces one [`InputIntent`] per tick for a single entity.
///
/// `slots` is the entity's ability readiness as of the start of this tick.
pub trait IntentProvider: Send {
    fn next_intent(
        &mut self,
        slots: &[AbilitySlot],
        dt: Duration,
    ) -> Result<InputIntent, BehaviorError>;
}

/// Kind of controller driving an entity.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProviderKind {
    Player,
    Ai,
    Custom,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderKind::Player => "player",
            ProviderKind::Ai => "ai",
            ProviderKind::Custom => "custom",
        };
        write!(f, "{}", label)
    }
}

/// The intent provider owned by one runtime entity.
pub enum IntentSource {
    Player(PlayerInputAdapter),
    Ai(BehaviorTreeProvider),
    Custom(Box<dyn IntentProvider>),
}

impl IntentSource {
    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::Player(_) => ProviderKind::Player,
            Self::Ai(_) => ProviderKind::Ai,
            Self::Custom(_) => ProviderKind::Custom,
        }
    }

    /// Clears whatever the source remembers between ticks.
    pub fn reset(&mut self) {
        match self {
            Self::Player(adapter) => adapter.clear(),
            Self::Ai(provider) => provider.reset(),
            Self::Custom(_) => {}
        }
    }

    pub fn as_player_mut(&mut self) -> Option<&mut PlayerInputAdapter> {
        match self {
            Self::Player(adapter) => Some(adapter),
            _ => None,
        }
    }
}

impl IntentProvider for IntentSource {
    fn next_intent(
        &mut self,
        slots: &[AbilitySlot],
        dt: Duration,
    ) -> Result<InputIntent, BehaviorError> {
        match self {
            Self::Player(adapter) => adapter.next_intent(slots, dt),
            Self::Ai(provider) => provider.next_intent(slots, dt),
            Self::Custom(provider) => provider.next_intent(slots, dt),
        }
    }
}
