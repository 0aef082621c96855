//! State identities.
use crate::ability::AbilityCast;

/// The five control states. Exactly one is active per entity.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StateKind {
    #[default]
    Idle,
    Move,
    Dash,
    Ability,
    Interact,
}

/// Active state plus whatever it owns.
#[derive(Debug, Default)]
pub(crate) enum ActiveState {
    #[default]
    Idle,
    Move,
    Dash,
    /// `None` only between a rejected cast and the follow-up transition.
    Ability(Option<AbilityCast>),
    Interact,
}

impl ActiveState {
    pub(crate) fn kind(&self) -> StateKind {
        match self {
            Self::Idle => StateKind::Idle,
            Self::Move => StateKind::Move,
            Self::Dash => StateKind::Dash,
            Self::Ability(_) => StateKind::Ability,
            Self::Interact => StateKind::Interact,
        }
    }

    pub(crate) fn cast(&self) -> Option<&AbilityCast> {
        match self {
            Self::Ability(cast) => cast.as_ref(),
            _ => None,
        }
    }
}
