//! Declarative transition table.
use super::StateKind;

/// Condition under which a transition fires.
///
/// Variants are listed from highest to lowest priority; when several rows
/// leaving the same state hold in one tick, the highest priority wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Trigger {
    /// The running cast was cancelled. Forces the state out of Ability.
    AbilityCancelled,
    DashRequestedAndReady,
    AbilityRequested,
    InteractRequested,
    DashFinished,
    AbilityComplete,
    Always,
    MoveNonZero,
    MoveZero,
}

impl Trigger {
    /// Lower is stronger: dash > ability > interact > movement.
    pub const fn priority(self) -> u8 {
        match self {
            Self::AbilityCancelled => 0,
            Self::DashRequestedAndReady => 1,
            Self::AbilityRequested => 2,
            Self::InteractRequested => 3,
            Self::DashFinished | Self::AbilityComplete | Self::Always => 4,
            Self::MoveNonZero | Self::MoveZero => 5,
        }
    }
}

/// Destination of a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Fixed(StateKind),
    /// Move if the pending move vector is non-zero, else Idle.
    ByMoveVector,
}

impl From<StateKind> for Target {
    fn from(kind: StateKind) -> Self {
        Self::Fixed(kind)
    }
}

/// One row of the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: StateKind,
    pub trigger: Trigger,
    pub to: Target,
}

impl Transition {
    pub const fn new(from: StateKind, trigger: Trigger, to: Target) -> Self {
        Self { from, trigger, to }
    }
}

/// Transition rows ordered by trigger priority.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionTable {
    rows: Vec<Transition>,
}

impl TransitionTable {
    /// Builds a table, ordering rows by trigger priority. Rows with equal
    /// priority keep their relative order.
    pub fn new(mut rows: Vec<Transition>) -> Self {
        rows.sort_by_key(|row| row.trigger.priority());
        Self { rows }
    }

    /// The standard control table.
    ///
    /// ```text
    /// Idle     dash & ready → Dash | ability → Ability | move → Move
    /// Move     dash & ready → Dash | ability → Ability | interact → Interact | no move → Idle
    /// Dash     finished → Move / Idle
    /// Ability  cancelled → Idle | complete → Move / Idle
    /// Interact always → Move / Idle
    /// ```
    pub fn standard() -> Self {
        use StateKind::{Ability, Dash, Idle, Interact, Move};
        use Target::{ByMoveVector, Fixed};
        use Trigger::*;

        Self::new(vec![
            Transition::new(Idle, DashRequestedAndReady, Fixed(Dash)),
            Transition::new(Idle, AbilityRequested, Fixed(Ability)),
            Transition::new(Idle, MoveNonZero, Fixed(Move)),
            Transition::new(Move, DashRequestedAndReady, Fixed(Dash)),
            Transition::new(Move, InteractRequested, Fixed(Interact)),
            Transition::new(Move, AbilityRequested, Fixed(Ability)),
            Transition::new(Move, MoveZero, Fixed(Idle)),
            Transition::new(Dash, DashFinished, ByMoveVector),
            Transition::new(Ability, AbilityCancelled, Fixed(Idle)),
            Transition::new(Ability, AbilityComplete, ByMoveVector),
            Transition::new(Interact, Always, ByMoveVector),
        ])
    }

    /// Rows leaving `from`, strongest first.
    pub fn leaving(&self, from: StateKind) -> impl Iterator<Item = &Transition> {
        self.rows.iter().filter(move |row| row.from == from)
    }

    pub fn rows(&self) -> &[Transition] {
        &self.rows
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::standard()
    }
}
