//! Entity state machine.
//!
//! One [`StateMachine`] per controlled entity. Each tick runs two phases:
//!
//! 1. **Transition**: the strongest row of the [`TransitionTable`] whose
//!    trigger holds switches state (exit old, enter new). An enter hook may
//!    itself request a follow-up transition (a one-shot Interact, a refused
//!    dash, a rejected cast); those chain before the update phase.
//! 2. **Update**: the settled state's per-tick work (apply movement, step
//!    the running cast).
mod machine;
mod state;
mod transition;

pub use machine::{StateContext, StateMachine};
pub use state::StateKind;
pub use transition::{Target, Transition, TransitionTable, Trigger};
