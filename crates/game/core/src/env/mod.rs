//! Collaborators the control core talks to but does not own.
//!
//! The embedding game implements these against its physics, world and
//! interaction systems. Implementations must be cheap; they are called from
//! inside a tick.
use glam::Vec2;

use crate::types::EntityId;

/// Drives one entity's body.
///
/// `move_by` takes this tick's desired movement (length at most 1); the
/// embedder scales and integrates it. Dash mechanics (speed, duration, dash cooldown) belong to the
/// actuator, the state machine only asks.
pub trait Actuator: Send + Sync {
    /// Sets this tick's movement. `Vec2::ZERO` stops the body.
    fn move_by(&mut self, direction: Vec2);

    /// Starts a dash toward `direction`. Returns `false` when refused.
    fn start_dash(&mut self, direction: Vec2) -> bool;

    /// Whether a dash started by this actuator is still in motion.
    fn is_dashing(&self) -> bool;

    /// Whether `start_dash` would currently be accepted.
    fn is_dash_ready(&self) -> bool;
}

/// Performs context interactions (doors, levers, pickups).
pub trait Interactor: Send + Sync {
    /// Interacts with whatever `entity` faces. Returns whether anything
    /// responded.
    fn interact(&self, entity: EntityId, facing: Vec2) -> bool;
}

/// Read-only spatial lookups used by decision trees.
pub trait SpatialQuery: Send + Sync {
    fn position(&self, entity: EntityId) -> Option<Vec2>;

    /// Whether `entity` still exists and can be targeted.
    fn is_valid_target(&self, entity: EntityId) -> bool;
}

/// Target acquisition for AI.
pub trait TargetProvider: Send + Sync {
    /// Best target for `from`, if any.
    fn nearest_target(&self, from: EntityId) -> Option<EntityId>;
}

/// Interactor that never finds anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoInteraction;

impl Interactor for NoInteraction {
    fn interact(&self, _entity: EntityId, _facing: Vec2) -> bool {
        false
    }
}
