//! Per-tick control intent.
use glam::Vec2;

use crate::types::{AbilityId, EntityId};

/// What an entity wants to do this tick.
///
/// Produced by an intent provider (player input or a decision tree) and
/// consumed by the state machine. Request flags are edge-like: providers
/// rebuild the intent every tick via [`reset`](Self::reset).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputIntent {
    pub move_vector: Vec2,
    pub dash_requested: bool,
    pub ability_requested: Option<AbilityId>,
    pub interact_requested: bool,
    /// Entity the requested ability should be aimed at, if any.
    pub target: Option<EntityId>,
    /// Last non-zero facing. Dashes without movement go this way.
    pub last_facing: Vec2,
}

impl Default for InputIntent {
    fn default() -> Self {
        Self {
            move_vector: Vec2::ZERO,
            dash_requested: false,
            ability_requested: None,
            interact_requested: false,
            target: None,
            last_facing: Vec2::X,
        }
    }
}

impl InputIntent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears movement and every request. Facing is kept.
    pub fn reset(&mut self) {
        *self = Self {
            last_facing: self.last_facing,
            ..Self::default()
        };
    }

    /// Sets the move vector and, when it is non-zero, the facing.
    pub fn set_movement(&mut self, vector: Vec2) {
        self.move_vector = vector;
        self.face(vector);
    }

    /// Updates facing if `direction` is non-zero.
    pub fn face(&mut self, direction: Vec2) {
        if let Some(dir) = direction.try_normalize() {
            self.last_facing = dir;
        }
    }

    pub fn is_moving(&self, epsilon: f32) -> bool {
        self.move_vector.length() > epsilon
    }

    pub fn has_requests(&self) -> bool {
        self.dash_requested || self.ability_requested.is_some() || self.interact_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_keeps_facing() {
        let mut intent = InputIntent::new();
        intent.set_movement(Vec2::new(0.0, -2.0));
        intent.dash_requested = true;
        intent.ability_requested = Some(AbilityId(1));

        intent.reset();
        assert_eq!(intent.move_vector, Vec2::ZERO);
        assert!(!intent.has_requests());
        assert_eq!(intent.last_facing, Vec2::NEG_Y);
    }

    #[test]
    fn zero_movement_keeps_previous_facing() {
        let mut intent = InputIntent::new();
        intent.set_movement(Vec2::Y);
        intent.set_movement(Vec2::ZERO);
        assert_eq!(intent.last_facing, Vec2::Y);
        assert!(!intent.is_moving(1e-3));
    }
}
