//! Raw device input to [`InputIntent`] conversion.
use std::time::Duration;

use arena_core::{AbilitySlot, InputConfig, InputIntent, Vec2};
use behavior_tree::BehaviorError;
use tracing::debug;

use super::IntentProvider;

/// One sample of device state as the embedder sees it.
///
/// `axis` and `aim` are levels (held); `dash`, `ability_slot` and `interact`
/// are presses and fire once.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawInput {
    pub axis: Vec2,
    pub dash: bool,
    pub ability_slot: Option<usize>,
    pub interact: bool,
    /// Aim direction (mouse or right stick). Overrides movement for facing.
    pub aim: Option<Vec2>,
}

/// Turns submitted [`RawInput`] into one intent per tick.
///
/// Presses submitted between two ticks are latched and consumed by the next
/// tick, so a press is never lost and never repeats.
#[derive(Debug)]
pub struct PlayerInputAdapter {
    deadzone: f32,
    latest: RawInput,
    facing: Vec2,
}

impl PlayerInputAdapter {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            deadzone: config.deadzone,
            latest: RawInput::default(),
            facing: Vec2::X,
        }
    }

    /// Records a device sample.
    pub fn submit(&mut self, input: RawInput) {
        self.latest = RawInput {
            dash: self.latest.dash || input.dash,
            ability_slot: input.ability_slot.or(self.latest.ability_slot),
            interact: self.latest.interact || input.interact,
            ..input
        };
    }

    /// Drops held levels and latched presses.
    pub fn clear(&mut self) {
        self.latest = RawInput::default();
    }

    fn movement(&self) -> Vec2 {
        let axis = self.latest.axis;
        if !axis.is_finite() || axis.length() <= self.deadzone {
            Vec2::ZERO
        } else {
            axis.clamp_length_max(1.0)
        }
    }
}

impl IntentProvider for PlayerInputAdapter {
    fn next_intent(
        &mut self,
        slots: &[AbilitySlot],
        _dt: Duration,
    ) -> Result<InputIntent, BehaviorError> {
        let mut intent = InputIntent {
            last_facing: self.facing,
            ..InputIntent::default()
        };
        intent.set_movement(self.movement());
        if let Some(aim) = self.latest.aim {
            intent.face(aim);
        }

        intent.dash_requested = self.latest.dash;
        intent.interact_requested = self.latest.interact;
        intent.ability_requested = self.latest.ability_slot.and_then(|index| {
            let slot = slots.get(index).map(|slot| slot.id);
            if slot.is_none() {
                debug!(target: "arena::input", slot = index, "no ability in slot");
            }
            slot
        });

        self.latest.dash = false;
        self.latest.interact = false;
        self.latest.ability_slot = None;
        self.facing = intent.last_facing;

        Ok(intent)
    }
}

#[cfg(test)]
mod tests {
    use arena_core::AbilityId;

    use super::*;

    const TICK: Duration = Duration::from_millis(16);

    fn adapter() -> PlayerInputAdapter {
        PlayerInputAdapter::new(&InputConfig::default())
    }

    fn slots() -> Vec<AbilitySlot> {
        vec![
            AbilitySlot { id: AbilityId(10), ready: true },
            AbilitySlot { id: AbilityId(11), ready: false },
        ]
    }

    #[test]
    fn deadzone_zeroes_small_axis() {
        let mut adapter = adapter();
        adapter.submit(RawInput {
            axis: Vec2::new(0.05, 0.0),
            ..RawInput::default()
        });

        let intent = adapter.next_intent(&slots(), TICK).unwrap();
        assert_eq!(intent.move_vector, Vec2::ZERO);
    }

    #[test]
    fn axis_is_clamped_and_sets_facing() {
        let mut adapter = adapter();
        adapter.submit(RawInput {
            axis: Vec2::new(0.0, -3.0),
            ..RawInput::default()
        });

        let intent = adapter.next_intent(&slots(), TICK).unwrap();
        assert_eq!(intent.move_vector, Vec2::NEG_Y);
        assert_eq!(intent.last_facing, Vec2::NEG_Y);
    }

    #[test]
    fn aim_overrides_movement_facing() {
        let mut adapter = adapter();
        adapter.submit(RawInput {
            axis: Vec2::X,
            aim: Some(Vec2::new(0.0, 2.0)),
            ..RawInput::default()
        });

        let intent = adapter.next_intent(&slots(), TICK).unwrap();
        assert_eq!(intent.move_vector, Vec2::X);
        assert_eq!(intent.last_facing, Vec2::Y);
    }

    #[test]
    fn presses_fire_once_and_axis_is_held() {
        let mut adapter = adapter();
        adapter.submit(RawInput {
            axis: Vec2::X,
            dash: true,
            interact: true,
            ability_slot: Some(1),
            ..RawInput::default()
        });

        let first = adapter.next_intent(&slots(), TICK).unwrap();
        assert!(first.dash_requested);
        assert!(first.interact_requested);
        assert_eq!(first.ability_requested, Some(AbilityId(11)));

        let second = adapter.next_intent(&slots(), TICK).unwrap();
        assert!(!second.has_requests());
        assert_eq!(second.move_vector, Vec2::X);
    }

    #[test]
    fn presses_between_ticks_are_latched() {
        let mut adapter = adapter();
        adapter.submit(RawInput {
            dash: true,
            ..RawInput::default()
        });
        adapter.submit(RawInput::default());

        assert!(adapter.next_intent(&slots(), TICK).unwrap().dash_requested);
    }

    #[test]
    fn facing_survives_neutral_ticks() {
        let mut adapter = adapter();
        adapter.submit(RawInput {
            axis: Vec2::NEG_X,
            ..RawInput::default()
        });
        adapter.next_intent(&slots(), TICK).unwrap();
        adapter.submit(RawInput::default());

        let intent = adapter.next_intent(&slots(), TICK).unwrap();
        assert_eq!(intent.last_facing, Vec2::NEG_X);
    }

    #[test]
    fn empty_slot_requests_nothing() {
        let mut adapter = adapter();
        adapter.submit(RawInput {
            ability_slot: Some(7),
            ..RawInput::default()
        });

        let intent = adapter.next_intent(&slots(), TICK).unwrap();
        assert_eq!(intent.ability_requested, None);
    }
}
