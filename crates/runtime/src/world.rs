//! Minimal kinematic world backing the control collaborators.
//!
//! Bodies move in a plane at a fixed speed and dash in a straight line. The
//! world integrates once per runtime tick, after every entity has decided and
//! updated. Controllers reach it through [`BodyActuator`]; decision trees
//! through [`WorldView`].
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use arena_core::{
    Actuator, ArenaConfig, ConfigError, CooldownTimer, EntityId, SpatialQuery, TargetProvider,
    Vec2,
};
use parking_lot::RwLock;

/// World shared between the runtime, actuators and views.
pub type SharedWorld = Arc<RwLock<World>>;

/// Allegiance used for target selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Faction {
    Player,
    Hostile,
    Neutral,
}

impl Faction {
    pub fn is_hostile_to(self, other: Faction) -> bool {
        matches!(
            (self, other),
            (Faction::Player, Faction::Hostile) | (Faction::Hostile, Faction::Player)
        )
    }
}

#[derive(Clone, Copy, Debug)]
struct Dash {
    direction: Vec2,
    remaining: Duration,
}

/// A single body.
#[derive(Clone, Debug)]
pub struct Body {
    pub position: Vec2,
    pub faction: Faction,
    movement: Vec2,
    dash: Option<Dash>,
    dash_cooldown: CooldownTimer,
}

impl Body {
    pub fn is_dashing(&self) -> bool {
        self.dash.is_some()
    }

    pub fn is_dash_ready(&self) -> bool {
        self.dash.is_none() && self.dash_cooldown.is_ready()
    }

    /// Movement requested for the next integration (length at most 1).
    pub fn movement(&self) -> Vec2 {
        self.movement
    }
}

/// All bodies plus the movement tuning they share.
#[derive(Debug)]
pub struct World {
    bodies: BTreeMap<EntityId, Body>,
    move_speed: f32,
    dash_speed: f32,
    dash_duration: Duration,
    dash_cooldown: Duration,
    sight_range: f32,
}

impl World {
    pub fn new(config: &ArenaConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            bodies: BTreeMap::new(),
            move_speed: config.movement.move_speed,
            dash_speed: config.movement.dash_speed,
            dash_duration: config.movement.dash_duration()?,
            dash_cooldown: config.movement.dash_cooldown()?,
            sight_range: config.ai.sight_range,
        })
    }

    pub fn shared(self) -> SharedWorld {
        Arc::new(RwLock::new(self))
    }

    pub fn insert(&mut self, entity: EntityId, position: Vec2, faction: Faction) {
        self.bodies.insert(
            entity,
            Body {
                position,
                faction,
                movement: Vec2::ZERO,
                dash: None,
                dash_cooldown: CooldownTimer::new(self.dash_cooldown),
            },
        );
    }

    pub fn remove(&mut self, entity: EntityId) -> Option<Body> {
        self.bodies.remove(&entity)
    }

    pub fn body(&self, entity: EntityId) -> Option<&Body> {
        self.bodies.get(&entity)
    }

    pub fn body_mut(&mut self, entity: EntityId) -> Option<&mut Body> {
        self.bodies.get_mut(&entity)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Starts a dash if the body is ready. The dash cooldown starts now.
    pub fn start_dash(&mut self, entity: EntityId, direction: Vec2) -> bool {
        let duration = self.dash_duration;
        let Some(body) = self.bodies.get_mut(&entity) else {
            return false;
        };
        let Some(direction) = direction.try_normalize() else {
            return false;
        };
        if !body.is_dash_ready() {
            return false;
        }

        body.dash = Some(Dash {
            direction,
            remaining: duration,
        });
        body.movement = Vec2::ZERO;
        body.dash_cooldown.start();
        true
    }

    /// Closest body hostile to `from` within sight range. Ties go to the
    /// lower entity id.
    pub fn nearest_hostile(&self, from: EntityId) -> Option<EntityId> {
        let origin = self.bodies.get(&from)?;
        let mut best: Option<(EntityId, f32)> = None;

        for (&id, body) in &self.bodies {
            if id == from || !origin.faction.is_hostile_to(body.faction) {
                continue;
            }
            let distance = origin.position.distance(body.position);
            if distance > self.sight_range {
                continue;
            }
            if best.is_none_or(|(_, closest)| distance < closest) {
                best = Some((id, distance));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Advances every body by `dt`.
    pub fn integrate(&mut self, dt: Duration) {
        let (move_speed, dash_speed) = (self.move_speed, self.dash_speed);

        for body in self.bodies.values_mut() {
            match &mut body.dash {
                Some(dash) => {
                    let step = dt.min(dash.remaining);
                    body.position += dash.direction * dash_speed * step.as_secs_f32();
                    dash.remaining -= step;
                    if dash.remaining.is_zero() {
                        body.dash = None;
                    }
                }
                None => body.position += body.movement * move_speed * dt.as_secs_f32(),
            }
            body.dash_cooldown.tick(dt);
        }
    }
}

/// [`Actuator`] driving one body in a [`SharedWorld`].
///
/// Calls on a body that no longer exists are ignored.
pub struct BodyActuator {
    entity: EntityId,
    world: SharedWorld,
}

impl BodyActuator {
    pub fn new(entity: EntityId, world: SharedWorld) -> Self {
        Self { entity, world }
    }
}

impl Actuator for BodyActuator {
    fn move_by(&mut self, direction: Vec2) {
        if let Some(body) = self.world.write().body_mut(self.entity) {
            body.movement = direction.clamp_length_max(1.0);
        }
    }

    fn start_dash(&mut self, direction: Vec2) -> bool {
        self.world.write().start_dash(self.entity, direction)
    }

    fn is_dashing(&self) -> bool {
        self.world
            .read()
            .body(self.entity)
            .is_some_and(Body::is_dashing)
    }

    fn is_dash_ready(&self) -> bool {
        self.world
            .read()
            .body(self.entity)
            .is_some_and(Body::is_dash_ready)
    }
}

/// Read-only perception over a [`SharedWorld`].
#[derive(Clone)]
pub struct WorldView {
    world: SharedWorld,
}

impl WorldView {
    pub fn new(world: SharedWorld) -> Self {
        Self { world }
    }
}

impl SpatialQuery for WorldView {
    fn position(&self, entity: EntityId) -> Option<Vec2> {
        self.world.read().body(entity).map(|body| body.position)
    }

    fn is_valid_target(&self, entity: EntityId) -> bool {
        self.world.read().body(entity).is_some()
    }
}

impl TargetProvider for WorldView {
    fn nearest_target(&self, from: EntityId) -> Option<EntityId> {
        self.world.read().nearest_hostile(from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(100);

    fn world() -> World {
        World::new(&ArenaConfig::default()).unwrap()
    }

    #[test]
    fn moving_body_travels_at_move_speed() {
        let mut world = world();
        world.insert(EntityId(1), Vec2::ZERO, Faction::Player);
        world.body_mut(EntityId(1)).unwrap().movement = Vec2::X;

        world.integrate(Duration::from_secs(1));
        let position = world.body(EntityId(1)).unwrap().position;
        assert!((position.x - ArenaConfig::default().movement.move_speed).abs() < 1e-4);
    }

    #[test]
    fn dash_lasts_its_duration_then_cools_down() {
        let mut world = world();
        world.insert(EntityId(1), Vec2::ZERO, Faction::Player);

        assert!(world.start_dash(EntityId(1), Vec2::Y));
        assert!(!world.start_dash(EntityId(1), Vec2::Y));

        world.integrate(TICK);
        assert!(world.body(EntityId(1)).unwrap().is_dashing());
        world.integrate(TICK);
        let body = world.body(EntityId(1)).unwrap();
        assert!(!body.is_dashing());
        assert!(!body.is_dash_ready());

        let travelled = body.position.y;
        let movement = ArenaConfig::default().movement;
        assert!((travelled - movement.dash_speed * movement.dash_duration_secs).abs() < 1e-3);

        for _ in 0..8 {
            world.integrate(TICK);
        }
        assert!(world.body(EntityId(1)).unwrap().is_dash_ready());
    }

    #[test]
    fn zero_direction_dash_is_refused() {
        let mut world = world();
        world.insert(EntityId(1), Vec2::ZERO, Faction::Player);
        assert!(!world.start_dash(EntityId(1), Vec2::ZERO));
    }

    #[test]
    fn nearest_hostile_respects_faction_and_sight() {
        let mut world = world();
        world.insert(EntityId(0), Vec2::ZERO, Faction::Player);
        world.insert(EntityId(1), Vec2::new(5.0, 0.0), Faction::Hostile);
        world.insert(EntityId(2), Vec2::new(3.0, 0.0), Faction::Hostile);
        world.insert(EntityId(3), Vec2::new(1.0, 0.0), Faction::Neutral);
        world.insert(EntityId(4), Vec2::new(50.0, 0.0), Faction::Player);

        assert_eq!(world.nearest_hostile(EntityId(0)), Some(EntityId(2)));
        assert_eq!(world.nearest_hostile(EntityId(1)), Some(EntityId(0)));
        assert_eq!(world.nearest_hostile(EntityId(3)), None);
        // Out of sight.
        world.remove(EntityId(0));
        assert_eq!(world.nearest_hostile(EntityId(1)), None);
    }

    #[test]
    fn actuator_on_missing_body_is_inert() {
        let world = world().shared();
        let mut actuator = BodyActuator::new(EntityId(9), Arc::clone(&world));

        actuator.move_by(Vec2::X);
        assert!(!actuator.start_dash(Vec2::X));
        assert!(!actuator.is_dashing());
        assert!(!actuator.is_dash_ready());
    }
}
