//! Movement system - walks entities toward their current target

use crate::components::{Movement, Position, Vec2};
use hecs::World;

/// Within this distance the entity snaps exactly onto its target
const SNAP_DISTANCE: f32 = 0.5;

/// Move every entity with a `Movement` component toward its target.
///
/// Straight-line interpolation only - target choice is the queue
/// manager's job. The step is capped so an entity never overshoots.
pub fn movement_system(world: &mut World, dt: f32) {
    let dt = dt.max(0.0);
    for (_, (pos, movement)) in world.query_mut::<(&mut Position, &Movement)>() {
        step_toward(&mut pos.0, movement.target, movement.speed, dt);
    }
}

/// Advance `pos` toward `target` by at most `speed * dt` units
pub(crate) fn step_toward(pos: &mut Vec2, target: Vec2, speed: f32, dt: f32) {
    let diff = target - *pos;
    let dist = diff.length();

    if dist <= SNAP_DISTANCE {
        *pos = target;
        return;
    }

    let step = (speed * dt).min(dist);
    *pos = *pos + diff.normalize() * step;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_arrives() {
        let mut world = World::new();

        let entity = world.spawn((
            Position::new(0.0, 0.0),
            Movement::new(Vec2::new(1.0, 0.0), 2.0),
        ));

        // Move for 1 second at speed 2 - distance is 1, should land exactly
        movement_system(&mut world, 1.0);

        let pos = world.get::<&Position>(entity).unwrap();
        assert!((pos.0.x - 1.0).abs() < 0.01);
        assert_eq!(pos.0.y, 0.0);
    }

    #[test]
    fn test_movement_partial() {
        let mut world = World::new();

        let entity = world.spawn((
            Position::new(0.0, 0.0),
            Movement::new(Vec2::new(10.0, 0.0), 2.0),
        ));

        // Move for 1 second at speed 2 - should cover 2 units
        movement_system(&mut world, 1.0);

        let pos = world.get::<&Position>(entity).unwrap();
        assert!((pos.0.x - 2.0).abs() < 0.01);
    }

    #[test]
    fn test_movement_never_overshoots() {
        let mut world = World::new();

        let entity = world.spawn((
            Position::new(0.0, 0.0),
            Movement::new(Vec2::new(3.0, 0.0), 120.0),
        ));

        // One big step at high speed lands on the target, not past it
        movement_system(&mut world, 1.0);

        let pos = world.get::<&Position>(entity).unwrap();
        assert_eq!(pos.0, Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_movement_snaps_when_close() {
        let mut world = World::new();

        let entity = world.spawn((
            Position::new(9.7, 0.0),
            Movement::new(Vec2::new(10.0, 0.0), 120.0),
        ));

        // Within the snap distance even a zero-length step lands exactly
        movement_system(&mut world, 0.0);

        let pos = world.get::<&Position>(entity).unwrap();
        assert_eq!(pos.0, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_movement_diagonal_speed() {
        let mut pos = Vec2::ZERO;
        step_toward(&mut pos, Vec2::new(30.0, 40.0), 10.0, 1.0);

        // Travelled 10 units along the direction vector, not per axis
        assert!((pos.length() - 10.0).abs() < 0.01);
    }
}
