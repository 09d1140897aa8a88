//! Test helper functions for setting up worlds and entities.

use glam::Vec2;

use crate::angle::Angle;
use crate::entity::{CollisionKind, EntityId, RotationMode};
use crate::world::World;

/// Spawns a ship-sized collidable entity at `position`.
pub fn spawn_ship(world: &mut World, position: Vec2) -> EntityId {
    let id = world.spawn("ship", CollisionKind::Ship);
    let ship = world.get_mut(id).unwrap();
    ship.set_position(position);
    ship.transform.size = Vec2::splat(8.0);
    id
}

/// Spawns a small projectile at `position` flying along `heading` at
/// `speed`.
pub fn spawn_missile(world: &mut World, position: Vec2, heading: Angle, speed: f32) -> EntityId {
    let id = world.spawn("missile", CollisionKind::Projectile);
    let missile = world.get_mut(id).unwrap();
    missile.set_position(position);
    missile.transform.size = Vec2::splat(2.0);
    missile.set_rotation(heading);
    missile.set_speed(speed);
    id
}

/// Sets up a pursuit: a hunter at the origin tracking a target at
/// `target_position`, with the given turn-rate cap.
///
/// Returns `(hunter, target)`.
pub fn setup_pursuit(
    world: &mut World,
    target_position: Vec2,
    max_turn_rate: Angle,
) -> (EntityId, EntityId) {
    let target = spawn_ship(world, target_position);
    let hunter = spawn_ship(world, Vec2::ZERO);
    {
        let hunter = world.get_mut(hunter).unwrap();
        hunter.kinematics.max_rotation_speed = max_turn_rate;
        hunter.set_rotation_mode(RotationMode::Tracking);
        hunter.set_tracking_target(Some(target));
    }
    (hunter, target)
}
