//! Entity spawn factories for zombies and towers.
//!
//! Each factory attaches the full component bundle its systems query for.

use std::sync::Arc;

use glam::Vec2;
use hecs::World;

use holdout_core::components::{Tower, Zombie};
use holdout_core::enums::{TowerKind, ZombieKind};
use holdout_core::types::Position;

use crate::effects::ActiveEffects;
use crate::navigation::{Mover, PathFollower, WaypointPath};

/// Spawn a zombie at the head of `path`.
pub fn spawn_zombie(world: &mut World, kind: ZombieKind, path: &Arc<WaypointPath>) -> hecs::Entity {
    let follower = PathFollower::new(Arc::clone(path));
    world.spawn((
        Position(follower.position()),
        Zombie::from_profile(kind),
        follower,
        ActiveEffects::new(),
    ))
}

/// Spawn a tower at a world position. Placement rules are checked by the caller.
pub fn spawn_tower(world: &mut World, kind: TowerKind, at: Vec2) -> hecs::Entity {
    world.spawn((Position(at), Tower::from_profile(kind), ActiveEffects::new()))
}
