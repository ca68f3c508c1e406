//! Path-following movement for zombies.

use hecs::World;

use holdout_core::components::Zombie;
use holdout_core::types::Position;

use crate::navigation::{Mover, PathFollower};

/// Advance every zombie along its path and copy the result into `Position`.
pub fn run(world: &mut World, dt: f32) {
    for (_entity, (pos, zombie, follower)) in
        world.query_mut::<(&mut Position, &Zombie, &mut PathFollower)>()
    {
        if zombie.is_dead() {
            continue;
        }
        let step = follower.advance(dt, zombie.speed);
        pos.0 = step.position;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::navigation::WaypointPath;
    use crate::world_setup::spawn_zombie;
    use glam::Vec2;
    use holdout_core::enums::ZombieKind;

    #[test]
    fn position_follows_path() {
        let mut world = World::new();
        let path = Arc::new(WaypointPath::from_tuples(&[(0.0, 0.0), (100.0, 0.0)]).unwrap());
        let entity = spawn_zombie(&mut world, ZombieKind::Runner, &path);
        let speed = world.get::<&Zombie>(entity).unwrap().speed;

        run(&mut world, 10.0);
        let pos = world.get::<&Position>(entity).unwrap().0;
        assert!((pos - Vec2::new(speed * 10.0, 0.0)).length() < 1e-4);
    }
}
