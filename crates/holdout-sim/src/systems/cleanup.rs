//! Cleanup system: removes killed zombies and zombies that reached the goal.

use hecs::{Entity, World};

use holdout_core::components::Zombie;
use holdout_core::enums::ZombieKind;

use crate::effects::ActiveEffects;
use crate::navigation::{Mover, PathFollower};
use crate::scene::SceneGraph;

/// Despawn finished zombies, releasing their sub-effects first.
///
/// Returns the kinds of zombies that escaped. A zombie that died on the
/// same tick it arrived counts as killed, not escaped.
pub fn run(
    world: &mut World,
    despawn_buffer: &mut Vec<Entity>,
    scene: &mut dyn SceneGraph,
) -> Vec<ZombieKind> {
    despawn_buffer.clear();
    let mut escaped = Vec::new();

    for (entity, (zombie, follower)) in world.query_mut::<(&Zombie, &PathFollower)>() {
        if zombie.is_dead() {
            despawn_buffer.push(entity);
        } else if follower.has_arrived() {
            escaped.push(zombie.kind);
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        if let Ok(effects) = world.query_one_mut::<&mut ActiveEffects>(entity) {
            effects.clear(scene);
        }
        let _ = world.despawn(entity);
    }
    escaped
}

/// Despawn every entity, releasing all sub-effects. Used on teardown.
pub fn despawn_all(world: &mut World, scene: &mut dyn SceneGraph) -> usize {
    for (_entity, effects) in world.query_mut::<&mut ActiveEffects>() {
        effects.clear(scene);
    }
    let count = world.len() as usize;
    world.clear();
    count
}
