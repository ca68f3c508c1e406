//! Ages per-entity sub-effects: filter fades and targeting line pulses.

use hecs::World;

use crate::effects::ActiveEffects;
use crate::scene::SceneGraph;

pub fn run(world: &mut World, dt: f32, scene: &mut dyn SceneGraph) {
    for (_entity, effects) in world.query_mut::<&mut ActiveEffects>() {
        effects.tick(dt, scene);
    }
}
