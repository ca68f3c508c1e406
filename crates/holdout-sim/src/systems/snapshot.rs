//! Snapshot system: queries the ECS world and builds a GameStateSnapshot.
//!
//! Read-only; never modifies the world.

use hecs::World;

use holdout_core::components::{Tower, Zombie};
use holdout_core::enums::GamePhase;
use holdout_core::events::CombatEvent;
use holdout_core::state::*;
use holdout_core::types::{Position, SimTime};

use crate::effects::ActiveEffects;
use crate::navigation::PathFollower;

/// Everything outside the world that the snapshot reports.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotMeta<'a> {
    pub time: SimTime,
    pub phase: GamePhase,
    pub lives: u32,
    pub particles: usize,
    pub score: &'a ScoreView,
}

pub fn build_snapshot(
    world: &World,
    meta: SnapshotMeta<'_>,
    events: Vec<CombatEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: meta.time,
        phase: meta.phase,
        lives: meta.lives,
        zombies: build_zombies(world),
        towers: build_towers(world),
        particles: meta.particles,
        events,
        score: meta.score.clone(),
    }
}

fn build_zombies(world: &World) -> Vec<ZombieView> {
    world
        .query::<(&Position, &Zombie, &PathFollower, &ActiveEffects)>()
        .iter()
        .map(|(_, (pos, zombie, follower, effects))| ZombieView {
            kind: zombie.kind,
            position: *pos,
            health: zombie.health.max(0.0),
            max_health: zombie.max_health,
            progress: follower.progress(),
            filters: effects.filter_views(),
        })
        .collect()
}

fn build_towers(world: &World) -> Vec<TowerView> {
    world
        .query::<(&Position, &Tower, &ActiveEffects)>()
        .iter()
        .map(|(_, (pos, tower, effects))| TowerView {
            kind: tower.kind,
            position: *pos,
            range: tower.range,
            targeting: effects.has_targeting_line(),
        })
        .collect()
}
