//! Tower targeting and fire.
//!
//! Towers pick the in-range zombie that is furthest along the path. Laser
//! sight towers keep a targeting line on that zombie. Shots are collected
//! first and applied afterwards so that every tower sees the same
//! pre-fire state.

use glam::Vec2;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use holdout_core::components::{Tower, Zombie};
use holdout_core::constants::*;
use holdout_core::enums::{TowerKind, ZombieKind};
use holdout_core::events::CombatEvent;
use holdout_core::profiles::zombie_profile;
use holdout_core::state::ScoreView;
use holdout_core::types::{Color, Position};

use crate::combat::{resolve_attack, AttackEvent};
use crate::effectiveness::EffectivenessMatrix;
use crate::effects::{ActiveEffects, FilterEffect};
use crate::navigation::{Mover, PathFollower};
use crate::particles::{ParticleSpawn, ParticleSystem};
use crate::scene::SceneGraph;
use crate::targeting_line::TargetingLine;

/// Shared state the fire system writes into.
pub struct FireContext<'a> {
    pub matrix: &'a EffectivenessMatrix,
    pub particles: &'a mut ParticleSystem,
    pub rng: &'a mut ChaCha8Rng,
    pub events: &'a mut Vec<CombatEvent>,
    pub score: &'a mut ScoreView,
    pub scene: &'a mut dyn SceneGraph,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    entity: Entity,
    position: Vec2,
    progress: f32,
}

#[derive(Debug, Clone, Copy)]
struct Shot {
    tower: TowerKind,
    origin: Vec2,
    damage: f32,
    target: Entity,
}

pub fn run(world: &mut World, dt: f32, ctx: &mut FireContext<'_>) {
    let candidates: Vec<Candidate> = world
        .query_mut::<(&Position, &Zombie, &PathFollower)>()
        .into_iter()
        .filter(|(_, (_, zombie, follower))| !zombie.is_dead() && !follower.has_arrived())
        .map(|(entity, (pos, _, follower))| Candidate {
            entity,
            position: pos.0,
            progress: follower.progress(),
        })
        .collect();

    let mut shots = Vec::new();
    for (_entity, (pos, tower, effects)) in
        world.query_mut::<(&Position, &mut Tower, &mut ActiveEffects)>()
    {
        tower.cooldown = (tower.cooldown - dt).max(0.0);
        let target = select_target(pos.0, tower.range, &candidates);

        if tower.laser_sight {
            update_targeting_line(pos.0, target, effects, &mut *ctx.scene);
        }

        if let Some(target) = target {
            if tower.cooldown <= 0.0 {
                tower.cooldown = tower.fire_interval;
                shots.push(Shot {
                    tower: tower.kind,
                    origin: pos.0,
                    damage: tower.damage,
                    target: target.entity,
                });
            }
        }
    }

    for shot in shots {
        apply_shot(world, shot, ctx);
    }
}

/// Furthest-along zombie within `range` of `origin`.
fn select_target(origin: Vec2, range: f32, candidates: &[Candidate]) -> Option<Candidate> {
    candidates
        .iter()
        .filter(|c| c.position.distance(origin) <= range)
        .fold(None, |best: Option<Candidate>, c| match best {
            Some(b) if b.progress >= c.progress => Some(b),
            _ => Some(*c),
        })
}

fn update_targeting_line(
    origin: Vec2,
    target: Option<Candidate>,
    effects: &mut ActiveEffects,
    scene: &mut dyn SceneGraph,
) {
    match target {
        Some(target) => {
            if let Some(line) = effects.targeting_line_mut() {
                line.reposition(origin, target.position, scene);
            } else {
                let line = TargetingLine::new(origin, target.position, scene);
                effects.set_targeting_line(line, scene);
            }
        }
        None => {
            if let Some(line) = effects.take_targeting_line() {
                line.remove(scene);
            }
        }
    }
}

fn apply_shot(world: &mut World, shot: Shot, ctx: &mut FireContext<'_>) {
    let Ok((pos, zombie, effects)) =
        world.query_one_mut::<(&Position, &mut Zombie, &mut ActiveEffects)>(shot.target)
    else {
        return;
    };
    // Already killed by an earlier shot this tick.
    if zombie.is_dead() {
        return;
    }

    let outcome = resolve_attack(
        ctx.matrix,
        &AttackEvent {
            attacker: shot.tower,
            defender: zombie.kind,
            base_damage: shot.damage,
        },
    );
    zombie.health -= outcome.damage;
    effects.push_filter(FilterEffect::hit_flash());
    ctx.score.shots_fired += 1;
    ctx.events.push(CombatEvent::Hit {
        tower: shot.tower,
        zombie: zombie.kind,
        damage: outcome.damage,
        tier: outcome.tier,
    });

    spawn_spark(ctx, shot.origin, pos.0);

    if zombie.is_dead() {
        on_kill(ctx, zombie.kind, zombie.reward, pos.0);
    }
}

fn spawn_spark(ctx: &mut FireContext<'_>, origin: Vec2, at: Vec2) {
    let spark = ParticleSpawn {
        position: at,
        velocity: (at - origin).normalize_or_zero() * SPARK_SPEED,
        life: 1.0,
        decay: SPARK_DECAY,
        color: Color::SPARK,
        radius: SPARK_RADIUS,
    };
    if let Err(err) = ctx.particles.spawn(spark, &mut *ctx.scene) {
        warn!(%err, "hit spark rejected");
    }
}

fn on_kill(ctx: &mut FireContext<'_>, kind: ZombieKind, reward: u32, at: Vec2) {
    ctx.score.kills += 1;
    ctx.score.points += reward;
    ctx.events.push(CombatEvent::Killed { zombie: kind, reward });
    let color = zombie_profile(kind).color;
    let count = ctx
        .particles
        .spawn_burst(at, color, &mut *ctx.rng, &mut *ctx.scene);
    debug!(zombie = kind.as_str(), reward, particles = count, "zombie killed");
}
