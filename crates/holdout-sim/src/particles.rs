//! Particle physics for transient visual effects.
//!
//! Each particle goes Spawned -> Alive -> Dead. Life is normalized to
//! [0, 1] and only ever decreases; opacity is the remaining life, so
//! fade-out depends on life alone. A particle whose life reaches zero is
//! detached and dropped in the same tick it dies.

use glam::Vec2;
use rand::Rng;
use tracing::{debug, warn};

use holdout_core::config::BurstConfig;
use holdout_core::constants::*;
use holdout_core::error::SpawnError;
use holdout_core::types::Color;

use crate::scene::{DotVisual, SceneGraph, Visual, VisualHandle};

/// Identity of a live particle; the scene handle of its visual.
pub type ParticleId = VisualHandle;

/// Explicit kinematic parameters for a single particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSpawn {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Initial life. Values above 1.0 are clamped.
    pub life: f32,
    /// Life lost per frame.
    pub decay: f32,
    pub color: Color,
    pub radius: f32,
}

/// A single simulated point.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    id: ParticleId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub life: f32,
    pub decay: f32,
    pub color: Color,
    pub radius: f32,
    pub alpha: f32,
}

impl Particle {
    pub fn id(&self) -> ParticleId {
        self.id
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Explicit Euler step: move, fall, age, fade.
    fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        self.velocity.y += PARTICLE_GRAVITY * dt;
        self.life -= self.decay * dt;
        self.alpha = self.life.clamp(0.0, 1.0);
    }

    fn visual(&self) -> Visual {
        Visual::Dot(DotVisual {
            position: self.position,
            color: self.color,
            radius: self.radius,
            alpha: self.alpha,
        })
    }
}

/// Result of one [`ParticleSystem::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Particles still alive after the tick.
    pub alive: usize,
    /// Particles that died and were removed this tick.
    pub removed: usize,
}

/// Owns every live particle it spawned.
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    burst: BurstConfig,
}

impl ParticleSystem {
    pub fn new(burst: BurstConfig) -> Self {
        Self {
            particles: Vec::new(),
            burst: burst.sanitized(),
        }
    }

    pub fn burst_config(&self) -> &BurstConfig {
        &self.burst
    }

    /// Spawn one particle from explicit parameters.
    ///
    /// Non-finite or non-positive life or decay and non-finite position or
    /// velocity are rejected before anything is attached. Radius and speed
    /// are clamped into cosmetic bounds.
    pub fn spawn(
        &mut self,
        spawn: ParticleSpawn,
        scene: &mut dyn SceneGraph,
    ) -> Result<ParticleId, SpawnError> {
        if !spawn.position.is_finite() {
            return Err(SpawnError::InvalidPosition(spawn.position.x, spawn.position.y));
        }
        if !spawn.velocity.is_finite() {
            return Err(SpawnError::InvalidVelocity(spawn.velocity.x, spawn.velocity.y));
        }
        if !spawn.life.is_finite() || spawn.life <= 0.0 {
            return Err(SpawnError::InvalidLife(spawn.life));
        }
        if !spawn.decay.is_finite() || spawn.decay <= 0.0 {
            return Err(SpawnError::InvalidDecay(spawn.decay));
        }

        let radius = if spawn.radius.is_finite() {
            spawn.radius.clamp(PARTICLE_MIN_RADIUS, PARTICLE_MAX_RADIUS)
        } else {
            PARTICLE_MIN_RADIUS
        };

        Ok(self.insert(
            ParticleSpawn {
                velocity: spawn.velocity.clamp_length_max(PARTICLE_MAX_SPEED),
                life: spawn.life.min(1.0),
                radius,
                ..spawn
            },
            scene,
        ))
    }

    /// Spawn a randomized explosion around `origin`.
    ///
    /// Count, speed, decay and radius are drawn from the burst configuration;
    /// angles cover a full turn and every particle starts at full life.
    /// Returns the number of particles spawned.
    pub fn spawn_burst<R: Rng>(
        &mut self,
        origin: Vec2,
        color: Color,
        rng: &mut R,
        scene: &mut dyn SceneGraph,
    ) -> usize {
        if !origin.is_finite() {
            warn!(x = origin.x, y = origin.y, "ignoring burst at non-finite origin");
            return 0;
        }

        let cfg = self.burst;
        let count = rng.gen_range(cfg.count_min..=cfg.count_max) as usize;
        self.particles.reserve(count);
        for _ in 0..count {
            let angle: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
            let speed: f32 = rng.gen_range(cfg.speed_min..=cfg.speed_max);
            let decay: f32 = rng.gen_range(cfg.decay_min..=cfg.decay_max);
            let radius: f32 = rng.gen_range(cfg.radius_min..=cfg.radius_max);
            self.insert(
                ParticleSpawn {
                    position: origin,
                    velocity: Vec2::from_angle(angle) * speed,
                    life: 1.0,
                    decay,
                    color,
                    radius,
                },
                scene,
            );
        }
        debug!(count, x = origin.x, y = origin.y, "particle burst");
        count
    }

    /// Advance every particle by `dt` frames and drop the dead ones.
    ///
    /// A non-finite or negative `dt` is treated as zero.
    pub fn tick(&mut self, dt: f32, scene: &mut dyn SceneGraph) -> TickReport {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let before = self.particles.len();

        self.particles.retain_mut(|particle| {
            particle.integrate(dt);
            if particle.is_alive() {
                scene.update(particle.id, particle.visual());
                true
            } else {
                scene.detach(particle.id);
                false
            }
        });

        TickReport {
            alive: self.particles.len(),
            removed: before - self.particles.len(),
        }
    }

    /// Destroy every particle regardless of remaining life.
    ///
    /// Returns how many were removed; zero on an empty system.
    pub fn clear(&mut self, scene: &mut dyn SceneGraph) -> usize {
        let removed = self.particles.len();
        for particle in self.particles.drain(..) {
            scene.detach(particle.id);
        }
        removed
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    fn insert(&mut self, spawn: ParticleSpawn, scene: &mut dyn SceneGraph) -> ParticleId {
        let mut particle = Particle {
            id: VisualHandle(0),
            position: spawn.position,
            velocity: spawn.velocity,
            life: spawn.life,
            decay: spawn.decay,
            color: spawn.color,
            radius: spawn.radius,
            alpha: spawn.life.clamp(0.0, 1.0),
        };
        particle.id = scene.attach(particle.visual());
        let id = particle.id;
        self.particles.push(particle);
        id
    }
}
