//! ECS components for hecs entities.
//!
//! Components are plain data. Game logic lives in systems.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::profiles::{tower_profile, zombie_profile};

/// A hostile unit walking the path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zombie {
    pub kind: ZombieKind,
    pub health: f32,
    pub max_health: f32,
    /// Walking speed (px/frame).
    pub speed: f32,
    pub reward: u32,
}

impl Zombie {
    pub fn from_profile(kind: ZombieKind) -> Self {
        let profile = zombie_profile(kind);
        Self {
            kind,
            health: profile.health,
            max_health: profile.health,
            speed: profile.speed,
            reward: profile.reward,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

/// A stationary defense.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tower {
    pub kind: TowerKind,
    pub damage: f32,
    pub range: f32,
    /// Frames between shots.
    pub fire_interval: f32,
    /// Frames until the next shot is allowed.
    pub cooldown: f32,
    pub laser_sight: bool,
}

impl Tower {
    pub fn from_profile(kind: TowerKind) -> Self {
        let profile = tower_profile(kind);
        Self {
            kind,
            damage: profile.damage,
            range: profile.range,
            fire_interval: profile.fire_interval,
            cooldown: 0.0,
            laser_sight: profile.laser_sight,
        }
    }
}
