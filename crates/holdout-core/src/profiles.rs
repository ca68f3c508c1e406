//! Per-kind unit profiles.
//!
//! Consolidates tower and zombie stats and the default effectiveness
//! table shipped with the game.

use crate::enums::{TowerKind, ZombieKind};
use crate::types::Color;

/// Static stats for a tower kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TowerProfile {
    /// Nominal damage per shot before the effectiveness multiplier.
    pub damage: f32,
    /// Engagement radius (px).
    pub range: f32,
    /// Frames between shots.
    pub fire_interval: f32,
    /// Whether the tower keeps a laser sight on its target.
    pub laser_sight: bool,
    pub cost: u32,
}

/// Static stats for a zombie kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZombieProfile {
    pub health: f32,
    /// Walking speed (px/frame).
    pub speed: f32,
    /// Score awarded on kill.
    pub reward: u32,
    /// Body color, also used for the death burst.
    pub color: Color,
}

pub fn tower_profile(kind: TowerKind) -> TowerProfile {
    match kind {
        TowerKind::Gunner => TowerProfile {
            damage: 10.0,
            range: 120.0,
            fire_interval: 20.0,
            laser_sight: false,
            cost: 50,
        },
        TowerKind::Sniper => TowerProfile {
            damage: 60.0,
            range: 260.0,
            fire_interval: 90.0,
            laser_sight: true,
            cost: 120,
        },
        TowerKind::Shotgun => TowerProfile {
            damage: 25.0,
            range: 80.0,
            fire_interval: 45.0,
            laser_sight: false,
            cost: 80,
        },
        TowerKind::Flamethrower => TowerProfile {
            damage: 4.0,
            range: 70.0,
            fire_interval: 5.0,
            laser_sight: false,
            cost: 100,
        },
        TowerKind::Tesla => TowerProfile {
            damage: 18.0,
            range: 110.0,
            fire_interval: 30.0,
            laser_sight: false,
            cost: 150,
        },
    }
}

pub fn zombie_profile(kind: ZombieKind) -> ZombieProfile {
    match kind {
        ZombieKind::Walker => ZombieProfile {
            health: 100.0,
            speed: 0.6,
            reward: 5,
            color: Color::from_hex(0x6b8e23),
        },
        ZombieKind::Runner => ZombieProfile {
            health: 60.0,
            speed: 1.4,
            reward: 8,
            color: Color::from_hex(0xc2b280),
        },
        ZombieKind::Brute => ZombieProfile {
            health: 300.0,
            speed: 0.35,
            reward: 20,
            color: Color::from_hex(0x8b0000),
        },
        ZombieKind::Armored => ZombieProfile {
            health: 200.0,
            speed: 0.5,
            reward: 15,
            color: Color::from_hex(0x708090),
        },
        ZombieKind::Spitter => ZombieProfile {
            health: 80.0,
            speed: 0.8,
            reward: 10,
            color: Color::from_hex(0x9acd32),
        },
    }
}

/// Default (attacker, defender, multiplier) table.
///
/// Pairs not listed resolve to a neutral 1.0.
pub const DEFAULT_EFFECTIVENESS: &[(TowerKind, ZombieKind, f32)] = &[
    (TowerKind::Gunner, ZombieKind::Walker, 1.0),
    (TowerKind::Gunner, ZombieKind::Runner, 1.25),
    (TowerKind::Gunner, ZombieKind::Brute, 0.75),
    (TowerKind::Gunner, ZombieKind::Armored, 0.5),
    (TowerKind::Gunner, ZombieKind::Spitter, 1.0),
    (TowerKind::Sniper, ZombieKind::Walker, 1.0),
    (TowerKind::Sniper, ZombieKind::Runner, 0.75),
    (TowerKind::Sniper, ZombieKind::Brute, 1.5),
    (TowerKind::Sniper, ZombieKind::Armored, 1.25),
    (TowerKind::Sniper, ZombieKind::Spitter, 1.1),
    (TowerKind::Shotgun, ZombieKind::Walker, 1.25),
    (TowerKind::Shotgun, ZombieKind::Runner, 1.0),
    (TowerKind::Shotgun, ZombieKind::Brute, 1.0),
    (TowerKind::Shotgun, ZombieKind::Armored, 0.25),
    (TowerKind::Shotgun, ZombieKind::Spitter, 1.5),
    (TowerKind::Flamethrower, ZombieKind::Walker, 1.5),
    (TowerKind::Flamethrower, ZombieKind::Runner, 1.0),
    (TowerKind::Flamethrower, ZombieKind::Brute, 1.25),
    (TowerKind::Flamethrower, ZombieKind::Armored, 0.75),
    (TowerKind::Flamethrower, ZombieKind::Spitter, 0.5),
    (TowerKind::Tesla, ZombieKind::Walker, 1.0),
    (TowerKind::Tesla, ZombieKind::Runner, 0.9),
    (TowerKind::Tesla, ZombieKind::Brute, 0.5),
    (TowerKind::Tesla, ZombieKind::Armored, 2.0),
];
