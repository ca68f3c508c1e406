//! Events emitted by the simulation for UI and audio feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Combat and navigation outcomes produced during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// A tower shot landed.
    Hit {
        tower: TowerKind,
        zombie: ZombieKind,
        damage: f32,
        tier: EffectivenessTier,
    },
    /// A zombie's health reached zero.
    Killed { zombie: ZombieKind, reward: u32 },
    /// A zombie reached the end of the path.
    Escaped {
        zombie: ZombieKind,
        lives_remaining: u32,
    },
    /// A scheduled wave started spawning.
    WaveStarted { wave: u32 },
    /// Lives ran out.
    GameOver,
}
