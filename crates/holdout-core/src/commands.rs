//! Commands sent from the host to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Build a tower at a world position.
    PlaceTower { kind: TowerKind, x: f32, y: f32 },
    /// Spawn a single zombie at the start of the path.
    SpawnZombie { kind: ZombieKind },
    /// Begin the wave schedule.
    StartWaves,
    Pause,
    Resume,
}
