//! Game state snapshot: the visible state handed to the host each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::CombatEvent;
use crate::types::{Position, SimTime};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub lives: u32,
    pub zombies: Vec<ZombieView>,
    pub towers: Vec<TowerView>,
    /// Live particle count after this tick's pruning.
    pub particles: usize,
    pub events: Vec<CombatEvent>,
    pub score: ScoreView,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZombieView {
    pub kind: ZombieKind,
    pub position: Position,
    pub health: f32,
    pub max_health: f32,
    /// Fraction of the path covered (0.0 - 1.0).
    pub progress: f32,
    pub filters: Vec<FilterView>,
}

/// An active cosmetic filter on a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterView {
    pub kind: FilterKind,
    /// Current intensity (0.0 - 1.0).
    pub intensity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerView {
    pub kind: TowerKind,
    pub position: Position,
    pub range: f32,
    /// Whether a targeting line is currently drawn.
    pub targeting: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreView {
    pub kills: u32,
    pub escaped: u32,
    pub points: u32,
    pub shots_fired: u32,
}
