//! Static configuration supplied at startup.
//!
//! The effectiveness table and particle burst ranges are read once and
//! treated as read-only afterwards. Everything has a default so a partial
//! JSON document is valid.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::profiles::DEFAULT_EFFECTIVENESS;

/// One row of the effectiveness table as written in configuration.
///
/// Kinds are kept as strings so that an unknown name invalidates only its
/// own row, not the whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectivenessEntry {
    pub attacker: String,
    pub defender: String,
    pub multiplier: f32,
}

/// Randomization ranges for particle bursts. All ranges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    pub count_min: u32,
    pub count_max: u32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub decay_min: f32,
    pub decay_max: f32,
    pub radius_min: f32,
    pub radius_max: f32,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            count_min: BURST_COUNT_MIN,
            count_max: BURST_COUNT_MAX,
            speed_min: BURST_SPEED_MIN,
            speed_max: BURST_SPEED_MAX,
            decay_min: BURST_DECAY_MIN,
            decay_max: BURST_DECAY_MAX,
            radius_min: BURST_RADIUS_MIN,
            radius_max: BURST_RADIUS_MAX,
        }
    }
}

impl BurstConfig {
    /// Reorder swapped bounds and pull values into usable ranges.
    ///
    /// Bursts are cosmetic, so bad ranges are repaired rather than rejected.
    /// Non-finite or non-positive decay bounds fall back to the defaults
    /// since they would produce particles that never die.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let (count_min, count_max) = ordered_u32(self.count_min.max(1), self.count_max.max(1));
        let (speed_min, speed_max) = ordered(
            finite_or(self.speed_min, defaults.speed_min).clamp(0.0, PARTICLE_MAX_SPEED),
            finite_or(self.speed_max, defaults.speed_max).clamp(0.0, PARTICLE_MAX_SPEED),
        );
        let (decay_min, decay_max) = ordered(
            positive_or(self.decay_min, defaults.decay_min),
            positive_or(self.decay_max, defaults.decay_max),
        );
        let (radius_min, radius_max) = ordered(
            finite_or(self.radius_min, defaults.radius_min)
                .clamp(PARTICLE_MIN_RADIUS, PARTICLE_MAX_RADIUS),
            finite_or(self.radius_max, defaults.radius_max)
                .clamp(PARTICLE_MIN_RADIUS, PARTICLE_MAX_RADIUS),
        );
        Self {
            count_min,
            count_max,
            speed_min,
            speed_max,
            decay_min,
            decay_max,
            radius_min,
            radius_max,
        }
    }
}

/// Complete startup configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub effectiveness: Vec<EffectivenessEntry>,
    pub burst: BurstConfig,
    pub starting_lives: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            effectiveness: DEFAULT_EFFECTIVENESS
                .iter()
                .map(|(attacker, defender, multiplier)| EffectivenessEntry {
                    attacker: attacker.as_str().to_string(),
                    defender: defender.as_str().to_string(),
                    multiplier: *multiplier,
                })
                .collect(),
            burst: BurstConfig::default(),
            starting_lives: STARTING_LIVES,
        }
    }
}

impl GameConfig {
    /// Parse a JSON configuration document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: GameConfig = serde_json::from_str(json)?;
        config.burst = config.burst.sanitized();
        Ok(config)
    }
}

fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn ordered_u32(a: u32, b: u32) -> (u32, u32) {
    (a.min(b), a.max(b))
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}
