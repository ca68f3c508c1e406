//! Type-vs-type damage effectiveness.
//!
//! Maps an (attacker, defender) pair to a damage multiplier and sorts
//! multipliers into qualitative tiers. The table is built once from
//! configuration and never mutated, so any number of combat resolutions
//! may read it in the same tick.

use std::collections::HashMap;

use tracing::{debug, warn};

use holdout_core::config::{EffectivenessEntry, GameConfig};
use holdout_core::enums::{EffectivenessTier, TowerKind, ZombieKind};
use holdout_core::error::ConfigError;
use holdout_core::profiles::DEFAULT_EFFECTIVENESS;

/// Multiplier for any pair the table does not mention.
pub const NEUTRAL_MULTIPLIER: f32 = 1.0;

/// Immutable effectiveness lookup table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectivenessMatrix {
    table: HashMap<(TowerKind, ZombieKind), f32>,
}

impl EffectivenessMatrix {
    /// The table shipped with the game.
    pub fn standard() -> Self {
        let table = DEFAULT_EFFECTIVENESS
            .iter()
            .map(|&(attacker, defender, multiplier)| ((attacker, defender), multiplier))
            .collect();
        Self { table }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::from_entries(&config.effectiveness)
    }

    /// Build from configuration rows.
    ///
    /// Rows naming an unknown kind or carrying a non-finite or non-positive
    /// multiplier are skipped; their pair resolves to the neutral multiplier.
    /// A later row for the same pair replaces an earlier one.
    pub fn from_entries(entries: &[EffectivenessEntry]) -> Self {
        let mut table = HashMap::with_capacity(entries.len());
        for entry in entries {
            let (Some(attacker), Some(defender)) = (
                TowerKind::parse(&entry.attacker),
                ZombieKind::parse(&entry.defender),
            ) else {
                warn!(
                    attacker = %entry.attacker,
                    defender = %entry.defender,
                    "skipping effectiveness entry with unknown kind"
                );
                continue;
            };
            if !entry.multiplier.is_finite() || entry.multiplier <= 0.0 {
                warn!(
                    attacker = %entry.attacker,
                    defender = %entry.defender,
                    multiplier = entry.multiplier,
                    "skipping effectiveness entry with invalid multiplier"
                );
                continue;
            }
            if table.insert((attacker, defender), entry.multiplier).is_some() {
                debug!(
                    attacker = %entry.attacker,
                    defender = %entry.defender,
                    "duplicate effectiveness entry replaced"
                );
            }
        }
        Self { table }
    }

    /// Parse a JSON array of entries.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let entries: Vec<EffectivenessEntry> = serde_json::from_str(json)?;
        Ok(Self::from_entries(&entries))
    }

    /// Damage multiplier for a pair. Never fails.
    pub fn modifier_for(&self, attacker: TowerKind, defender: ZombieKind) -> f32 {
        self.table
            .get(&(attacker, defender))
            .copied()
            .unwrap_or(NEUTRAL_MULTIPLIER)
    }

    pub fn tier_for(&self, attacker: TowerKind, defender: ZombieKind) -> EffectivenessTier {
        classify(self.modifier_for(attacker, defender))
    }

    /// Attackers that deal extra damage to `defender`, strongest first.
    pub fn weaknesses_of(&self, defender: ZombieKind) -> Vec<(TowerKind, f32)> {
        let mut out: Vec<(TowerKind, f32)> = TowerKind::ALL
            .iter()
            .map(|&attacker| (attacker, self.modifier_for(attacker, defender)))
            .filter(|&(_, m)| is_weakness(m))
            .collect();
        out.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        out
    }

    /// Attackers that deal reduced damage to `defender`, most resisted first.
    pub fn resistances_of(&self, defender: ZombieKind) -> Vec<(TowerKind, f32)> {
        let mut out: Vec<(TowerKind, f32)> = TowerKind::ALL
            .iter()
            .map(|&attacker| (attacker, self.modifier_for(attacker, defender)))
            .filter(|&(_, m)| is_resistance(m))
            .collect();
        out.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        out
    }

    /// Number of explicitly mapped pairs.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Sort a multiplier into its tier.
///
/// Each threshold is an inclusive lower bound of the more effective band.
/// NaN carries no information and classifies as `Normal`.
pub fn classify(multiplier: f32) -> EffectivenessTier {
    if multiplier.is_nan() {
        EffectivenessTier::Normal
    } else if multiplier >= 1.5 {
        EffectivenessTier::VeryEffective
    } else if multiplier >= 1.25 {
        EffectivenessTier::Effective
    } else if multiplier > 1.0 {
        EffectivenessTier::SlightlyEffective
    } else if multiplier == 1.0 {
        EffectivenessTier::Normal
    } else if multiplier >= 0.75 {
        EffectivenessTier::SlightlyResisted
    } else if multiplier >= 0.5 {
        EffectivenessTier::Resisted
    } else {
        EffectivenessTier::HighlyResisted
    }
}

pub fn is_weakness(multiplier: f32) -> bool {
    multiplier > 1.0
}

pub fn is_resistance(multiplier: f32) -> bool {
    multiplier < 1.0
}
