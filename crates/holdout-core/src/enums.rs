//! Enumeration types used throughout the simulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Damage source category (tower type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TowerKind {
    /// Rapid-fire gun, cheap all-rounder.
    Gunner,
    /// Long range, slow, carries a laser sight.
    Sniper,
    /// Short range spread shot.
    Shotgun,
    /// Very short range, continuous low damage.
    Flamethrower,
    /// Chain lightning, strong against armor.
    Tesla,
}

impl TowerKind {
    pub const ALL: [TowerKind; 5] = [
        TowerKind::Gunner,
        TowerKind::Sniper,
        TowerKind::Shotgun,
        TowerKind::Flamethrower,
        TowerKind::Tesla,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Gunner" => Some(TowerKind::Gunner),
            "Sniper" => Some(TowerKind::Sniper),
            "Shotgun" => Some(TowerKind::Shotgun),
            "Flamethrower" => Some(TowerKind::Flamethrower),
            "Tesla" => Some(TowerKind::Tesla),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TowerKind::Gunner => "Gunner",
            TowerKind::Sniper => "Sniper",
            TowerKind::Shotgun => "Shotgun",
            TowerKind::Flamethrower => "Flamethrower",
            TowerKind::Tesla => "Tesla",
        }
    }
}

/// Damage recipient category (zombie type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZombieKind {
    Walker,
    Runner,
    Brute,
    Armored,
    Spitter,
}

impl ZombieKind {
    pub const ALL: [ZombieKind; 5] = [
        ZombieKind::Walker,
        ZombieKind::Runner,
        ZombieKind::Brute,
        ZombieKind::Armored,
        ZombieKind::Spitter,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Walker" => Some(ZombieKind::Walker),
            "Runner" => Some(ZombieKind::Runner),
            "Brute" => Some(ZombieKind::Brute),
            "Armored" => Some(ZombieKind::Armored),
            "Spitter" => Some(ZombieKind::Spitter),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ZombieKind::Walker => "Walker",
            ZombieKind::Runner => "Runner",
            ZombieKind::Brute => "Brute",
            ZombieKind::Armored => "Armored",
            ZombieKind::Spitter => "Spitter",
        }
    }
}

/// Qualitative effectiveness label derived from a damage multiplier.
///
/// Variants are declared from most to least effective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EffectivenessTier {
    VeryEffective,
    Effective,
    SlightlyEffective,
    Normal,
    SlightlyResisted,
    Resisted,
    HighlyResisted,
}

impl EffectivenessTier {
    /// Human-readable label shown in combat readouts.
    pub fn label(&self) -> &'static str {
        match self {
            EffectivenessTier::VeryEffective => "Very Effective",
            EffectivenessTier::Effective => "Effective",
            EffectivenessTier::SlightlyEffective => "Slightly Effective",
            EffectivenessTier::Normal => "Normal",
            EffectivenessTier::SlightlyResisted => "Slightly Resisted",
            EffectivenessTier::Resisted => "Resisted",
            EffectivenessTier::HighlyResisted => "Highly Resisted",
        }
    }

    pub fn is_favorable(&self) -> bool {
        matches!(
            self,
            EffectivenessTier::VeryEffective
                | EffectivenessTier::Effective
                | EffectivenessTier::SlightlyEffective
        )
    }

    pub fn is_unfavorable(&self) -> bool {
        matches!(
            self,
            EffectivenessTier::SlightlyResisted
                | EffectivenessTier::Resisted
                | EffectivenessTier::HighlyResisted
        )
    }
}

impl fmt::Display for EffectivenessTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Cosmetic filter variants applied to a unit's visual.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FilterKind {
    /// Brief white flash when a unit takes damage.
    HitFlash,
    /// Soft outer glow.
    Glow,
    /// Color overlay blended by intensity.
    Tint { color: crate::types::Color },
    /// Positional jitter in pixels at full intensity.
    Shake { magnitude: f32 },
}

/// Top-level game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Towers may be placed, no waves running.
    #[default]
    Setup,
    Active,
    Paused,
    /// All lives lost.
    GameOver,
}
