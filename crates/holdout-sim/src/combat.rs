//! Attack resolution: nominal damage scaled by type effectiveness.

use holdout_core::enums::{EffectivenessTier, TowerKind, ZombieKind};

use crate::effectiveness::{classify, EffectivenessMatrix};

/// One shot, before effectiveness is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackEvent {
    pub attacker: TowerKind,
    pub defender: ZombieKind,
    pub base_damage: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    pub multiplier: f32,
    pub damage: f32,
    pub tier: EffectivenessTier,
}

/// Pure lookup; safe to call from anywhere during a tick.
///
/// Non-finite or negative base damage resolves to zero damage.
pub fn resolve_attack(matrix: &EffectivenessMatrix, attack: &AttackEvent) -> DamageOutcome {
    let multiplier = matrix.modifier_for(attack.attacker, attack.defender);
    let base = if attack.base_damage.is_finite() {
        attack.base_damage.max(0.0)
    } else {
        0.0
    };
    DamageOutcome {
        multiplier,
        damage: base * multiplier,
        tier: classify(multiplier),
    }
}
