//! Combat result types and attack resolution.

use crate::state::{Attack, Combatant, DamageType};

use super::damage::{apply_damage, calculate_damage};

/// Result of one resolved attack.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    pub attacker: String,
    pub defender: String,
    pub attack: String,
    pub damage_type: DamageType,
    pub damage: u32,
    /// Defender HP after the hit.
    pub defender_hp: u32,
    pub defender_hp_max: u32,
}

impl AttackResult {
    pub fn is_knockout(&self) -> bool {
        self.defender_hp == 0
    }
}

/// Resolve a complete attack: compute damage and subtract it from the
/// defender's HP.
pub fn resolve_attack(attacker: &Combatant, defender: &mut Combatant, attack: &Attack) -> AttackResult {
    let damage = calculate_damage(attacker, defender, attack);
    defender.hp = apply_damage(defender.hp, damage);

    AttackResult {
        attacker: attacker.name.clone(),
        defender: defender.name.clone(),
        attack: attack.name.clone(),
        damage_type: attack.damage_type,
        damage,
        defender_hp: defender.hp,
        defender_hp_max: defender.hp_max,
    }
}
