//! Damage calculation and application.

use crate::state::{Attack, Combatant, DamageType};

/// Every hit deals at least this much, whatever the defender's armor.
pub const MINIMUM_DAMAGE: u32 = 1;

/// Calculate the damage `attack` deals when `attacker` hits `defender`.
///
/// # Formula
///
/// ```text
/// raw = base_damage
///     + strength * strength_ratio / 100
///     + magic    * magic_ratio    / 100
///
/// reduction_pct = armor                     (physical)
///               | magic_armor               (magical)
///               | (armor + magic_armor) / 2 (hybrid)
///
/// final_damage = max(1, trunc(raw * (1 - reduction_pct / 100)))
/// ```
///
/// Computed in fixed point (hundredths of damage, half-percent armor) so the
/// truncation toward zero is exact. Armor above 100 drives the product
/// negative; the floor still yields 1.
pub fn calculate_damage(attacker: &Combatant, defender: &Combatant, attack: &Attack) -> u32 {
    // raw damage in hundredths
    let raw = i128::from(attack.base_damage) * 100
        + i128::from(attacker.strength) * i128::from(attack.strength_ratio)
        + i128::from(attacker.magic) * i128::from(attack.magic_ratio);

    // reduction in half-percent units so the hybrid mean stays integral
    let reduction = match attack.damage_type {
        DamageType::Physical => 2 * i128::from(defender.armor),
        DamageType::Magical => 2 * i128::from(defender.magic_armor),
        DamageType::Hybrid => i128::from(defender.armor) + i128::from(defender.magic_armor),
    };

    let reduced = raw * (200 - reduction) / 20_000;

    reduced.clamp(i128::from(MINIMUM_DAMAGE), i128::from(u32::MAX)) as u32
}

/// Apply damage to current HP.
///
/// Returns the new HP value (clamped to 0).
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}
