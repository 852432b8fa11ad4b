use std::fmt;

use crate::env::AttackLibrary;
use crate::state::Combatant;

use super::{ItemEffect, ShopItem};

/// What one effect actually did to the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EffectReport {
    Healed { amount: u32, hp: u32, hp_max: u32 },
    MaxHpRaised { amount: u32, hp_max: u32 },
    StatRaised { stat: &'static str, amount: u32, value: u32 },
    AttackLearned { attack: String },
    AttackAlreadyKnown { attack: String },
    UnknownAttack { attack: String },
}

impl fmt::Display for EffectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Healed { amount, hp, hp_max } => {
                write!(f, "Recovered {amount} hp ({hp}/{hp_max})")
            }
            Self::MaxHpRaised { amount, hp_max } => {
                write!(f, "Max hp +{amount} (now {hp_max})")
            }
            Self::StatRaised {
                stat,
                amount,
                value,
            } => write!(f, "{stat} +{amount} (now {value})"),
            Self::AttackLearned { attack } => write!(f, "Learned {attack}!"),
            Self::AttackAlreadyKnown { attack } => write!(f, "You already know {attack}"),
            Self::UnknownAttack { attack } => write!(f, "Nobody can teach {attack}"),
        }
    }
}

/// Applies every effect of `item` to `player`, in order.
pub fn apply_item(
    player: &mut Combatant,
    item: &ShopItem,
    attacks: &dyn AttackLibrary,
) -> Vec<EffectReport> {
    item.effects
        .iter()
        .map(|effect| apply_effect(player, effect, attacks))
        .collect()
}

fn apply_effect(
    player: &mut Combatant,
    effect: &ItemEffect,
    attacks: &dyn AttackLibrary,
) -> EffectReport {
    match effect {
        ItemEffect::Heal(amount) => {
            let amount = player.heal(*amount);
            EffectReport::Healed {
                amount,
                hp: player.hp,
                hp_max: player.hp_max,
            }
        }
        ItemEffect::MaxHp(amount) => {
            player.hp_max = player.hp_max.saturating_add(*amount);
            player.hp = player.hp.saturating_add(*amount).min(player.hp_max);
            EffectReport::MaxHpRaised {
                amount: *amount,
                hp_max: player.hp_max,
            }
        }
        ItemEffect::Strength(amount) => raise("strength", &mut player.strength, *amount),
        ItemEffect::Magic(amount) => raise("magic", &mut player.magic, *amount),
        ItemEffect::Armor(amount) => raise("armor", &mut player.armor, *amount),
        ItemEffect::MagicArmor(amount) => raise("magic armor", &mut player.magic_armor, *amount),
        ItemEffect::Speed(amount) => raise("speed", &mut player.speed, *amount),
        ItemEffect::LearnAttack(name) => {
            if player.knows_attack(name) {
                return EffectReport::AttackAlreadyKnown {
                    attack: name.clone(),
                };
            }
            match attacks.attack(name) {
                Some(attack) => {
                    player.attacks.push(attack);
                    EffectReport::AttackLearned {
                        attack: name.clone(),
                    }
                }
                None => EffectReport::UnknownAttack {
                    attack: name.clone(),
                },
            }
        }
    }
}

fn raise(stat: &'static str, value: &mut u32, amount: u32) -> EffectReport {
    *value = value.saturating_add(amount);
    EffectReport::StatRaised {
        stat,
        amount,
        value: *value,
    }
}
