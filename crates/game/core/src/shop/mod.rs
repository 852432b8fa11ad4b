//! Shop catalog types and item effects applied during the region interlude.
mod effects;

pub use effects::{EffectReport, apply_item};

use crate::state::Combatant;

/// Display category of a shop item.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemKind {
    Weapon,
    Armor,
    #[default]
    Consumable,
}

/// A single stat change carried by an item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEffect {
    /// Restores hp up to `hp_max`.
    Heal(u32),
    /// Raises both `hp_max` and `hp`.
    MaxHp(u32),
    Strength(u32),
    Magic(u32),
    Armor(u32),
    MagicArmor(u32),
    Speed(u32),
    /// Teaches an attack from the attack library.
    LearnAttack(String),
}

/// An item sold in the shop.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShopItem {
    pub id: String,
    pub name: String,
    pub price: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: ItemKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<ItemEffect>,
    /// Consumed on use. Non-consumable items stay in the inventory.
    #[cfg_attr(feature = "serde", serde(default = "default_consumable"))]
    pub consumable: bool,
}

#[cfg(feature = "serde")]
fn default_consumable() -> bool {
    true
}

impl ShopItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            kind: ItemKind::default(),
            description: String::new(),
            effects: Vec::new(),
            consumable: true,
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ItemKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: ItemEffect) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn permanent(mut self) -> Self {
        self.consumable = false;
        self
    }

    /// True when every effect would be a no-op on `player`.
    ///
    /// Only heals can be wasted; stat boosts and new attacks always apply.
    pub fn is_wasted_on(&self, player: &Combatant) -> bool {
        !self.effects.is_empty()
            && self
                .effects
                .iter()
                .all(|effect| matches!(effect, ItemEffect::Heal(_)) && player.hp == player.hp_max)
    }
}

/// Read-only view of the shop's stock.
pub trait ShopOracle: Send + Sync {
    fn items(&self) -> &[ShopItem];

    fn item(&self, id: &str) -> Option<&ShopItem> {
        self.items()
            .iter()
            .find(|item| item.id.eq_ignore_ascii_case(id))
    }
}
