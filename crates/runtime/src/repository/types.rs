//! Records persisted by the character store.

use combat_core::{Attack, Combatant};
use serde::{Deserialize, Serialize};

/// A player's persisted character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub race: String,
    #[serde(default)]
    pub image: Option<String>,
    pub stats: Combatant,
    /// Shop item ids, in purchase order. Duplicates are separate copies.
    #[serde(default)]
    pub inventory: Vec<String>,
}

impl CharacterRecord {
    pub fn new(race: impl Into<String>, stats: Combatant) -> Self {
        Self {
            race: race.into(),
            image: None,
            stats,
            inventory: Vec::new(),
        }
    }

    /// Removes one copy of `item`. Returns false if it was not owned.
    pub fn take_item(&mut self, item: &str) -> bool {
        match self.inventory.iter().position(|owned| owned == item) {
            Some(index) => {
                self.inventory.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Partial update of a [`CharacterRecord`]. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterPatch {
    pub hp: Option<u32>,
    pub hp_max: Option<u32>,
    pub speed: Option<u32>,
    pub strength: Option<u32>,
    pub magic: Option<u32>,
    pub armor: Option<u32>,
    pub magic_armor: Option<u32>,
    pub attacks: Option<Vec<Attack>>,
    pub inventory: Option<Vec<String>>,
}

impl CharacterPatch {
    pub fn hp(hp: u32) -> Self {
        Self {
            hp: Some(hp),
            ..Self::default()
        }
    }

    /// Every stat of `combatant`, attacks included.
    pub fn stats(combatant: &Combatant) -> Self {
        Self {
            hp: Some(combatant.hp),
            hp_max: Some(combatant.hp_max),
            speed: Some(combatant.speed),
            strength: Some(combatant.strength),
            magic: Some(combatant.magic),
            armor: Some(combatant.armor),
            magic_armor: Some(combatant.magic_armor),
            attacks: Some(combatant.attacks.clone()),
            inventory: None,
        }
    }

    #[must_use]
    pub fn with_inventory(mut self, inventory: Vec<String>) -> Self {
        self.inventory = Some(inventory);
        self
    }

    pub fn apply(self, record: &mut CharacterRecord) {
        let stats = &mut record.stats;
        if let Some(hp_max) = self.hp_max {
            stats.hp_max = hp_max;
        }
        if let Some(hp) = self.hp {
            stats.hp = hp;
        }
        stats.hp = stats.hp.min(stats.hp_max);
        if let Some(speed) = self.speed {
            stats.speed = speed;
        }
        if let Some(strength) = self.strength {
            stats.strength = strength;
        }
        if let Some(magic) = self.magic {
            stats.magic = magic;
        }
        if let Some(armor) = self.armor {
            stats.armor = armor;
        }
        if let Some(magic_armor) = self.magic_armor {
            stats.magic_armor = magic_armor;
        }
        if let Some(attacks) = self.attacks {
            stats.attacks = attacks;
        }
        if let Some(inventory) = self.inventory {
            record.inventory = inventory;
        }
    }
}
