//! Attack library and character roster oracles.

use crate::state::{Attack, Combatant};

/// Library of every attack that can be learned in the shop.
pub trait AttackLibrary: Send + Sync {
    fn attack(&self, name: &str) -> Option<Attack>;
}

/// A selectable base character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterTemplate {
    pub race: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    /// Portrait path, used by the presentation layer only.
    #[cfg_attr(feature = "serde", serde(default))]
    pub image: Option<String>,
    pub stats: Combatant,
}

impl CharacterTemplate {
    pub fn name(&self) -> &str {
        &self.stats.name
    }
}

/// Roster of base characters players choose from.
pub trait RosterOracle: Send + Sync {
    fn characters(&self) -> &[CharacterTemplate];

    fn character(&self, name: &str) -> Option<&CharacterTemplate> {
        self.characters()
            .iter()
            .find(|template| template.name().eq_ignore_ascii_case(name))
    }
}
