//! Character roster oracle implementation.

use combat_core::{CharacterTemplate, RosterOracle};

#[derive(Debug, Clone, Default)]
pub struct RosterImpl {
    characters: Vec<CharacterTemplate>,
}

impl RosterImpl {
    pub fn new(characters: Vec<CharacterTemplate>) -> Self {
        Self { characters }
    }
}

impl RosterOracle for RosterImpl {
    fn characters(&self) -> &[CharacterTemplate] {
        &self.characters
    }
}
