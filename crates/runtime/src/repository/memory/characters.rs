//! In-memory CharacterStore implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use combat_core::PlayerId;

use crate::repository::{
    CharacterPatch, CharacterRecord, CharacterStore, RepositoryError, Result,
};

/// In-memory implementation of [`CharacterStore`].
#[derive(Default)]
pub struct InMemoryCharacterStore {
    records: RwLock<HashMap<PlayerId, CharacterRecord>>,
}

impl InMemoryCharacterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CharacterStore for InMemoryCharacterStore {
    fn load(&self, player: &PlayerId) -> Result<Option<CharacterRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.get(player).cloned())
    }

    fn save(&self, player: &PlayerId, patch: CharacterPatch) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let record = records
            .get_mut(player)
            .ok_or_else(|| RepositoryError::NotFound(player.to_string()))?;
        patch.apply(record);
        Ok(())
    }

    fn exists(&self, player: &PlayerId) -> bool {
        self.records
            .read()
            .map(|records| records.contains_key(player))
            .unwrap_or(false)
    }

    fn create(&self, player: &PlayerId, record: CharacterRecord) -> Result<bool> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        if records.contains_key(player) {
            return Ok(false);
        }
        records.insert(player.clone(), record);
        Ok(true)
    }

    fn delete(&self, player: &PlayerId) -> Result<bool> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.remove(player).is_some())
    }
}
