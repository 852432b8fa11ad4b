//! Repository contracts for player data that changes during play.

use combat_core::PlayerId;

use super::error::{RepositoryError, Result};
use super::types::{CharacterPatch, CharacterRecord};

/// Persistent character records keyed by player identity.
///
/// Read at session start and written after every hp-changing step.
pub trait CharacterStore: Send + Sync {
    /// Load a player's record, `None` if they never created a character.
    fn load(&self, player: &PlayerId) -> Result<Option<CharacterRecord>>;

    /// Apply a partial update. Fails with `NotFound` if the record is absent.
    fn save(&self, player: &PlayerId, patch: CharacterPatch) -> Result<()>;

    fn exists(&self, player: &PlayerId) -> bool;

    /// Insert if absent. Returns whether the record was inserted.
    fn create(&self, player: &PlayerId, record: CharacterRecord) -> Result<bool>;

    /// Returns whether a record was deleted.
    fn delete(&self, player: &PlayerId) -> Result<bool>;

    /// Restore hp to hp_max.
    fn reset_hp(&self, player: &PlayerId) -> Result<()> {
        let record = self
            .load(player)?
            .ok_or_else(|| RepositoryError::NotFound(player.to_string()))?;
        self.save(player, CharacterPatch::hp(record.stats.hp_max))
    }
}

/// In-game gold balances keyed by player identity.
pub trait CurrencyLedger: Send + Sync {
    /// Add gold. Returns the new balance.
    fn credit(&self, player: &PlayerId, amount: u64) -> Result<u64>;

    /// Remove gold. Fails with `InsufficientFunds` rather than going below
    /// zero. Returns the new balance.
    fn debit(&self, player: &PlayerId, amount: u64) -> Result<u64>;

    /// Current balance, 0 for unknown players.
    fn get_balance(&self, player: &PlayerId) -> Result<u64>;

    /// Whether the ledger has ever recorded a balance for `player`.
    fn has_account(&self, player: &PlayerId) -> Result<bool>;

    fn set_balance(&self, player: &PlayerId, amount: u64) -> Result<()>;

    fn can_afford(&self, player: &PlayerId, amount: u64) -> Result<bool> {
        Ok(self.get_balance(player)? >= amount)
    }
}
