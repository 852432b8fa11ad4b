//! In-memory CurrencyLedger implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use combat_core::PlayerId;

use crate::repository::{CurrencyLedger, RepositoryError, Result};

/// In-memory implementation of [`CurrencyLedger`].
#[derive(Default)]
pub struct InMemoryLedger {
    balances: RwLock<HashMap<PlayerId, u64>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CurrencyLedger for InMemoryLedger {
    fn credit(&self, player: &PlayerId, amount: u64) -> Result<u64> {
        let mut balances = self
            .balances
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let balance = balances.entry(player.clone()).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or_else(|| RepositoryError::BalanceOverflow(player.to_string()))?;
        Ok(*balance)
    }

    fn debit(&self, player: &PlayerId, amount: u64) -> Result<u64> {
        let mut balances = self
            .balances
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let available = balances.get(player).copied().unwrap_or(0);
        let remaining = available
            .checked_sub(amount)
            .ok_or(RepositoryError::InsufficientFunds {
                needed: amount,
                available,
            })?;
        balances.insert(player.clone(), remaining);
        Ok(remaining)
    }

    fn get_balance(&self, player: &PlayerId) -> Result<u64> {
        let balances = self
            .balances
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(balances.get(player).copied().unwrap_or(0))
    }

    fn has_account(&self, player: &PlayerId) -> Result<bool> {
        let balances = self
            .balances
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(balances.contains_key(player))
    }

    fn set_balance(&self, player: &PlayerId, amount: u64) -> Result<()> {
        let mut balances = self
            .balances
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        balances.insert(player.clone(), amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_players_have_zero_balance() {
        let ledger = InMemoryLedger::new();
        let player = PlayerId::from("bob");

        assert_eq!(ledger.get_balance(&player).unwrap(), 0);
        assert!(!ledger.has_account(&player).unwrap());
    }

    #[test]
    fn debit_never_goes_negative() {
        let ledger = InMemoryLedger::new();
        let player = PlayerId::from("bob");
        ledger.credit(&player, 30).unwrap();

        let result = ledger.debit(&player, 50);

        assert!(matches!(
            result,
            Err(RepositoryError::InsufficientFunds {
                needed: 50,
                available: 30
            })
        ));
        assert_eq!(ledger.get_balance(&player).unwrap(), 30);
        assert!(ledger.can_afford(&player, 30).unwrap());
        assert_eq!(ledger.debit(&player, 30).unwrap(), 0);
    }
}
