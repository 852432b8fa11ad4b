//! Execution context provided to hooks.

use combat_core::{CombatSession, PlayerId, SessionUpdate};

use crate::events::EventBus;
use crate::repository::{CharacterStore, CurrencyLedger};
use crate::session::SessionId;

/// Everything a hook may read or write after an update.
pub struct HookContext<'a> {
    pub session_id: SessionId,

    /// Session state after the operation committed.
    pub session: &'a CombatSession,

    /// The update the caller will receive.
    pub update: &'a SessionUpdate,

    pub characters: &'a dyn CharacterStore,
    pub ledger: &'a dyn CurrencyLedger,
    pub events: &'a EventBus,
}

impl HookContext<'_> {
    pub fn player(&self) -> &PlayerId {
        &self.session.player_id
    }
}
