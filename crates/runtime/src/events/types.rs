//! Event types for different topics.

use combat_core::{CombatEvent, Outcome, PlayerId, RegionId};
use serde::{Deserialize, Serialize};

use crate::session::SessionId;

/// A combat event tagged with the session that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatEnvelope {
    pub session: SessionId,
    pub player: PlayerId,
    /// Session nonce after the producing operation committed.
    pub nonce: u64,
    pub event: CombatEvent,
}

/// Gold movements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EconomyEvent {
    /// Rewards landed in the player's ledger balance.
    Credited {
        player: PlayerId,
        amount: u64,
        balance: u64,
    },

    /// A shop item was bought.
    Purchased {
        player: PlayerId,
        item: String,
        price: u64,
        balance: u64,
    },
}

/// Session lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    Started {
        session: SessionId,
        player: PlayerId,
        regions: Vec<RegionId>,
    },

    Finished {
        session: SessionId,
        player: PlayerId,
        outcome: Outcome,
    },

    /// Removed before reaching an outcome, usually on caller timeout.
    Abandoned {
        session: SessionId,
        player: PlayerId,
    },
}
