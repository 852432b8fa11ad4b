//! Shop interlude between regions.
//!
//! Buying and using items is only possible while the session rests in
//! `AdvancingRegion`, and goes through the same ownership and busy checks
//! as combat operations.

use std::sync::Arc;

use combat_core::{EngineError, PlayerId, SessionPhase, ShopItem, apply_item};

use crate::api::{Result, RuntimeError};
use crate::events::{EconomyEvent, Event, EventBus};
use crate::oracle::OracleManager;
use crate::repository::{
    CharacterPatch, CharacterRecord, CharacterStore, CurrencyLedger, RepositoryError,
};
use crate::session::{ActiveSession, SessionId, SessionManager};

/// Receipt of a successful purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    pub item: ShopItem,
    pub balance: u64,
}

#[derive(Clone)]
pub struct ShopService {
    oracles: OracleManager,
    characters: Arc<dyn CharacterStore>,
    ledger: Arc<dyn CurrencyLedger>,
    sessions: Arc<SessionManager>,
    events: EventBus,
}

impl ShopService {
    pub(crate) fn new(
        oracles: OracleManager,
        characters: Arc<dyn CharacterStore>,
        ledger: Arc<dyn CurrencyLedger>,
        sessions: Arc<SessionManager>,
        events: EventBus,
    ) -> Self {
        Self {
            oracles,
            characters,
            ledger,
            sessions,
            events,
        }
    }

    pub fn catalog(&self) -> &[ShopItem] {
        self.oracles.shop().items()
    }

    pub fn balance(&self, player: &PlayerId) -> Result<u64> {
        Ok(self.ledger.get_balance(player)?)
    }

    /// Item ids owned by `player`, in purchase order.
    pub fn inventory(&self, player: &PlayerId) -> Result<Vec<String>> {
        Ok(self.record(player)?.inventory)
    }

    /// Debits the item's price and adds it to the inventory.
    ///
    /// On `InsufficientFunds` neither balance nor inventory change.
    pub fn buy(&self, session: SessionId, requester: &PlayerId, item_id: &str) -> Result<Purchase> {
        self.sessions.with_session(session, |active| {
            ensure_shop_open(active, requester)?;
            let item = self.item(item_id)?.clone();
            let mut record = self.record(requester)?;

            let balance = self
                .ledger
                .debit(requester, item.price)
                .map_err(|error| match error {
                    RepositoryError::InsufficientFunds { needed, available } => {
                        RuntimeError::InsufficientFunds { needed, available }
                    }
                    other => other.into(),
                })?;

            record.inventory.push(item.id.clone());
            let patch = CharacterPatch::default().with_inventory(record.inventory);
            if let Err(error) = self.characters.save(requester, patch) {
                self.ledger.credit(requester, item.price)?;
                return Err(error.into());
            }

            tracing::info!(
                player = %requester,
                session = %session,
                item = %item.id,
                price = item.price,
                balance,
                "item purchased"
            );
            self.events.publish(Event::Economy(EconomyEvent::Purchased {
                player: requester.clone(),
                item: item.id.clone(),
                price: item.price,
                balance,
            }));

            Ok(Purchase { item, balance })
        })
    }

    /// Applies an owned item to the session's player and persists the result.
    ///
    /// Returns one human-readable line per effect. Consumables leave the
    /// inventory; a heal at full hp is refused and the item kept.
    pub fn use_item(
        &self,
        session: SessionId,
        requester: &PlayerId,
        item_id: &str,
    ) -> Result<Vec<String>> {
        self.sessions.with_session(session, |active| {
            ensure_shop_open(active, requester)?;
            let item = self.item(item_id)?;
            let mut record = self.record(requester)?;

            if !record.inventory.iter().any(|owned| owned == &item.id) {
                return Err(RuntimeError::ItemNotOwned {
                    item: item.id.clone(),
                });
            }
            if item.is_wasted_on(&active.combat.player) {
                return Err(RuntimeError::ItemWasted {
                    item: item.id.clone(),
                });
            }

            let mut player = active.combat.player.clone();
            let reports = apply_item(&mut player, item, self.oracles.attacks());
            if item.consumable {
                record.take_item(&item.id);
            }

            let patch = CharacterPatch::stats(&player).with_inventory(record.inventory);
            self.characters.save(requester, patch)?;
            active.combat.player = player;

            tracing::info!(
                player = %requester,
                session = %session,
                item = %item.id,
                effects = reports.len(),
                "item used"
            );
            Ok(reports.iter().map(ToString::to_string).collect())
        })
    }

    fn item(&self, item_id: &str) -> Result<&ShopItem> {
        self.oracles
            .shop()
            .item(item_id)
            .ok_or_else(|| RuntimeError::UnknownItem {
                item: item_id.to_owned(),
            })
    }

    fn record(&self, player: &PlayerId) -> Result<CharacterRecord> {
        self.characters
            .load(player)?
            .ok_or_else(|| RuntimeError::NoCharacter {
                player: player.clone(),
            })
    }
}

fn ensure_shop_open(active: &ActiveSession, requester: &PlayerId) -> Result<()> {
    if active.owner() != requester {
        return Err(EngineError::NotYourSession {
            requester: requester.clone(),
            owner: active.owner().clone(),
        }
        .into());
    }
    if active.combat.phase != SessionPhase::AdvancingRegion {
        return Err(RuntimeError::ShopClosed);
    }
    Ok(())
}
