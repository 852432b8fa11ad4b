//! Runtime wrappers around static combat content.
//!
//! These implementations expose `combat-core` oracle traits and bundle them
//! into an [`OracleManager`] so the runtime can build [`CombatEnv`] views on
//! demand. The data is immutable at runtime; dynamic state lives in
//! repositories or in the running sessions.
mod attacks;
mod enemies;
mod roster;
mod shop;

use std::sync::Arc;

use combat_core::{
    AttackLibrary, CombatConfig, CombatEnv, EnemyCatalog, PcgRng, RngOracle, RosterOracle,
    ShopOracle,
};

pub use attacks::AttackLibraryImpl;
pub use enemies::EnemyCatalogImpl;
pub use roster::RosterImpl;
pub use shop::ShopCatalogImpl;

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) enemies: Arc<EnemyCatalogImpl>,
    pub(crate) attacks: Arc<AttackLibraryImpl>,
    pub(crate) roster: Arc<RosterImpl>,
    pub(crate) shop: Arc<ShopCatalogImpl>,
    pub(crate) config: Arc<CombatConfig>,
    pub(crate) rng: Arc<dyn RngOracle>,
}

impl OracleManager {
    /// Creates a new oracle manager backed by [`PcgRng`].
    pub fn new(
        enemies: Arc<EnemyCatalogImpl>,
        attacks: Arc<AttackLibraryImpl>,
        roster: Arc<RosterImpl>,
        shop: Arc<ShopCatalogImpl>,
        config: Arc<CombatConfig>,
    ) -> Self {
        Self {
            enemies,
            attacks,
            roster,
            shop,
            config,
            rng: Arc::new(PcgRng),
        }
    }

    /// Replaces the RNG. Tests use this to pin rolls.
    #[must_use]
    pub fn with_rng(mut self, rng: Arc<dyn RngOracle>) -> Self {
        self.rng = rng;
        self
    }

    /// Borrowed view handed to the engine.
    pub fn env(&self) -> CombatEnv<'_> {
        CombatEnv::new(self.enemies.as_ref(), self.rng.as_ref(), self.config.as_ref())
    }

    pub fn enemies(&self) -> &dyn EnemyCatalog {
        self.enemies.as_ref()
    }

    pub fn attacks(&self) -> &dyn AttackLibrary {
        self.attacks.as_ref()
    }

    pub fn roster(&self) -> &dyn RosterOracle {
        self.roster.as_ref()
    }

    pub fn shop(&self) -> &dyn ShopOracle {
        self.shop.as_ref()
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }
}
