//! Traits describing read-only combat data.
//!
//! Oracles expose the enemy catalog, the attack library, the shop catalog and
//! the RNG. [`CombatEnv`] bundles what the engine needs so it never couples to
//! concrete implementations.
mod attacks;
mod catalog;
mod rng;

pub use attacks::{AttackLibrary, CharacterTemplate, RosterOracle};
pub use catalog::EnemyCatalog;
pub use rng::{PcgRng, RngOracle, RollContext, compute_seed};

use crate::config::CombatConfig;

/// Aggregates read-only oracles required by the engine.
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    catalog: &'a dyn EnemyCatalog,
    rng: &'a dyn RngOracle,
    config: &'a CombatConfig,
}

impl<'a> CombatEnv<'a> {
    pub fn new(
        catalog: &'a dyn EnemyCatalog,
        rng: &'a dyn RngOracle,
        config: &'a CombatConfig,
    ) -> Self {
        Self {
            catalog,
            rng,
            config,
        }
    }

    pub fn catalog(&self) -> &'a dyn EnemyCatalog {
        self.catalog
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }

    pub fn config(&self) -> &'a CombatConfig {
        self.config
    }
}

impl core::fmt::Debug for CombatEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CombatEnv")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
