//! Data-driven content definitions and loaders.
//!
//! This crate houses the static content of the minigame and provides loaders
//! for RON/TOML data files:
//! - Attack library (RON)
//! - Character roster (RON, attacks referenced by name)
//! - Region enemy catalog (RON, attacks referenced by name)
//! - Shop catalog (RON)
//! - Combat configuration (TOML)
//!
//! Content is consumed by runtime oracles and never appears in session state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    AttackLoader, CharacterLoader, CombatantSpec, ConfigLoader, ContentFactory, EnemyLoader,
    ShopLoader,
};
