//! Repository layer for dynamic player data.
//!
//! Repositories handle data that CHANGES during play:
//! - Character records (stats, hp, inventory)
//! - Gold balances
//!
//! Static content (enemies, attacks, roster, shop) is handled by oracles.

mod error;
mod memory;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use memory::{InMemoryCharacterStore, InMemoryLedger};
pub use traits::{CharacterStore, CurrencyLedger};
pub use types::{CharacterPatch, CharacterRecord};
