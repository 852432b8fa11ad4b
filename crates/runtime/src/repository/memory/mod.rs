//! In-memory repository implementations for tests and local runs.

mod characters;
mod ledger;

pub use characters::InMemoryCharacterStore;
pub use ledger::InMemoryLedger;
