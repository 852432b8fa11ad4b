//! Runtime orchestration for turn-based combat sessions.
//!
//! This crate wires the pure `combat-core` engine to repositories, hooks and
//! an event bus. Consumers embed [`Runtime`] to start sessions, submit
//! choices, run the shop interlude and subscribe to events.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`session`] tracks running sessions with per-session locking
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`hooks`] provides the post-update hook system
//! - [`services`] covers characters and the shop
//! - [`oracle`] and [`repository`] provide data adapters reused by other crates
pub mod api;
pub mod events;
pub mod hooks;
pub mod oracle;
pub mod repository;
pub mod runtime;
pub mod services;
pub mod session;

#[cfg(test)]
mod test_support;

pub use api::{CommandProvider, PlayerCommand, Result, RuntimeError, ScriptedCommands};
pub use events::{CombatEnvelope, EconomyEvent, Event, EventBus, SessionEvent, Topic};
pub use hooks::{
    BroadcastHook, HookContext, HookCriticality, HookRegistry, PersistPlayerHook,
    RewardLedgerHook, SessionHook,
};
pub use oracle::{AttackLibraryImpl, EnemyCatalogImpl, OracleManager, RosterImpl, ShopCatalogImpl};
pub use repository::{
    CharacterPatch, CharacterRecord, CharacterStore, CurrencyLedger, InMemoryCharacterStore,
    InMemoryLedger, RepositoryError,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig, StepOutcome};
pub use services::{CharacterService, Purchase, ShopService};
pub use session::{ActiveSession, SessionId, SessionManager};
