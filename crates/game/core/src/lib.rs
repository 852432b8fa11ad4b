//! Deterministic combat rules shared by the runtime and clients.
//!
//! `combat-core` defines the canonical rules (damage, turn order, session state
//! machine, shop effects) and exposes pure APIs with no I/O. All session
//! mutation flows through [`engine::CombatEngine`]; randomness comes from the
//! injected [`env::RngOracle`] so a seed fully determines a run.
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod shop;
pub mod state;

pub use combat::{AttackResult, MINIMUM_DAMAGE, calculate_damage, resolve_attack};
pub use config::{CombatConfig, RewardRange};
pub use engine::{CombatEngine, CombatEvent, EngineError, SessionRequest, SessionUpdate};
pub use env::{
    AttackLibrary, CharacterTemplate, CombatEnv, EnemyCatalog, PcgRng, RngOracle, RollContext,
    RosterOracle, compute_seed,
};
pub use error::{CombatError, ErrorSeverity};
pub use shop::{EffectReport, ItemEffect, ItemKind, ShopItem, ShopOracle, apply_item};
pub use state::{
    Attack, CombatSession, Combatant, CombatantError, DamageType, Outcome, PlayerId, RegionId,
    SessionPhase, SessionSnapshot, Turn,
};
