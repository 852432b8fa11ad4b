//! Authoritative combat state representation.
//!
//! This module owns the data structures that describe combatants and the
//! bookkeeping of a run. Runtime layers clone or query this state but mutate
//! it exclusively through the engine.
mod combatant;
mod ids;
mod session;

pub use combatant::{Attack, Combatant, CombatantError, DamageType};
pub use ids::{PlayerId, RegionId};
pub use session::{CombatSession, Outcome, SessionPhase, SessionSnapshot, Turn};
