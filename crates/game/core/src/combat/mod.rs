//! Combat resolution system.
//!
//! This module provides pure functions for resolving one attack exchange.
//! The same formula applies whether the player or an enemy attacks.
//!
//! # Core Functions
//!
//! - `calculate_damage`: raw damage from stats, armor reduction, floor of 1
//! - `apply_damage`: HP reduction (clamped to 0)
//! - `resolve_attack`: damage + application + result record

pub mod damage;
pub mod result;

pub use damage::{MINIMUM_DAMAGE, apply_damage, calculate_damage};
pub use result::{AttackResult, resolve_attack};
