//! Common error infrastructure for combat-core.
//!
//! Domain-specific errors (e.g. [`EngineError`](crate::engine::EngineError),
//! [`CombatantError`](crate::state::CombatantError)) are defined next to the
//! code that raises them. This module provides the shared classification used
//! by the runtime to decide how a failure is reported.
//!
//! # Design Principles
//!
//! - **Input errors** are rejected without touching session state and can be
//!   retried with corrected input.
//! - **Data errors** stop a session from starting; the caller reports them.
//! - **Internal errors** indicate a broken invariant and should be investigated.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input from the player (unknown attack, wrong turn, wrong
    /// submitter). Session state is unchanged; retry with different input.
    Validation,

    /// Missing or malformed records (no character, empty attack list, empty
    /// enemy catalog for a region). Fatal to session creation.
    Data,

    /// Unexpected state inconsistency. These indicate bugs.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Data => "data",
            Self::Internal => "internal",
        }
    }

    /// Returns true if the caller can retry with corrected input.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all combat-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for metrics, logging fields and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
