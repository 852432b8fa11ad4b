//! Error types for the combat engine.

use crate::error::{CombatError, ErrorSeverity};
use crate::state::{CombatantError, Outcome, PlayerId, RegionId};

/// Errors surfaced while starting or advancing a combat session.
///
/// Every error leaves the session exactly as it was before the call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineError {
    #[error("'{attack}' is not one of the player's attacks")]
    InvalidAttack { attack: String },

    #[error("it is not the player's turn")]
    NotYourTurn,

    #[error("it is not the enemy's turn")]
    NotEnemyTurn,

    #[error("session belongs to {owner}, not {requester}")]
    NotYourSession { requester: PlayerId, owner: PlayerId },

    #[error("session is over ({outcome})")]
    SessionNotActive { outcome: Outcome },

    #[error("region cleared; enter the next region before attacking")]
    RegionEntryPending,

    #[error("no region transition is pending")]
    NoRegionPending,

    #[error("enemy '{enemy}' has no attacks")]
    NoAttacks { enemy: String },

    #[error("no enemies available in region '{region}'")]
    NoEnemiesAvailable { region: RegionId },

    #[error("player {player} has no usable character")]
    MissingCharacter { player: PlayerId },

    #[error("player {player} cannot fight with 0 hp")]
    PlayerDown { player: PlayerId },

    #[error("a run needs at least one region")]
    NoRegions,

    #[error("invalid character record: {0}")]
    InvalidCharacter(#[from] CombatantError),

    #[error("session invariant violated: {0}")]
    InvariantViolation(String),
}

impl CombatError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidAttack { .. }
            | Self::NotYourTurn
            | Self::NotEnemyTurn
            | Self::NotYourSession { .. }
            | Self::SessionNotActive { .. }
            | Self::RegionEntryPending
            | Self::NoRegionPending => ErrorSeverity::Validation,
            Self::NoAttacks { .. }
            | Self::NoEnemiesAvailable { .. }
            | Self::MissingCharacter { .. }
            | Self::PlayerDown { .. }
            | Self::NoRegions
            | Self::InvalidCharacter(_) => ErrorSeverity::Data,
            Self::InvariantViolation(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAttack { .. } => "INVALID_ATTACK",
            Self::NotYourTurn => "NOT_YOUR_TURN",
            Self::NotEnemyTurn => "NOT_ENEMY_TURN",
            Self::NotYourSession { .. } => "NOT_YOUR_SESSION",
            Self::SessionNotActive { .. } => "SESSION_NOT_ACTIVE",
            Self::RegionEntryPending => "REGION_ENTRY_PENDING",
            Self::NoRegionPending => "NO_REGION_PENDING",
            Self::NoAttacks { .. } => "NO_ATTACKS",
            Self::NoEnemiesAvailable { .. } => "NO_ENEMIES_AVAILABLE",
            Self::MissingCharacter { .. } => "MISSING_CHARACTER",
            Self::PlayerDown { .. } => "PLAYER_DOWN",
            Self::NoRegions => "NO_REGIONS",
            Self::InvalidCharacter(_) => "INVALID_CHARACTER",
            Self::InvariantViolation(_) => "INVARIANT_VIOLATION",
        }
    }
}
