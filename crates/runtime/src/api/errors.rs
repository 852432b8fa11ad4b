//! Unified error types surfaced by the runtime API.
//!
//! Wraps engine, repository and shop failures so clients can bubble them up
//! with consistent context.
use thiserror::Error;

use combat_core::{CombatError, EngineError, ErrorSeverity, PlayerId};

pub use crate::repository::RepositoryError;
use crate::session::SessionId;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("session {session} is still resolving a previous choice")]
    SessionBusy { session: SessionId },

    #[error("session {session} not found")]
    SessionNotFound { session: SessionId },

    #[error("player {player} already has session {session} running")]
    SessionAlreadyActive { player: PlayerId, session: SessionId },

    #[error("not enough gold: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("the shop only opens between regions")]
    ShopClosed,

    #[error("no shop item '{item}'")]
    UnknownItem { item: String },

    #[error("'{item}' is not in the inventory")]
    ItemNotOwned { item: String },

    #[error("'{item}' would have no effect right now")]
    ItemWasted { item: String },

    #[error("player {player} already has a character")]
    CharacterExists { player: PlayerId },

    #[error("no character named '{name}' in the roster")]
    UnknownCharacter { name: String },

    #[error("player {player} has no character")]
    NoCharacter { player: PlayerId },

    #[error("command provider has no more commands")]
    ProviderExhausted,

    #[error("runtime requires oracles to be configured before building")]
    MissingOracles,
}

impl CombatError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Engine(error) => error.severity(),
            Self::Repository(RepositoryError::InsufficientFunds { .. })
            | Self::SessionBusy { .. }
            | Self::SessionNotFound { .. }
            | Self::SessionAlreadyActive { .. }
            | Self::InsufficientFunds { .. }
            | Self::ShopClosed
            | Self::UnknownItem { .. }
            | Self::ItemNotOwned { .. }
            | Self::ItemWasted { .. }
            | Self::CharacterExists { .. }
            | Self::UnknownCharacter { .. }
            | Self::NoCharacter { .. }
            | Self::ProviderExhausted => ErrorSeverity::Validation,
            Self::Repository(RepositoryError::NotFound(_)) => ErrorSeverity::Data,
            Self::Repository(_) | Self::MissingOracles => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Engine(error) => error.error_code(),
            Self::Repository(_) => "REPOSITORY",
            Self::SessionBusy { .. } => "SESSION_BUSY",
            Self::SessionNotFound { .. } => "SESSION_NOT_FOUND",
            Self::SessionAlreadyActive { .. } => "SESSION_ALREADY_ACTIVE",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::ShopClosed => "SHOP_CLOSED",
            Self::UnknownItem { .. } => "UNKNOWN_ITEM",
            Self::ItemNotOwned { .. } => "ITEM_NOT_OWNED",
            Self::ItemWasted { .. } => "ITEM_WASTED",
            Self::CharacterExists { .. } => "CHARACTER_EXISTS",
            Self::UnknownCharacter { .. } => "UNKNOWN_CHARACTER",
            Self::NoCharacter { .. } => "NO_CHARACTER",
            Self::ProviderExhausted => "PROVIDER_EXHAUSTED",
            Self::MissingOracles => "MISSING_ORACLES",
        }
    }
}
