//! Asynchronous abstraction for sourcing player choices.
//!
//! Front-ends plug in [`CommandProvider`] implementations so a session can be
//! driven by a terminal, a chat interaction, or a scripted fixture.
use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use combat_core::SessionSnapshot;

use super::errors::{Result, RuntimeError};

/// A choice made by the player who owns a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Use one of the player's attacks.
    Attack(String),
    /// Let a faster enemy strike, or leave the shop for the next region.
    Continue,
    /// Buy a shop item (shop open only).
    Buy(String),
    /// Use an owned item (shop open only).
    Use(String),
    /// Give up the run.
    Abandon,
}

/// Trait for providing the player's next command.
///
/// Different implementations can handle:
/// - Terminal input
/// - Chat button interactions
/// - Scripted fixtures for tests
#[async_trait]
pub trait CommandProvider: Send + Sync {
    /// Provide the next command given the current view of the session.
    async fn next_command(&self, view: &SessionSnapshot) -> Result<PlayerCommand>;
}

/// Replays a fixed list of commands, then fails with `ProviderExhausted`.
#[derive(Default)]
pub struct ScriptedCommands {
    commands: Mutex<VecDeque<PlayerCommand>>,
}

impl ScriptedCommands {
    pub fn new(commands: impl IntoIterator<Item = PlayerCommand>) -> Self {
        Self {
            commands: Mutex::new(commands.into_iter().collect()),
        }
    }
}

#[async_trait]
impl CommandProvider for ScriptedCommands {
    async fn next_command(&self, _view: &SessionSnapshot) -> Result<PlayerCommand> {
        let mut commands = self
            .commands
            .lock()
            .map_err(|_| RuntimeError::Repository(crate::repository::RepositoryError::LockPoisoned))?;
        commands.pop_front().ok_or(RuntimeError::ProviderExhausted)
    }
}
