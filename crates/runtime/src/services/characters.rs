//! Character roster and lifecycle.

use std::sync::Arc;

use combat_core::{CharacterTemplate, PlayerId};

use crate::api::{Result, RuntimeError};
use crate::oracle::OracleManager;
use crate::repository::{CharacterRecord, CharacterStore, CurrencyLedger, RepositoryError};
use crate::session::SessionManager;

/// Creates, inspects and resets player characters.
#[derive(Clone)]
pub struct CharacterService {
    oracles: OracleManager,
    characters: Arc<dyn CharacterStore>,
    ledger: Arc<dyn CurrencyLedger>,
    sessions: Arc<SessionManager>,
}

impl CharacterService {
    pub(crate) fn new(
        oracles: OracleManager,
        characters: Arc<dyn CharacterStore>,
        ledger: Arc<dyn CurrencyLedger>,
        sessions: Arc<SessionManager>,
    ) -> Self {
        Self {
            oracles,
            characters,
            ledger,
            sessions,
        }
    }

    /// Base characters players choose from.
    pub fn roster(&self) -> &[CharacterTemplate] {
        self.oracles.roster().characters()
    }

    /// Gives `player` a copy of the roster entry named `name`.
    ///
    /// A player seen for the first time also receives the starting balance.
    pub fn create(&self, player: &PlayerId, name: &str) -> Result<CharacterRecord> {
        let template = self
            .oracles
            .roster()
            .character(name)
            .ok_or_else(|| RuntimeError::UnknownCharacter {
                name: name.to_owned(),
            })?;

        let mut stats = template.stats.clone();
        stats.restore_hp();
        let mut record = CharacterRecord::new(template.race.clone(), stats);
        record.image = template.image.clone();

        if !self.characters.create(player, record.clone())? {
            return Err(RuntimeError::CharacterExists {
                player: player.clone(),
            });
        }

        if !self.ledger.has_account(player)? {
            self.ledger
                .set_balance(player, self.oracles.config().starting_balance)?;
        }

        tracing::info!(
            player = %player,
            character = %record.stats.name,
            race = %record.race,
            "character created"
        );
        Ok(record)
    }

    pub fn character(&self, player: &PlayerId) -> Result<CharacterRecord> {
        self.characters
            .load(player)?
            .ok_or_else(|| RuntimeError::NoCharacter {
                player: player.clone(),
            })
    }

    pub fn has_character(&self, player: &PlayerId) -> bool {
        self.characters.exists(player)
    }

    /// Deletes the player's character. The gold balance is kept.
    pub fn delete(&self, player: &PlayerId) -> Result<()> {
        self.ensure_idle(player)?;
        if !self.characters.delete(player)? {
            return Err(RuntimeError::NoCharacter {
                player: player.clone(),
            });
        }
        tracing::info!(player = %player, "character deleted");
        Ok(())
    }

    /// Restores hp to hp_max, typically after a defeat left it at 0.
    pub fn revive(&self, player: &PlayerId) -> Result<CharacterRecord> {
        self.ensure_idle(player)?;
        self.characters
            .reset_hp(player)
            .map_err(|error| match error {
                RepositoryError::NotFound(_) => RuntimeError::NoCharacter {
                    player: player.clone(),
                },
                other => other.into(),
            })?;
        tracing::debug!(player = %player, "character revived");
        self.character(player)
    }

    fn ensure_idle(&self, player: &PlayerId) -> Result<()> {
        match self.sessions.active_for(player) {
            Some(session) => Err(RuntimeError::SessionAlreadyActive {
                player: player.clone(),
                session,
            }),
            None => Ok(()),
        }
    }
}
