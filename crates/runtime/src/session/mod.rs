//! Registry of running combat sessions.
//!
//! Each session sits behind its own mutex. Operations take the lock with
//! `try_lock` so a second submission arriving while one is still resolving
//! fails fast with [`RuntimeError::SessionBusy`] instead of queueing.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock, TryLockError};

use combat_core::{CombatSession, PlayerId};
use serde::{Deserialize, Serialize};

use crate::api::{Result, RuntimeError};
use crate::repository::RepositoryError;

/// Identifier handed out by [`SessionManager::insert`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// A running session and its id.
#[derive(Clone, Debug)]
pub struct ActiveSession {
    pub id: SessionId,
    pub combat: CombatSession,
}

impl ActiveSession {
    pub fn owner(&self) -> &PlayerId {
        &self.combat.player_id
    }
}

type SessionSlot = Arc<Mutex<ActiveSession>>;

/// At most one active session per player.
pub struct SessionManager {
    next_id: AtomicU64,
    sessions: RwLock<HashMap<SessionId, SessionSlot>>,
    by_player: RwLock<HashMap<PlayerId, SessionId>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            sessions: RwLock::new(HashMap::new()),
            by_player: RwLock::new(HashMap::new()),
        }
    }

    /// Starts numbering ids at `first`. Used to resume a numbering scheme
    /// across process restarts.
    pub fn starting_at(first: u64) -> Self {
        let manager = Self::new();
        manager.next_id.store(first.max(1), Ordering::Relaxed);
        manager
    }

    /// Registers a new session. Fails if its player already has one running.
    pub fn insert(&self, combat: CombatSession) -> Result<SessionId> {
        let mut by_player = self.by_player.write().map_err(|_| poisoned())?;
        if let Some(&session) = by_player.get(&combat.player_id) {
            return Err(RuntimeError::SessionAlreadyActive {
                player: combat.player_id.clone(),
                session,
            });
        }

        let id = SessionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        by_player.insert(combat.player_id.clone(), id);
        self.sessions
            .write()
            .map_err(|_| poisoned())?
            .insert(id, Arc::new(Mutex::new(ActiveSession { id, combat })));
        Ok(id)
    }

    /// Session currently running for `player`, if any.
    pub fn active_for(&self, player: &PlayerId) -> Option<SessionId> {
        self.by_player
            .read()
            .ok()
            .and_then(|by_player| by_player.get(player).copied())
    }

    pub fn contains(&self, session: SessionId) -> bool {
        self.sessions
            .read()
            .map(|sessions| sessions.contains_key(&session))
            .unwrap_or(false)
    }

    /// Clone of the session state. Waits for an in-flight operation.
    pub fn get(&self, session: SessionId) -> Result<ActiveSession> {
        let slot = self.slot(session)?;
        let guard = slot.lock().map_err(|_| poisoned())?;
        Ok(guard.clone())
    }

    /// Runs `f` with exclusive access to the session.
    ///
    /// Fails with `SessionBusy` when another operation holds the lock.
    pub fn with_session<R>(
        &self,
        session: SessionId,
        f: impl FnOnce(&mut ActiveSession) -> Result<R>,
    ) -> Result<R> {
        let slot = self.slot(session)?;
        let mut guard = match slot.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => return Err(RuntimeError::SessionBusy { session }),
            Err(TryLockError::Poisoned(_)) => return Err(poisoned()),
        };
        f(&mut guard)
    }

    /// Drops a session. Returns the removed state, `None` if it was unknown.
    pub fn remove(&self, session: SessionId) -> Result<Option<ActiveSession>> {
        let Some(slot) = self
            .sessions
            .write()
            .map_err(|_| poisoned())?
            .remove(&session)
        else {
            return Ok(None);
        };

        let removed = slot.lock().map_err(|_| poisoned())?.clone();
        let mut by_player = self.by_player.write().map_err(|_| poisoned())?;
        if by_player.get(removed.owner()) == Some(&session) {
            by_player.remove(removed.owner());
        }
        Ok(Some(removed))
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .map(|sessions| sessions.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, session: SessionId) -> Result<SessionSlot> {
        self.sessions
            .read()
            .map_err(|_| poisoned())?
            .get(&session)
            .cloned()
            .ok_or(RuntimeError::SessionNotFound { session })
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> RuntimeError {
    RuntimeError::Repository(RepositoryError::LockPoisoned)
}
