//! Combat session state machine.
//!
//! The [`CombatEngine`] is the authoritative reducer for [`CombatSession`].
//! Every operation is validated against the untouched session, applied to a
//! working copy and committed only if it succeeds, so a rejected call leaves
//! the session exactly as it was.
//!
//! ```text
//! start ──► AwaitingPlayerChoice ◄──────────────┐
//!   │            │ submit_attack                │
//!   │            ▼                              │
//!   │     ResolvingPlayerAttack ──KO──► AdvancingEnemy ──► AdvancingRegion
//!   │            │                          │      │            │ enter_next_region
//!   │            ▼                          │      ▼            ▼
//!   └──► ResolvingEnemyAttack ◄─────────────┘  SessionWon   (new region)
//!                │
//!                ├──KO──► SessionLost
//!                └──────► AwaitingPlayerChoice
//! ```
//!
//! A faster enemy opens its fight: the session rests in
//! `ResolvingEnemyAttack` until the caller runs
//! [`CombatEngine::resolve_enemy_turn`], which lets the presentation layer
//! show the new enemy before its first strike.

mod errors;
mod events;
mod transition;

pub use errors::EngineError;
pub use events::{CombatEvent, SessionUpdate};

use std::collections::VecDeque;

use crate::env::CombatEnv;
use crate::state::{CombatSession, Combatant, Outcome, PlayerId, RegionId, SessionPhase, Turn};

use transition::{EnterNextRegion, ResolveEnemyTurn, SessionTransition, SubmitAttack};

/// Parameters for a new run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionRequest {
    pub player_id: PlayerId,
    pub player: Combatant,
    /// Regions to clear, in order. Must not be empty.
    pub regions: Vec<RegionId>,
    pub enemies_per_region: u32,
    pub seed: u64,
}

/// Engine that validates and applies operations on one combat session.
pub struct CombatEngine<'a> {
    session: &'a mut CombatSession,
}

impl<'a> CombatEngine<'a> {
    /// Creates a new engine over the given session.
    pub fn new(session: &'a mut CombatSession) -> Self {
        Self { session }
    }

    /// Starts a run: validates the player, samples the first region and
    /// engages its first enemy.
    ///
    /// The player keeps their current hp for the first region.
    pub fn start(
        env: CombatEnv<'_>,
        request: SessionRequest,
    ) -> Result<(CombatSession, SessionUpdate), EngineError> {
        let SessionRequest {
            player_id,
            player,
            regions,
            enemies_per_region,
            seed,
        } = request;

        player.validate_player().map_err(|error| match error {
            crate::state::CombatantError::NoAttacks { .. } => EngineError::MissingCharacter {
                player: player_id.clone(),
            },
            other => EngineError::InvalidCharacter(other),
        })?;
        if !player.is_alive() {
            return Err(EngineError::PlayerDown { player: player_id });
        }

        // Every planned region must have enemies, or the run would stall
        // in the shop before reaching it.
        if let Some(region) = regions
            .iter()
            .find(|region| env.catalog().roster(region).is_empty())
        {
            return Err(EngineError::NoEnemiesAvailable {
                region: region.clone(),
            });
        }

        let mut regions: VecDeque<RegionId> = regions.into();
        let first_region = regions.pop_front().ok_or(EngineError::NoRegions)?;

        let mut session = CombatSession {
            player_id,
            player,
            current_region: first_region.clone(),
            region_queue: regions,
            current_enemy: Combatant::default(),
            enemy_queue: VecDeque::new(),
            whose_turn: Turn::Player,
            phase: SessionPhase::AwaitingPlayerChoice,
            outcome: Outcome::InProgress,
            enemies_per_region: enemies_per_region.max(1),
            seed,
            nonce: 0,
            enemies_defeated: 0,
            regions_cleared: 0,
            gold_earned: 0,
        };

        let mut events = Vec::new();
        transition::load_region(&mut session, &env, first_region, &mut events)?;
        transition::check_invariants(&session)?;
        session.nonce += 1;

        let update = SessionUpdate::new(&session, events);
        Ok((session, update))
    }

    /// Resolves the player's chosen attack and, if the enemy survives, the
    /// enemy's reply.
    pub fn submit_attack(
        &mut self,
        env: CombatEnv<'_>,
        requester: &PlayerId,
        attack: &str,
    ) -> Result<SessionUpdate, EngineError> {
        self.execute(env, &SubmitAttack { requester, attack })
    }

    /// Resolves the opening strike of an enemy that is faster than the player.
    pub fn resolve_enemy_turn(
        &mut self,
        env: CombatEnv<'_>,
        requester: &PlayerId,
    ) -> Result<SessionUpdate, EngineError> {
        self.execute(env, &ResolveEnemyTurn { requester })
    }

    /// Leaves the shop interlude: pops the next region, samples its enemies and
    /// restores the player's hp.
    pub fn enter_next_region(
        &mut self,
        env: CombatEnv<'_>,
        requester: &PlayerId,
    ) -> Result<SessionUpdate, EngineError> {
        self.execute(env, &EnterNextRegion { requester })
    }

    pub fn session(&self) -> &CombatSession {
        self.session
    }

    fn execute<T: SessionTransition>(
        &mut self,
        env: CombatEnv<'_>,
        transition: &T,
    ) -> Result<SessionUpdate, EngineError> {
        transition.pre_validate(self.session, &env)?;

        let mut working = self.session.clone();
        let mut events = Vec::new();
        transition.apply(&mut working, &env, &mut events)?;
        transition.post_validate(&working)?;

        working.nonce += 1;
        *self.session = working;

        Ok(SessionUpdate::new(self.session, events))
    }
}
