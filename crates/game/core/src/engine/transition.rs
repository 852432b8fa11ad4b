//! Session transitions and the shared steps they are built from.
//!
//! Each caller-facing operation is a [`SessionTransition`] driven through the
//! same three phases as every other state change:
//! 1. `pre_validate` - check preconditions against the untouched session
//! 2. `apply` - mutate a working copy and record events
//! 3. `post_validate` - verify the resting-state invariants

use std::collections::VecDeque;

use crate::combat::resolve_attack;
use crate::env::{CombatEnv, RollContext, compute_seed};
use crate::state::{CombatSession, Combatant, Outcome, PlayerId, RegionId, SessionPhase, Turn};

use super::errors::EngineError;
use super::events::CombatEvent;

pub(super) trait SessionTransition {
    fn pre_validate(&self, session: &CombatSession, env: &CombatEnv<'_>) -> Result<(), EngineError>;

    fn apply(
        &self,
        session: &mut CombatSession,
        env: &CombatEnv<'_>,
        events: &mut Vec<CombatEvent>,
    ) -> Result<(), EngineError>;

    fn post_validate(&self, session: &CombatSession) -> Result<(), EngineError> {
        check_invariants(session)
    }
}

/// Player picks one of their attacks.
pub(super) struct SubmitAttack<'a> {
    pub requester: &'a PlayerId,
    pub attack: &'a str,
}

impl SessionTransition for SubmitAttack<'_> {
    fn pre_validate(&self, session: &CombatSession, _env: &CombatEnv<'_>) -> Result<(), EngineError> {
        ensure_active(session)?;
        ensure_owner(session, self.requester)?;
        match session.phase {
            SessionPhase::AdvancingRegion => return Err(EngineError::RegionEntryPending),
            SessionPhase::AwaitingPlayerChoice => {}
            _ => return Err(EngineError::NotYourTurn),
        }
        if session.whose_turn != Turn::Player {
            return Err(EngineError::NotYourTurn);
        }
        if !session.player.knows_attack(self.attack) {
            return Err(EngineError::InvalidAttack {
                attack: self.attack.to_owned(),
            });
        }
        Ok(())
    }

    fn apply(
        &self,
        session: &mut CombatSession,
        env: &CombatEnv<'_>,
        events: &mut Vec<CombatEvent>,
    ) -> Result<(), EngineError> {
        let attack = session
            .player
            .find_attack(self.attack)
            .cloned()
            .ok_or_else(|| EngineError::InvalidAttack {
                attack: self.attack.to_owned(),
            })?;

        session.phase = SessionPhase::ResolvingPlayerAttack;
        let result = resolve_attack(&session.player, &mut session.current_enemy, &attack);
        let knockout = result.is_knockout();
        events.push(CombatEvent::AttackResolved {
            by: Turn::Player,
            result,
        });

        if knockout {
            defeat_enemy(session, env, events);
            return Ok(());
        }

        session.whose_turn = Turn::Enemy;
        session.phase = SessionPhase::ResolvingEnemyAttack;
        enemy_strike(session, env, events)
    }
}

/// The enemy opens a fight it is faster in.
pub(super) struct ResolveEnemyTurn<'a> {
    pub requester: &'a PlayerId,
}

impl SessionTransition for ResolveEnemyTurn<'_> {
    fn pre_validate(&self, session: &CombatSession, _env: &CombatEnv<'_>) -> Result<(), EngineError> {
        ensure_active(session)?;
        ensure_owner(session, self.requester)?;
        if session.phase != SessionPhase::ResolvingEnemyAttack || session.whose_turn != Turn::Enemy {
            return Err(EngineError::NotEnemyTurn);
        }
        Ok(())
    }

    fn apply(
        &self,
        session: &mut CombatSession,
        env: &CombatEnv<'_>,
        events: &mut Vec<CombatEvent>,
    ) -> Result<(), EngineError> {
        enemy_strike(session, env, events)
    }
}

/// Resume after the shop interlude.
pub(super) struct EnterNextRegion<'a> {
    pub requester: &'a PlayerId,
}

impl SessionTransition for EnterNextRegion<'_> {
    fn pre_validate(&self, session: &CombatSession, _env: &CombatEnv<'_>) -> Result<(), EngineError> {
        ensure_active(session)?;
        ensure_owner(session, self.requester)?;
        if session.phase != SessionPhase::AdvancingRegion || session.region_queue.is_empty() {
            return Err(EngineError::NoRegionPending);
        }
        Ok(())
    }

    fn apply(
        &self,
        session: &mut CombatSession,
        env: &CombatEnv<'_>,
        events: &mut Vec<CombatEvent>,
    ) -> Result<(), EngineError> {
        let region = session
            .region_queue
            .pop_front()
            .ok_or(EngineError::NoRegionPending)?;
        session.player.restore_hp();
        load_region(session, env, region, events)
    }
}

fn ensure_active(session: &CombatSession) -> Result<(), EngineError> {
    if session.is_active() {
        Ok(())
    } else {
        Err(EngineError::SessionNotActive {
            outcome: session.outcome,
        })
    }
}

fn ensure_owner(session: &CombatSession, requester: &PlayerId) -> Result<(), EngineError> {
    if &session.player_id == requester {
        Ok(())
    } else {
        Err(EngineError::NotYourSession {
            requester: requester.clone(),
            owner: session.player_id.clone(),
        })
    }
}

/// Samples the region's enemies and engages the first one.
pub(super) fn load_region(
    session: &mut CombatSession,
    env: &CombatEnv<'_>,
    region: RegionId,
    events: &mut Vec<CombatEvent>,
) -> Result<(), EngineError> {
    let mut enemies: VecDeque<Combatant> = env
        .catalog()
        .sample(
            &region,
            session.enemies_per_region as usize,
            env.rng(),
            session.seed,
            session.nonce,
        )
        .into();

    let first = enemies
        .pop_front()
        .ok_or_else(|| EngineError::NoEnemiesAvailable {
            region: region.clone(),
        })?;

    events.push(CombatEvent::RegionEntered {
        region: region.clone(),
        enemies: enemies.len() + 1,
    });
    session.current_region = region;
    session.enemy_queue = enemies;
    engage(session, first, events);
    Ok(())
}

/// Makes `enemy` the current opponent and derives turn order for the pairing.
fn engage(session: &mut CombatSession, enemy: Combatant, events: &mut Vec<CombatEvent>) {
    let opens = Turn::initial(&session.player, &enemy);
    events.push(CombatEvent::EnemyEngaged {
        enemy: enemy.name.clone(),
        hp: enemy.hp,
        opens,
    });
    session.current_enemy = enemy;
    session.whose_turn = opens;
    session.phase = match opens {
        Turn::Player => SessionPhase::AwaitingPlayerChoice,
        Turn::Enemy => SessionPhase::ResolvingEnemyAttack,
    };
}

/// Enemy picks a random attack and hits the player.
fn enemy_strike(
    session: &mut CombatSession,
    env: &CombatEnv<'_>,
    events: &mut Vec<CombatEvent>,
) -> Result<(), EngineError> {
    let enemy = &session.current_enemy;
    if enemy.attacks.is_empty() {
        return Err(EngineError::NoAttacks {
            enemy: enemy.name.clone(),
        });
    }

    let seed = compute_seed(session.seed, session.nonce, RollContext::EnemyAttack, 0);
    let attack = enemy.attacks[env.rng().index(seed, enemy.attacks.len())].clone();
    let result = resolve_attack(&session.current_enemy, &mut session.player, &attack);
    let knockout = result.is_knockout();
    events.push(CombatEvent::AttackResolved {
        by: Turn::Enemy,
        result,
    });

    if knockout {
        session.phase = SessionPhase::SessionLost;
        session.outcome = Outcome::PlayerDefeated;
        events.push(CombatEvent::PlayerDefeated {
            by: session.current_enemy.name.clone(),
        });
    } else {
        session.whose_turn = Turn::Player;
        session.phase = SessionPhase::AwaitingPlayerChoice;
    }
    Ok(())
}

/// Grants the kill reward, then pops the next enemy, pauses for the shop, or
/// ends the run.
fn defeat_enemy(session: &mut CombatSession, env: &CombatEnv<'_>, events: &mut Vec<CombatEvent>) {
    let enemy = session.current_enemy.name.clone();
    let range = env.config().kill_reward.normalized();
    let seed = compute_seed(
        session.seed,
        session.nonce,
        RollContext::KillReward,
        session.enemies_defeated,
    );
    let gold = u64::from(env.rng().range(seed, range.min, range.max));

    session.enemies_defeated += 1;
    session.gold_earned += gold;
    events.push(CombatEvent::EnemyDefeated {
        enemy: enemy.clone(),
    });
    events.push(CombatEvent::KillReward { enemy, gold });

    session.phase = SessionPhase::AdvancingEnemy;
    if let Some(next) = session.enemy_queue.pop_front() {
        engage(session, next, events);
        return;
    }

    session.regions_cleared += 1;
    events.push(CombatEvent::RegionCleared {
        region: session.current_region.clone(),
        next: session.region_queue.front().cloned(),
    });

    if !session.region_queue.is_empty() {
        session.phase = SessionPhase::AdvancingRegion;
        return;
    }

    let range = env.config().clear_bonus.normalized();
    let seed = compute_seed(session.seed, session.nonce, RollContext::ClearBonus, 0);
    let bonus = u64::from(env.rng().range(seed, range.min, range.max));
    session.gold_earned += bonus;
    session.phase = SessionPhase::SessionWon;
    session.outcome = Outcome::PlayerVictoryAllRegions;
    events.push(CombatEvent::ClearBonus { gold: bonus });
    events.push(CombatEvent::SessionWon {
        regions: session.regions_cleared,
        enemies: session.enemies_defeated,
    });
}

/// Resting-state invariants checked after every transition.
pub(super) fn check_invariants(session: &CombatSession) -> Result<(), EngineError> {
    let violation = |message: &str| -> Result<(), EngineError> {
        Err(EngineError::InvariantViolation(message.to_owned()))
    };

    if session.player.hp > session.player.hp_max {
        return violation("player hp above maximum");
    }

    match session.phase {
        SessionPhase::ResolvingPlayerAttack | SessionPhase::AdvancingEnemy => {
            return violation("transient phase escaped an operation");
        }
        SessionPhase::AwaitingPlayerChoice if session.whose_turn != Turn::Player => {
            return violation("awaiting player choice on the enemy's turn");
        }
        SessionPhase::ResolvingEnemyAttack if session.whose_turn != Turn::Enemy => {
            return violation("enemy attack pending on the player's turn");
        }
        _ => {}
    }

    if session.is_active() {
        if !session.player.is_alive() {
            return violation("active session with a knocked out player");
        }
        if !session.current_enemy.is_alive() && session.phase != SessionPhase::AdvancingRegion {
            return violation("defeated enemy left in place");
        }
    }

    Ok(())
}
