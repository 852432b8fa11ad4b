//! Mutable state of one combat run.

use std::collections::VecDeque;

use super::{Combatant, PlayerId, RegionId};

/// Whose attack resolves next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Turn {
    Player,
    Enemy,
}

impl Turn {
    /// Turn order for a fresh pairing: ties favor the player.
    pub fn initial(player: &Combatant, enemy: &Combatant) -> Self {
        if player.speed >= enemy.speed {
            Self::Player
        } else {
            Self::Enemy
        }
    }
}

/// Position of the session in the combat state machine.
///
/// `ResolvingPlayerAttack` and `AdvancingEnemy` only exist while an operation
/// is running; callers observe one of the resting phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SessionPhase {
    AwaitingPlayerChoice,
    ResolvingPlayerAttack,
    /// The enemy strikes next. Rests here when a new enemy opens the fight.
    ResolvingEnemyAttack,
    AdvancingEnemy,
    /// Region cleared; waiting for the shop interlude to finish.
    AdvancingRegion,
    SessionWon,
    SessionLost,
}

impl SessionPhase {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::SessionWon | Self::SessionLost)
    }
}

/// Final result of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    InProgress,
    PlayerVictoryAllRegions,
    PlayerDefeated,
}

/// State owned by one run, from `start` until a terminal outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatSession {
    pub player_id: PlayerId,
    pub player: Combatant,
    pub current_region: RegionId,
    /// Remaining regions, current excluded.
    pub region_queue: VecDeque<RegionId>,
    pub current_enemy: Combatant,
    /// Remaining enemies of the current region, current excluded.
    pub enemy_queue: VecDeque<Combatant>,
    pub whose_turn: Turn,
    pub phase: SessionPhase,
    pub outcome: Outcome,
    /// Enemies requested per region; the catalog may supply fewer.
    pub enemies_per_region: u32,

    /// RNG seed fixed at session start. Combined with `nonce` for every roll.
    pub seed: u64,
    /// Number of operations that committed.
    pub nonce: u64,

    pub enemies_defeated: u32,
    pub regions_cleared: u32,
    pub gold_earned: u64,
}

impl CombatSession {
    pub fn is_active(&self) -> bool {
        self.outcome == Outcome::InProgress
    }

    /// Read-only view handed to presentation layers.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            player: self.player.clone(),
            enemy: self.current_enemy.clone(),
            region: self.current_region.clone(),
            enemies_remaining: self.enemy_queue.len(),
            regions_remaining: self.region_queue.len(),
            whose_turn: self.whose_turn,
            phase: self.phase,
            outcome: self.outcome,
            enemies_defeated: self.enemies_defeated,
            gold_earned: self.gold_earned,
        }
    }
}

/// Copy of the session state at the end of an operation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionSnapshot {
    pub player: Combatant,
    pub enemy: Combatant,
    pub region: RegionId,
    pub enemies_remaining: usize,
    pub regions_remaining: usize,
    pub whose_turn: Turn,
    pub phase: SessionPhase,
    pub outcome: Outcome,
    pub enemies_defeated: u32,
    pub gold_earned: u64,
}
