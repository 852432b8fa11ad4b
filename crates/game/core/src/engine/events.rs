//! Events produced by engine operations and the update returned to callers.

use std::fmt;

use crate::combat::AttackResult;
use crate::state::{CombatSession, Outcome, RegionId, SessionSnapshot, Turn};

/// Something that happened while an operation resolved.
///
/// Rewards are reported here rather than credited directly; the runtime
/// decides how to apply them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    RegionEntered {
        region: RegionId,
        enemies: usize,
    },
    EnemyEngaged {
        enemy: String,
        hp: u32,
        opens: Turn,
    },
    AttackResolved {
        by: Turn,
        result: AttackResult,
    },
    EnemyDefeated {
        enemy: String,
    },
    /// Gold for one defeated enemy.
    KillReward {
        enemy: String,
        gold: u64,
    },
    RegionCleared {
        region: RegionId,
        next: Option<RegionId>,
    },
    PlayerDefeated {
        by: String,
    },
    /// One-time bonus for clearing every region of the run.
    ClearBonus {
        gold: u64,
    },
    SessionWon {
        regions: u32,
        enemies: u32,
    },
}

impl CombatEvent {
    /// Gold carried by reward events.
    pub fn gold(&self) -> Option<u64> {
        match self {
            Self::KillReward { gold, .. } | Self::ClearBonus { gold } => Some(*gold),
            _ => None,
        }
    }
}

impl fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RegionEntered { region, enemies } => {
                write!(f, "Entering {region}: {enemies} enemies stand in the way")
            }
            Self::EnemyEngaged { enemy, hp, opens } => match opens {
                Turn::Player => write!(f, "{enemy} appears ({hp} hp). You strike first!"),
                Turn::Enemy => write!(f, "{enemy} appears ({hp} hp) and is faster than you!"),
            },
            Self::AttackResolved { result, .. } => write!(
                f,
                "{} used {}, dealt {} damage ({} hp left)",
                result.attacker, result.attack, result.damage, result.defender_hp
            ),
            Self::EnemyDefeated { enemy } => write!(f, "You defeated {enemy}!"),
            Self::KillReward { gold, .. } => write!(f, "+{gold} gold"),
            Self::RegionCleared { region, next } => match next {
                Some(next) => write!(f, "{region} cleared! The shop is open before {next}"),
                None => write!(f, "{region} cleared!"),
            },
            Self::PlayerDefeated { by } => write!(f, "You were defeated by {by}..."),
            Self::ClearBonus { gold } => write!(f, "Completion bonus: +{gold} gold"),
            Self::SessionWon { regions, enemies } => write!(
                f,
                "Victory! {regions} regions cleared, {enemies} enemies defeated"
            ),
        }
    }
}

/// Result of one engine operation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionUpdate {
    pub snapshot: SessionSnapshot,
    pub events: Vec<CombatEvent>,
    /// Set once the session reached a terminal outcome.
    pub outcome: Option<Outcome>,
}

impl SessionUpdate {
    pub(crate) fn new(session: &CombatSession, events: Vec<CombatEvent>) -> Self {
        let outcome = (!session.is_active()).then_some(session.outcome);
        Self {
            snapshot: session.snapshot(),
            events,
            outcome,
        }
    }

    /// Human-readable log lines, one per event.
    pub fn log(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Total gold carried by this update's reward events.
    pub fn gold(&self) -> u64 {
        self.events.iter().filter_map(CombatEvent::gold).sum()
    }

    /// True when any combatant's hp changed during the operation.
    pub fn changed_hp(&self) -> bool {
        self.events.iter().any(|event| {
            matches!(
                event,
                CombatEvent::AttackResolved { .. } | CombatEvent::RegionEntered { .. }
            )
        })
    }
}
