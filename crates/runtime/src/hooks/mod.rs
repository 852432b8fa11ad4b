//! Post-update hook system for runtime orchestration.
//!
//! Hooks react to a committed [`SessionUpdate`](combat_core::SessionUpdate)
//! with side effects outside the pure engine: persisting the player,
//! crediting rewards, broadcasting events.
//!
//! # Architecture
//!
//! - Hooks are registered in the RuntimeBuilder and sorted by priority
//! - After each successful operation, hooks are evaluated in priority order
//! - A failing critical hook rolls the session back to its state before the
//!   operation and surfaces the error to the caller

mod broadcast;
mod context;
mod persist;
mod registry;
mod rewards;

pub use broadcast::BroadcastHook;
pub use context::HookContext;
pub use persist::PersistPlayerHook;
pub use registry::HookRegistry;
pub use rewards::RewardLedgerHook;

use crate::api::Result;

/// Defines the criticality level of a hook for error handling.
///
/// - Critical hooks must succeed or the operation fails
/// - Important hooks log errors but allow continuation
/// - Optional hooks can fail silently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookCriticality {
    /// Hook failure fails the whole operation.
    ///
    /// Use for hooks that keep stored data consistent with the session
    /// (e.g., PersistPlayerHook).
    Critical,

    /// Hook failure is logged as an error but the update is still returned.
    Important,

    /// Hook failure is logged at debug level.
    Optional,
}

/// Side effect run after an engine update commits.
///
/// # Execution Order
///
/// Hooks are sorted by priority (lower values execute first):
/// - Negative priorities: persistence
/// - Zero: default, rewards
/// - Positive priorities: notifications
pub trait SessionHook: Send + Sync {
    /// Returns a human-readable name for this hook (used in logging).
    fn name(&self) -> &'static str;

    fn priority(&self) -> i32 {
        0
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Important
    }

    /// Whether this update concerns the hook at all.
    fn should_trigger(&self, ctx: &HookContext<'_>) -> bool;

    fn execute(&self, ctx: &HookContext<'_>) -> Result<()>;
}
