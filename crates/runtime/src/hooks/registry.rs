//! Hook registry for managing and executing post-update hooks.

use std::sync::Arc;

use tracing::{debug, error};

use crate::api::{Result, RuntimeError};

use super::{
    BroadcastHook, HookContext, HookCriticality, PersistPlayerHook, RewardLedgerHook, SessionHook,
};

/// Ordered set of hooks run after every committed update.
#[derive(Clone)]
pub struct HookRegistry {
    hooks: Arc<[Arc<dyn SessionHook>]>,
}

impl HookRegistry {
    /// Creates a registry; hooks are sorted by priority (lower values first).
    pub fn new(mut hooks: Vec<Arc<dyn SessionHook>>) -> Self {
        hooks.sort_by_key(|hook| hook.priority());
        Self {
            hooks: hooks.into(),
        }
    }

    /// Creates a registry with the default set of hooks.
    ///
    /// Default hooks include:
    /// - PersistPlayerHook: writes hp to the character store (critical)
    /// - RewardLedgerHook: credits rewards to the ledger (important)
    /// - BroadcastHook: publishes combat events (optional)
    pub fn default_hooks() -> Self {
        Self::new(vec![
            Arc::new(PersistPlayerHook) as Arc<dyn SessionHook>,
            Arc::new(RewardLedgerHook),
            Arc::new(BroadcastHook),
        ])
    }

    /// Default hooks minus reward crediting, for callers that apply reward
    /// events themselves.
    pub fn without_rewards() -> Self {
        Self::new(vec![
            Arc::new(PersistPlayerHook) as Arc<dyn SessionHook>,
            Arc::new(BroadcastHook),
        ])
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Runs every triggered hook in priority order.
    ///
    /// Returns the first critical failure. Important and optional failures
    /// are logged and skipped.
    pub fn execute_hooks(&self, ctx: &HookContext<'_>) -> Result<()> {
        for hook in self.hooks.iter() {
            if !hook.should_trigger(ctx) {
                continue;
            }
            if let Err(e) = hook.execute(ctx) {
                self.handle_hook_error(hook.as_ref(), e)?;
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Hook names and priorities in execution order (for debugging).
    pub fn hooks(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.hooks.iter().map(|hook| (hook.name(), hook.priority()))
    }

    fn handle_hook_error(&self, hook: &dyn SessionHook, error: RuntimeError) -> Result<()> {
        match hook.criticality() {
            HookCriticality::Critical => {
                error!(
                    target: "runtime::hooks",
                    hook = hook.name(),
                    criticality = "critical",
                    error = %error,
                    "Critical hook failed, rolling back"
                );
                return Err(error);
            }
            HookCriticality::Important => error!(
                target: "runtime::hooks",
                hook = hook.name(),
                criticality = "important",
                error = %error,
                "Hook failed, continuing"
            ),
            HookCriticality::Optional => debug!(
                target: "runtime::hooks",
                hook = hook.name(),
                criticality = "optional",
                error = %error,
                "Optional hook failed"
            ),
        }
        Ok(())
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::default_hooks()
    }
}
