//! Hook that writes the player's hp back to the character store.

use crate::repository::CharacterPatch;
use crate::api::Result;

use super::{HookContext, HookCriticality, SessionHook};

/// Persists the player's current hp after every hp-changing update.
///
/// Runs first so a defeat (hp 0) is stored before anything else reacts to it.
#[derive(Debug, Clone, Copy)]
pub struct PersistPlayerHook;

impl SessionHook for PersistPlayerHook {
    fn name(&self) -> &'static str {
        "persist_player"
    }

    fn priority(&self) -> i32 {
        -100
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Critical
    }

    fn should_trigger(&self, ctx: &HookContext<'_>) -> bool {
        ctx.update.changed_hp()
    }

    fn execute(&self, ctx: &HookContext<'_>) -> Result<()> {
        let hp = ctx.session.player.hp;
        ctx.characters.save(ctx.player(), CharacterPatch::hp(hp))?;
        tracing::debug!(
            target: "runtime::hooks",
            player = %ctx.player(),
            session = %ctx.session_id,
            hp,
            "persisted player hp"
        );
        Ok(())
    }
}
