//! Hook that credits kill rewards and the clear bonus.

use crate::api::Result;
use crate::events::{EconomyEvent, Event};

use super::{HookContext, SessionHook};

#[derive(Debug, Clone, Copy)]
pub struct RewardLedgerHook;

impl SessionHook for RewardLedgerHook {
    fn name(&self) -> &'static str {
        "reward_ledger"
    }

    fn should_trigger(&self, ctx: &HookContext<'_>) -> bool {
        ctx.update.gold() > 0
    }

    fn execute(&self, ctx: &HookContext<'_>) -> Result<()> {
        let amount = ctx.update.gold();
        let balance = ctx.ledger.credit(ctx.player(), amount)?;
        tracing::info!(
            target: "runtime::hooks",
            player = %ctx.player(),
            session = %ctx.session_id,
            amount,
            balance,
            "credited rewards"
        );
        ctx.events.publish(Event::Economy(EconomyEvent::Credited {
            player: ctx.player().clone(),
            amount,
            balance,
        }));
        Ok(())
    }
}
