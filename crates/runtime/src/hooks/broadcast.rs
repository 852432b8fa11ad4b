//! Hook that mirrors combat events onto the event bus.

use crate::api::Result;
use crate::events::{CombatEnvelope, Event, SessionEvent};

use super::{HookContext, HookCriticality, SessionHook};

#[derive(Debug, Clone, Copy)]
pub struct BroadcastHook;

impl SessionHook for BroadcastHook {
    fn name(&self) -> &'static str {
        "broadcast"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Optional
    }

    fn should_trigger(&self, ctx: &HookContext<'_>) -> bool {
        !ctx.update.events.is_empty()
    }

    fn execute(&self, ctx: &HookContext<'_>) -> Result<()> {
        for event in &ctx.update.events {
            ctx.events.publish(Event::Combat(CombatEnvelope {
                session: ctx.session_id,
                player: ctx.player().clone(),
                nonce: ctx.session.nonce,
                event: event.clone(),
            }));
        }

        if let Some(outcome) = ctx.update.outcome {
            ctx.events.publish(Event::Session(SessionEvent::Finished {
                session: ctx.session_id,
                player: ctx.player().clone(),
                outcome,
            }));
        }
        Ok(())
    }
}
