//! Topic-based event bus for broadcasting session activity.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CombatEnvelope, EconomyEvent, SessionEvent};
