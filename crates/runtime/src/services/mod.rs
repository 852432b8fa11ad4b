//! Player-facing services layered over repositories and sessions.

mod characters;
mod shop;

pub use characters::CharacterService;
pub use shop::{Purchase, ShopService};
