//! Shared bootstrap utilities for combat front-ends.
//!
//! Provides configuration loading, oracle assembly, and runtime setup that can
//! be reused by the CLI, a chat bot, or other front-end crates.
pub mod builder;
pub mod config;
pub mod oracles;

pub use builder::{RuntimeBuilder, RuntimeSetup};
pub use config::BotConfig;
pub use oracles::{ContentOracleFactory, OracleFactory};
