//! Front-end configuration read from the process environment.
use std::env;
use std::path::PathBuf;

use combat_runtime::RuntimeConfig;

/// Configuration required to bootstrap a combat runtime.
#[derive(Clone, Debug)]
pub struct BotConfig {
    /// Content directory. Resolved by [`ContentOracleFactory::default_paths`]
    /// when unset.
    ///
    /// [`ContentOracleFactory::default_paths`]: crate::ContentOracleFactory::default_paths
    pub data_dir: Option<PathBuf>,
    /// Regions per run requested by the front-end.
    pub regions: Option<u32>,
    /// Enemies per region requested by the front-end.
    pub enemies: Option<u32>,
    /// Fixed RNG seed, for reproducible runs.
    pub seed: Option<u64>,
    /// Names the log directory of this process.
    pub session_id: Option<String>,
    pub event_buffer: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            regions: None,
            enemies: None,
            seed: None,
            session_id: None,
            event_buffer: 100,
        }
    }
}

impl BotConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_DATA_DIR` - Content directory (default: bundled content)
    /// - `COMBAT_REGIONS` - Regions per run (default: from combat.toml)
    /// - `COMBAT_ENEMIES` - Enemies per region (default: from combat.toml)
    /// - `COMBAT_SEED` - Fixed RNG seed (default: random per session)
    /// - `COMBAT_SESSION_ID` - Log directory name (default: timestamp)
    /// - `COMBAT_EVENT_BUFFER` - Event bus capacity per topic (default: 100)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        config.data_dir = read("COMBAT_DATA_DIR").map(PathBuf::from);
        config.regions = read("COMBAT_REGIONS").and_then(|value| parse(&value));
        config.enemies = read("COMBAT_ENEMIES").and_then(|value| parse(&value));
        config.seed = read("COMBAT_SEED").and_then(|value| parse(&value));
        config.session_id = read("COMBAT_SESSION_ID");

        if let Some(capacity) = read("COMBAT_EVENT_BUFFER").and_then(|value| parse::<usize>(&value)) {
            config.event_buffer = capacity.max(1);
        }

        config
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            event_buffer_size: self.event_buffer,
            seed: self.seed,
            ..RuntimeConfig::default()
        }
    }
}

fn parse<T>(value: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(value, "ignoring unparsable environment value");
            None
        }
    }
}
