//! Builds the runtime, oracles, and config bundle used by front-ends.
use std::sync::Arc;

use anyhow::Result;
use combat_runtime::{OracleManager, Runtime};

use crate::config::BotConfig;
use crate::oracles::{ContentOracleFactory, OracleFactory};

/// Builder that assembles oracles, runtime and configuration for clients.
pub struct RuntimeBuilder {
    config: BotConfig,
    oracle_factory: Arc<dyn OracleFactory>,
}

impl RuntimeBuilder {
    pub fn new(config: BotConfig) -> Self {
        let factory = match &config.data_dir {
            Some(dir) => ContentOracleFactory::new(dir.clone()),
            None => ContentOracleFactory::default_paths(),
        };
        Self {
            config,
            oracle_factory: Arc::new(factory),
        }
    }

    /// Provide a custom oracle factory.
    pub fn oracle_factory(mut self, factory: impl OracleFactory + 'static) -> Self {
        self.oracle_factory = Arc::new(factory);
        self
    }

    pub fn build(self) -> Result<RuntimeSetup> {
        let oracles = self.oracle_factory.build()?;
        let runtime = Runtime::builder()
            .config(self.config.runtime_config())
            .oracles(oracles.clone())
            .build()?;

        Ok(RuntimeSetup {
            config: self.config,
            oracles,
            runtime,
        })
    }
}

pub struct RuntimeSetup {
    pub config: BotConfig,
    pub oracles: OracleManager,
    pub runtime: Runtime,
}
