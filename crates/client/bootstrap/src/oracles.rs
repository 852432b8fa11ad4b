//! Helpers for constructing oracle managers consumed by the runtime.
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use combat_content::ContentFactory;
use combat_runtime::{
    AttackLibraryImpl, EnemyCatalogImpl, OracleManager, RosterImpl, ShopCatalogImpl,
};

pub trait OracleFactory: Send + Sync {
    fn build(&self) -> Result<OracleManager>;
}

/// Oracle factory that loads combat content from data files.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── combat.toml
/// ├── attacks.ron
/// ├── characters.ron
/// ├── enemies.ron
/// └── shop.ron
/// ```
#[derive(Clone, Debug)]
pub struct ContentOracleFactory {
    data_dir: PathBuf,
}

impl ContentOracleFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Create with the bundled content directory.
    ///
    /// This tries to find the data directory in the following order:
    /// 1. Relative to current executable (../../crates/game/content/data)
    /// 2. Relative to current directory (crates/game/content/data)
    pub fn default_paths() -> Self {
        const BUNDLED: &str = "crates/game/content/data";

        let from_exe = std::env::current_exe().ok().and_then(|exe| {
            exe.parent()
                .and_then(|dir| dir.parent())
                .and_then(|dir| dir.parent())
                .map(|root| root.join(BUNDLED))
                .filter(|dir| dir.is_dir())
        });

        let data_dir = from_exe.unwrap_or_else(|| {
            std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(BUNDLED)
        });

        Self::new(data_dir)
    }

    pub fn data_dir(&self) -> &std::path::Path {
        &self.data_dir
    }
}

impl OracleFactory for ContentOracleFactory {
    fn build(&self) -> Result<OracleManager> {
        if !self.data_dir.is_dir() {
            bail!(
                "content data directory not found: {} (set COMBAT_DATA_DIR to override)",
                self.data_dir.display()
            );
        }

        let factory = ContentFactory::new(&self.data_dir);
        let location = self.data_dir.display();

        let config = factory
            .load_config()
            .with_context(|| format!("loading combat.toml from {location}"))?;
        let attacks = AttackLibraryImpl::new(
            factory
                .load_attacks()
                .with_context(|| format!("loading attacks.ron from {location}"))?,
        );
        let roster = factory
            .load_characters(&attacks)
            .with_context(|| format!("loading characters.ron from {location}"))?;
        let enemies = factory
            .load_enemies(&attacks)
            .with_context(|| format!("loading enemies.ron from {location}"))?;
        if let Some(region) = config
            .regions
            .iter()
            .find(|region| enemies.get(*region).is_none_or(Vec::is_empty))
        {
            bail!("region {region} has no enemies in enemies.ron ({location})");
        }
        let shop = factory
            .load_shop()
            .with_context(|| format!("loading shop.ron from {location}"))?;

        tracing::info!(
            data_dir = %location,
            regions = config.regions.len(),
            characters = roster.len(),
            attacks = attacks.len(),
            items = shop.len(),
            "content loaded"
        );

        Ok(OracleManager::new(
            Arc::new(EnemyCatalogImpl::new(enemies)),
            Arc::new(attacks),
            Arc::new(RosterImpl::new(roster)),
            Arc::new(ShopCatalogImpl::new(shop)),
            Arc::new(config),
        ))
    }
}
