//! Content factory for loading every content file from one directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use combat_core::{
    Attack, AttackLibrary, CharacterTemplate, CombatConfig, Combatant, RegionId, ShopItem,
};

use crate::loaders::{
    AttackLoader, CharacterLoader, ConfigLoader, EnemyLoader, LoadResult, ShopLoader,
};

/// Content factory that loads all game content from a data directory.
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
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat configuration from `combat.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        ConfigLoader::load(&self.data_dir.join("combat.toml"))
    }

    /// Load the attack library from `attacks.ron`.
    pub fn load_attacks(&self) -> LoadResult<Vec<Attack>> {
        AttackLoader::load(&self.data_dir.join("attacks.ron"))
    }

    /// Load the character roster from `characters.ron`.
    pub fn load_characters(&self, library: &dyn AttackLibrary) -> LoadResult<Vec<CharacterTemplate>> {
        CharacterLoader::load(&self.data_dir.join("characters.ron"), library)
    }

    /// Load the region enemy catalog from `enemies.ron`.
    pub fn load_enemies(
        &self,
        library: &dyn AttackLibrary,
    ) -> LoadResult<HashMap<RegionId, Vec<Combatant>>> {
        EnemyLoader::load(&self.data_dir.join("enemies.ron"), library)
    }

    /// Load the shop catalog from `shop.ron`.
    pub fn load_shop(&self) -> LoadResult<Vec<ShopItem>> {
        ShopLoader::load(&self.data_dir.join("shop.ron"))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
