//! Shop catalog loader.

use std::collections::HashSet;
use std::path::Path;

use combat_core::ShopItem;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Shop catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopCatalog {
    pub items: Vec<ShopItem>,
}

/// Loader for the shop catalog from RON files.
pub struct ShopLoader;

impl ShopLoader {
    /// Load the shop catalog. Item ids are unique, ignoring case.
    pub fn load(path: &Path) -> LoadResult<Vec<ShopItem>> {
        let content = read_file(path)?;
        let catalog: ShopCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse shop catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        for item in &catalog.items {
            if !seen.insert(item.id.to_ascii_lowercase()) {
                anyhow::bail!("Duplicate shop item '{}'", item.id);
            }
        }

        Ok(catalog.items)
    }
}
