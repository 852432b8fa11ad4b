//! Shop catalog oracle implementation.

use combat_core::{ShopItem, ShopOracle};

#[derive(Debug, Clone, Default)]
pub struct ShopCatalogImpl {
    items: Vec<ShopItem>,
}

impl ShopCatalogImpl {
    pub fn new(items: Vec<ShopItem>) -> Self {
        Self { items }
    }
}

impl ShopOracle for ShopCatalogImpl {
    fn items(&self) -> &[ShopItem] {
        &self.items
    }
}
