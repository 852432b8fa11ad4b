//! Enemy catalog oracle implementation.

use std::collections::HashMap;

use combat_core::{Combatant, EnemyCatalog, RegionId};

/// Enemy rosters keyed by region.
#[derive(Debug, Clone, Default)]
pub struct EnemyCatalogImpl {
    regions: HashMap<RegionId, Vec<Combatant>>,
}

impl EnemyCatalogImpl {
    pub fn new(regions: HashMap<RegionId, Vec<Combatant>>) -> Self {
        Self { regions }
    }
}

impl EnemyCatalog for EnemyCatalogImpl {
    fn roster(&self, region: &RegionId) -> &[Combatant] {
        self.regions.get(region).map(Vec::as_slice).unwrap_or(&[])
    }
}
