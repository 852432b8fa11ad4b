//! Region enemy catalog loader.

use std::collections::HashMap;
use std::path::Path;

use combat_core::{AttackLibrary, Combatant, RegionId};

use crate::loaders::{CombatantSpec, LoadResult, read_file};

/// Loader for the per-region enemy catalog from RON files.
pub struct EnemyLoader;

impl EnemyLoader {
    /// Load the catalog, resolving enemy attacks against `library`.
    ///
    /// File format: `HashMap<String, Vec<CombatantSpec>>` keyed by region id.
    ///
    /// ```ron
    /// {
    ///     "meadow": [(name: "Slime", hp_max: 30, attacks: ["Ooze"])],
    /// }
    /// ```
    pub fn load(
        path: &Path,
        library: &dyn AttackLibrary,
    ) -> LoadResult<HashMap<RegionId, Vec<Combatant>>> {
        let content = read_file(path)?;
        let raw_data: HashMap<String, Vec<CombatantSpec>> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy catalog RON: {}", e))?;

        let mut catalog = HashMap::with_capacity(raw_data.len());
        for (region, specs) in raw_data {
            let enemies = specs
                .into_iter()
                .map(|spec| spec.resolve(library))
                .collect::<LoadResult<Vec<_>>>()
                .map_err(|e| anyhow::anyhow!("Region '{}': {}", region, e))?;
            catalog.insert(RegionId::new(region), enemies);
        }

        Ok(catalog)
    }
}
