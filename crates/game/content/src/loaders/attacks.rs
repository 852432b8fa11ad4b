//! Attack library loader.

use std::collections::HashSet;
use std::path::Path;

use combat_core::Attack;

use crate::loaders::{LoadResult, read_file};

/// Loader for the attack library from RON files.
pub struct AttackLoader;

impl AttackLoader {
    /// Load the attack library from a RON file.
    ///
    /// RON format: `Vec<Attack>`. Attack names must be unique; characters,
    /// enemies and shop items refer to attacks by name.
    pub fn load(path: &Path) -> LoadResult<Vec<Attack>> {
        let content = read_file(path)?;
        let attacks: Vec<Attack> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse attack library RON: {}", e))?;

        let mut seen = HashSet::new();
        for attack in &attacks {
            if !seen.insert(attack.name.as_str()) {
                anyhow::bail!("Duplicate attack '{}' in {}", attack.name, path.display());
            }
        }

        Ok(attacks)
    }
}
