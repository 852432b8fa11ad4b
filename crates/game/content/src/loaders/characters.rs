//! Character roster loader.

use std::collections::HashSet;
use std::path::Path;

use combat_core::{AttackLibrary, CharacterTemplate};
use serde::{Deserialize, Serialize};

use crate::loaders::{CombatantSpec, LoadResult, read_file};

/// Roster entry as written in `characters.ron`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CharacterEntry {
    race: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    image: Option<String>,
    stats: CombatantSpec,
}

/// Loader for the base character roster from RON files.
pub struct CharacterLoader;

impl CharacterLoader {
    /// Load the roster, resolving starting attacks against `library`.
    ///
    /// Character names are unique, ignoring case.
    pub fn load(path: &Path, library: &dyn AttackLibrary) -> LoadResult<Vec<CharacterTemplate>> {
        let content = read_file(path)?;
        let entries: Vec<CharacterEntry> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse character roster RON: {}", e))?;

        let mut seen = HashSet::new();
        let mut roster = Vec::with_capacity(entries.len());
        for entry in entries {
            if !seen.insert(entry.stats.name.to_ascii_lowercase()) {
                anyhow::bail!("Duplicate character '{}' in roster", entry.stats.name);
            }
            let stats = entry.stats.resolve(library)?;
            roster.push(CharacterTemplate {
                race: entry.race,
                description: entry.description,
                image: entry.image,
                stats,
            });
        }

        Ok(roster)
    }
}
