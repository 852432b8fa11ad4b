//! Content loaders for reading game data from files.
//!
//! Loaders convert RON/TOML files into `combat-core` types. Characters and
//! enemies name their attacks; those names are resolved against the attack
//! library while loading so a typo fails here rather than mid-fight.

pub mod attacks;
pub mod characters;
pub mod config;
pub mod enemies;
pub mod factory;
pub mod shop;
mod spec;

pub use attacks::AttackLoader;
pub use characters::CharacterLoader;
pub use config::ConfigLoader;
pub use enemies::EnemyLoader;
pub use factory::ContentFactory;
pub use shop::ShopLoader;
pub use spec::CombatantSpec;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;
    use std::io::Write;
    use std::path::Path;

    use combat_core::{Attack, AttackLibrary, DamageType};

    pub struct Library(pub HashMap<String, Attack>);

    impl Library {
        pub fn basic() -> Self {
            let attacks = [
                Attack::new("Slash", 12, DamageType::Physical).with_ratios(60, 0),
                Attack::new("Fireball", 18, DamageType::Magical).with_ratios(0, 80),
                Attack::new("Bite", 6, DamageType::Physical),
            ];
            Self(
                attacks
                    .into_iter()
                    .map(|attack| (attack.name.clone(), attack))
                    .collect(),
            )
        }
    }

    impl AttackLibrary for Library {
        fn attack(&self, name: &str) -> Option<Attack> {
            self.0.get(name).cloned()
        }
    }

    pub fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).expect("create test file");
        file.write_all(content.as_bytes()).expect("write test file");
        path
    }
}
