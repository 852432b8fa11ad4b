//! Attack library oracle implementation.

use std::collections::HashMap;

use combat_core::{Attack, AttackLibrary};

/// Attack library indexed by lowercase name.
#[derive(Debug, Clone, Default)]
pub struct AttackLibraryImpl {
    attacks: HashMap<String, Attack>,
}

impl AttackLibraryImpl {
    pub fn new(attacks: impl IntoIterator<Item = Attack>) -> Self {
        Self {
            attacks: attacks
                .into_iter()
                .map(|attack| (attack.name.to_lowercase(), attack))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.attacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attacks.is_empty()
    }
}

impl AttackLibrary for AttackLibraryImpl {
    fn attack(&self, name: &str) -> Option<Attack> {
        self.attacks.get(&name.to_lowercase()).cloned()
    }
}
