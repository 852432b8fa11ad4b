use combat_core::{AttackLibrary, Combatant};
use serde::{Deserialize, Serialize};

use crate::loaders::LoadResult;

/// Combatant record as written in content files.
///
/// Attacks are referenced by name and `hp` is omitted; entries always start at
/// full health.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantSpec {
    pub name: String,
    pub hp_max: u32,
    #[serde(default)]
    pub speed: u32,
    #[serde(default)]
    pub strength: u32,
    #[serde(default)]
    pub magic: u32,
    #[serde(default)]
    pub armor: u32,
    #[serde(default)]
    pub magic_armor: u32,
    pub attacks: Vec<String>,
}

impl CombatantSpec {
    /// Resolves attack names and validates the resulting combatant.
    ///
    /// Every content combatant must know at least one attack: players need one
    /// to start a run and enemies need one to strike back.
    pub fn resolve(self, library: &dyn AttackLibrary) -> LoadResult<Combatant> {
        let mut combatant = Combatant::new(self.name, self.hp_max)
            .with_speed(self.speed)
            .with_strength(self.strength)
            .with_magic(self.magic)
            .with_armor(self.armor, self.magic_armor);

        for name in &self.attacks {
            let attack = library.attack(name).ok_or_else(|| {
                anyhow::anyhow!("'{}' references unknown attack '{}'", combatant.name, name)
            })?;
            combatant.attacks.push(attack);
        }

        combatant
            .validate_player()
            .map_err(|e| anyhow::anyhow!("Invalid combatant: {}", e))?;
        Ok(combatant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::test_support::Library;

    fn spec(attacks: &[&str]) -> CombatantSpec {
        CombatantSpec {
            name: "Wolf".into(),
            hp_max: 40,
            speed: 12,
            strength: 5,
            magic: 0,
            armor: 10,
            magic_armor: 0,
            attacks: attacks.iter().map(|name| name.to_string()).collect(),
        }
    }

    #[test]
    fn resolves_attacks_at_full_hp() {
        let wolf = spec(&["Bite"]).resolve(&Library::basic()).expect("valid spec");
        assert_eq!(wolf.hp, 40);
        assert_eq!(wolf.attacks[0].base_damage, 6);
    }

    #[test]
    fn rejects_unknown_attack_names() {
        let error = spec(&["Howl"])
            .resolve(&Library::basic())
            .expect_err("unknown attack");
        assert!(error.to_string().contains("Howl"));
    }

    #[test]
    fn rejects_combatants_without_attacks() {
        assert!(spec(&[]).resolve(&Library::basic()).is_err());
    }
}
