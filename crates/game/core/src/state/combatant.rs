//! Combatants and their attacks.
//!
//! Players and enemies share the same shape. Stats are plain integers; armor
//! values are percentages of damage reduction and are intentionally not capped
//! at 100 (the damage formula floors every hit at 1 instead).

/// How an attack is mitigated by the defender's armor stats.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageType {
    /// Reduced by `armor`.
    #[default]
    Physical,
    /// Reduced by `magic_armor`.
    Magical,
    /// Reduced by the mean of `armor` and `magic_armor`.
    Hybrid,
}

/// A named attack with a base damage and stat scaling ratios.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attack {
    pub name: String,
    pub base_damage: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_type: DamageType,
    /// Percentage of the attacker's strength added to the base damage.
    #[cfg_attr(feature = "serde", serde(default))]
    pub strength_ratio: u32,
    /// Percentage of the attacker's magic added to the base damage.
    #[cfg_attr(feature = "serde", serde(default))]
    pub magic_ratio: u32,
}

impl Attack {
    pub fn new(name: impl Into<String>, base_damage: u32, damage_type: DamageType) -> Self {
        Self {
            name: name.into(),
            base_damage,
            damage_type,
            strength_ratio: 0,
            magic_ratio: 0,
        }
    }

    #[must_use]
    pub fn with_ratios(mut self, strength_ratio: u32, magic_ratio: u32) -> Self {
        self.strength_ratio = strength_ratio;
        self.magic_ratio = magic_ratio;
        self
    }
}

/// Why a combatant record was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatantError {
    #[error("combatant has an empty name")]
    EmptyName,

    #[error("combatant '{name}' has zero maximum hp")]
    ZeroMaxHp { name: String },

    #[error("combatant '{name}' has hp {hp} above its maximum {hp_max}")]
    HpAboveMax { name: String, hp: u32, hp_max: u32 },

    #[error("combatant '{name}' knows no attacks")]
    NoAttacks { name: String },
}

/// Shared stat block for the player and enemies.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub name: String,
    /// Current hit points. Catalog entries may omit it; loaders fill it with
    /// `hp_max`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hp: u32,
    pub hp_max: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub speed: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub strength: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub magic: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub armor: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub magic_armor: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attacks: Vec<Attack>,
}

impl Combatant {
    /// Creates a combatant at full health with zeroed stats and no attacks.
    pub fn new(name: impl Into<String>, hp_max: u32) -> Self {
        Self {
            name: name.into(),
            hp: hp_max,
            hp_max,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed;
        self
    }

    #[must_use]
    pub fn with_strength(mut self, strength: u32) -> Self {
        self.strength = strength;
        self
    }

    #[must_use]
    pub fn with_magic(mut self, magic: u32) -> Self {
        self.magic = magic;
        self
    }

    #[must_use]
    pub fn with_armor(mut self, armor: u32, magic_armor: u32) -> Self {
        self.armor = armor;
        self.magic_armor = magic_armor;
        self
    }

    #[must_use]
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = hp;
        self
    }

    #[must_use]
    pub fn with_attack(mut self, attack: Attack) -> Self {
        self.attacks.push(attack);
        self
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Finds a known attack by exact name.
    pub fn find_attack(&self, name: &str) -> Option<&Attack> {
        self.attacks.iter().find(|attack| attack.name == name)
    }

    pub fn knows_attack(&self, name: &str) -> bool {
        self.find_attack(name).is_some()
    }

    /// Heals without exceeding `hp_max`. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.hp_max);
        self.hp - before
    }

    /// Sets `hp` back to `hp_max`.
    pub fn restore_hp(&mut self) {
        self.hp = self.hp_max;
    }

    /// Checks the fields every combatant needs.
    pub fn validate(&self) -> Result<(), CombatantError> {
        if self.name.trim().is_empty() {
            return Err(CombatantError::EmptyName);
        }
        if self.hp_max == 0 {
            return Err(CombatantError::ZeroMaxHp {
                name: self.name.clone(),
            });
        }
        if self.hp > self.hp_max {
            return Err(CombatantError::HpAboveMax {
                name: self.name.clone(),
                hp: self.hp,
                hp_max: self.hp_max,
            });
        }
        Ok(())
    }

    /// Player records must additionally know at least one attack.
    pub fn validate_player(&self) -> Result<(), CombatantError> {
        self.validate()?;
        if self.attacks.is_empty() {
            return Err(CombatantError::NoAttacks {
                name: self.name.clone(),
            });
        }
        Ok(())
    }
}
