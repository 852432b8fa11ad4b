//! Shared fixtures for unit tests.

use std::collections::HashMap;
use std::sync::Arc;

use combat_core::{
    Attack, CharacterTemplate, CombatConfig, CombatEngine, CombatSession, Combatant, DamageType,
    ItemEffect, ItemKind, PlayerId, RegionId, RewardRange, RngOracle, SessionRequest,
    SessionUpdate, ShopItem,
};

use crate::oracle::{
    AttackLibraryImpl, EnemyCatalogImpl, OracleManager, RosterImpl, ShopCatalogImpl,
};

/// Always rolls zero: catalog order, first enemy attack, minimum rewards.
pub struct ZeroRng;

impl RngOracle for ZeroRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        0
    }
}

pub fn slash() -> Attack {
    Attack::new("Slash", 20, DamageType::Physical).with_ratios(50, 0)
}

/// 100 hp, speed 10, Slash deals 25 to an unarmored target.
pub fn hero() -> Combatant {
    Combatant::new("Hero", 100)
        .with_speed(10)
        .with_strength(10)
        .with_attack(slash())
}

fn slime(name: &str) -> Combatant {
    Combatant::new(name, 20)
        .with_speed(1)
        .with_attack(Attack::new("Ooze", 5, DamageType::Physical))
}

pub fn oracles() -> OracleManager {
    let mut regions = HashMap::new();
    regions.insert(
        RegionId::from("meadow"),
        vec![slime("Green Slime"), slime("Blue Slime")],
    );
    regions.insert(
        RegionId::from("forest"),
        vec![
            Combatant::new("Wolf", 20)
                .with_speed(20)
                .with_attack(Attack::new("Bite", 8, DamageType::Physical)),
        ],
    );

    let config = CombatConfig {
        regions: vec!["meadow".into(), "forest".into()],
        regions_per_run: 2,
        enemies_per_region: 2,
        kill_reward: RewardRange::new(10, 25),
        clear_bonus: RewardRange::new(50, 100),
        starting_balance: 100,
    };

    let roster = vec![CharacterTemplate {
        race: "Human".into(),
        description: None,
        image: None,
        stats: hero(),
    }];

    let shop = vec![
        ShopItem::new("potion", "Potion", 30).with_effect(ItemEffect::Heal(50)),
        ShopItem::new("iron_sword", "Iron Sword", 80)
            .with_kind(ItemKind::Weapon)
            .with_effect(ItemEffect::Strength(5))
            .permanent(),
        ShopItem::new("tome", "Tome of Fire", 60).with_effect(ItemEffect::LearnAttack("Fireball".into())),
    ];

    OracleManager::new(
        Arc::new(EnemyCatalogImpl::new(regions)),
        Arc::new(AttackLibraryImpl::new([
            slash(),
            Attack::new("Fireball", 15, DamageType::Magical),
        ])),
        Arc::new(RosterImpl::new(roster)),
        Arc::new(ShopCatalogImpl::new(shop)),
        Arc::new(config),
    )
    .with_rng(Arc::new(ZeroRng))
}

/// A session freshly started in the meadow.
pub fn started_session(player: &str) -> (CombatSession, SessionUpdate) {
    let oracles = oracles();
    let request = SessionRequest {
        player_id: PlayerId::from(player),
        player: hero(),
        regions: vec!["meadow".into()],
        enemies_per_region: 2,
        seed: 7,
    };
    match CombatEngine::start(oracles.env(), request) {
        Ok(started) => started,
        Err(error) => panic!("fixture session failed to start: {error}"),
    }
}
