#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use combat_core::{
    Attack, CharacterTemplate, CombatConfig, Combatant, DamageType, ItemEffect, ItemKind,
    PlayerId, RegionId, RewardRange, RngOracle, ShopItem,
};
use combat_runtime::{
    AttackLibraryImpl, EnemyCatalogImpl, HookRegistry, InMemoryCharacterStore, OracleManager,
    RosterImpl, Runtime, RuntimeConfig, ShopCatalogImpl,
};

/// Always rolls zero: catalog order, first enemy attack, minimum rewards.
pub struct ZeroRng;

impl RngOracle for ZeroRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        0
    }
}

pub fn alice() -> PlayerId {
    PlayerId::from("alice")
}

pub fn bob() -> PlayerId {
    PlayerId::from("bob")
}

/// 100 hp, speed 10, strength 10. Slash deals 25 to an unarmored target.
pub fn hero() -> Combatant {
    Combatant::new("Hero", 100)
        .with_speed(10)
        .with_strength(10)
        .with_attack(Attack::new("Slash", 20, DamageType::Physical).with_ratios(50, 0))
}

fn slime(name: &str) -> Combatant {
    Combatant::new(name, 20)
        .with_speed(1)
        .with_attack(Attack::new("Ooze", 5, DamageType::Physical))
}

/// meadow: two slow slimes. forest: one wolf faster than the hero.
pub fn oracles(regions: &[&str]) -> OracleManager {
    let mut catalog = HashMap::new();
    catalog.insert(
        RegionId::from("meadow"),
        vec![slime("Green Slime"), slime("Blue Slime")],
    );
    catalog.insert(
        RegionId::from("forest"),
        vec![
            Combatant::new("Wolf", 20)
                .with_speed(20)
                .with_attack(Attack::new("Bite", 8, DamageType::Physical)),
        ],
    );

    let config = CombatConfig {
        regions: regions.iter().map(|region| RegionId::from(*region)).collect(),
        regions_per_run: regions.len() as u32,
        enemies_per_region: 2,
        kill_reward: RewardRange::new(10, 25),
        clear_bonus: RewardRange::new(50, 100),
        starting_balance: 100,
    };

    let roster = vec![CharacterTemplate {
        race: "Human".into(),
        description: Some("A wandering swordsman".into()),
        image: None,
        stats: hero(),
    }];

    let shop = vec![
        ShopItem::new("potion", "Potion", 30).with_effect(ItemEffect::Heal(50)),
        ShopItem::new("iron_sword", "Iron Sword", 80)
            .with_kind(ItemKind::Weapon)
            .with_effect(ItemEffect::Strength(5))
            .permanent(),
        ShopItem::new("tome", "Tome of Fire", 60)
            .with_effect(ItemEffect::LearnAttack("Fireball".into())),
        ShopItem::new("crown", "Crown", 5_000).permanent(),
    ];

    OracleManager::new(
        Arc::new(EnemyCatalogImpl::new(catalog)),
        Arc::new(AttackLibraryImpl::new([Attack::new(
            "Fireball",
            15,
            DamageType::Magical,
        )])),
        Arc::new(RosterImpl::new(roster)),
        Arc::new(ShopCatalogImpl::new(shop)),
        Arc::new(config),
    )
    .with_rng(Arc::new(ZeroRng))
}

pub fn runtime_with(regions: &[&str], hooks: HookRegistry) -> Runtime {
    runtime_with_store(regions, hooks).0
}

/// Like [`runtime_with`], also handing back the character store.
pub fn runtime_with_store(
    regions: &[&str],
    hooks: HookRegistry,
) -> (Runtime, Arc<InMemoryCharacterStore>) {
    let config = RuntimeConfig {
        seed: Some(7),
        ..RuntimeConfig::default()
    };
    let store = Arc::new(InMemoryCharacterStore::new());
    let runtime = Runtime::builder()
        .config(config)
        .oracles(oracles(regions))
        .character_store(store.clone())
        .with_hooks(hooks)
        .build()
        .expect("runtime builds");

    for player in [alice(), bob()] {
        runtime
            .characters()
            .create(&player, "Hero")
            .expect("character created");
    }
    (runtime, store)
}

/// Meadow then forest, default hooks, alice and bob each own a Hero.
pub fn runtime() -> Runtime {
    runtime_with(&["meadow", "forest"], HookRegistry::default_hooks())
}
