use std::collections::HashMap;

use combat_core::{
    Attack, CombatConfig, CombatEngine, CombatEnv, CombatEvent, CombatSession, Combatant,
    DamageType, EnemyCatalog, EngineError, Outcome, PcgRng, PlayerId, RegionId, RngOracle,
    SessionPhase, SessionRequest, Turn, calculate_damage,
};

/// Always rolls zero: samples keep catalog order, enemies use their first
/// attack and rewards pay the range minimum.
struct ZeroRng;

impl RngOracle for ZeroRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        0
    }
}

#[derive(Default)]
struct TestCatalog {
    regions: HashMap<RegionId, Vec<Combatant>>,
}

impl TestCatalog {
    fn with_region(mut self, region: &str, enemies: Vec<Combatant>) -> Self {
        self.regions.insert(region.into(), enemies);
        self
    }
}

impl EnemyCatalog for TestCatalog {
    fn roster(&self, region: &RegionId) -> &[Combatant] {
        self.regions.get(region).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn hero() -> Combatant {
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

fn player_id() -> PlayerId {
    PlayerId::from("alice")
}

fn start(
    catalog: &TestCatalog,
    player: Combatant,
    regions: &[&str],
    enemies_per_region: u32,
) -> Result<CombatSession, EngineError> {
    let config = CombatConfig::default();
    let env = CombatEnv::new(catalog, &ZeroRng, &config);
    let request = SessionRequest {
        player_id: player_id(),
        player,
        regions: regions.iter().map(|region| RegionId::from(*region)).collect(),
        enemies_per_region,
        seed: 7,
    };
    CombatEngine::start(env, request).map(|(session, _)| session)
}

#[test]
fn damage_never_drops_below_one() {
    let attacker = Combatant::new("Imp", 10);
    for armor in [0, 50, 99, 100, 150, 400] {
        let defender = Combatant::new("Golem", 10).with_armor(armor, armor);
        for damage_type in [DamageType::Physical, DamageType::Magical, DamageType::Hybrid] {
            for base in 1..=5 {
                let attack = Attack::new("Poke", base, damage_type);
                assert!(calculate_damage(&attacker, &defender, &attack) >= 1);
            }
        }
    }
}

#[test]
fn speed_tie_gives_player_the_first_move() {
    let catalog =
        TestCatalog::default().with_region("meadow", vec![slime("Slime").with_speed(10)]);
    let session = start(&catalog, hero(), &["meadow"], 1).expect("session starts");

    assert_eq!(session.whose_turn, Turn::Player);
    assert_eq!(session.phase, SessionPhase::AwaitingPlayerChoice);
}

#[test]
fn faster_enemy_rejects_the_first_player_attack() {
    let catalog = TestCatalog::default().with_region(
        "meadow",
        vec![Combatant::new("Wolf", 60)
            .with_speed(15)
            .with_attack(Attack::new("Bite", 8, DamageType::Physical))],
    );
    let config = CombatConfig::default();
    let env = CombatEnv::new(&catalog, &ZeroRng, &config);
    let mut session = start(&catalog, hero(), &["meadow"], 1).expect("session starts");
    let before = session.clone();

    let mut engine = CombatEngine::new(&mut session);
    let error = engine
        .submit_attack(env, &player_id(), "Slash")
        .expect_err("enemy opens the fight");
    assert_eq!(error, EngineError::NotYourTurn);
    assert_eq!(engine.session(), &before);

    let update = engine
        .resolve_enemy_turn(env, &player_id())
        .expect("enemy strikes");
    assert_eq!(update.snapshot.player.hp, 92);
    assert_eq!(update.snapshot.whose_turn, Turn::Player);
    assert_eq!(update.log(), vec!["Wolf used Bite, dealt 8 damage (92 hp left)"]);

    let error = engine
        .resolve_enemy_turn(env, &player_id())
        .expect_err("enemy already acted");
    assert_eq!(error, EngineError::NotEnemyTurn);
}

#[test]
fn invalid_attack_is_rejected_without_mutation() {
    let catalog = TestCatalog::default().with_region("meadow", vec![slime("Slime")]);
    let config = CombatConfig::default();
    let env = CombatEnv::new(&catalog, &ZeroRng, &config);
    let mut session = start(&catalog, hero(), &["meadow"], 1).expect("session starts");
    let before = session.clone();

    let mut engine = CombatEngine::new(&mut session);
    let first = engine.submit_attack(env, &player_id(), "Fireball");
    let second = engine.submit_attack(env, &player_id(), "Fireball");

    let expected = EngineError::InvalidAttack {
        attack: "Fireball".into(),
    };
    assert_eq!(first, Err(expected.clone()));
    assert_eq!(second, Err(expected));
    assert_eq!(session, before);
}

#[test]
fn other_players_cannot_drive_the_session() {
    let catalog = TestCatalog::default().with_region("meadow", vec![slime("Slime")]);
    let config = CombatConfig::default();
    let env = CombatEnv::new(&catalog, &ZeroRng, &config);
    let mut session = start(&catalog, hero(), &["meadow"], 1).expect("session starts");

    let mut engine = CombatEngine::new(&mut session);
    let error = engine
        .submit_attack(env, &PlayerId::from("mallory"), "Slash")
        .expect_err("wrong submitter");
    assert!(matches!(error, EngineError::NotYourSession { .. }));
}

#[test]
fn single_hit_clears_a_one_enemy_run() {
    let catalog = TestCatalog::default().with_region("meadow", vec![slime("Slime")]);
    let config = CombatConfig::default();
    let env = CombatEnv::new(&catalog, &ZeroRng, &config);
    let mut session = start(&catalog, hero(), &["meadow"], 1).expect("session starts");

    let mut engine = CombatEngine::new(&mut session);
    let update = engine
        .submit_attack(env, &player_id(), "Slash")
        .expect("attack resolves");

    assert_eq!(update.outcome, Some(Outcome::PlayerVictoryAllRegions));
    assert_eq!(update.snapshot.phase, SessionPhase::SessionWon);
    let kill_rewards = update
        .events
        .iter()
        .filter(|event| matches!(event, CombatEvent::KillReward { .. }))
        .count();
    assert_eq!(kill_rewards, 1);
    assert!(update.events.contains(&CombatEvent::ClearBonus { gold: 50 }));
    assert_eq!(update.gold(), 60);
    assert_eq!(update.snapshot.player.hp, 100);
}

#[test]
fn exhausting_the_enemy_queue_advances_region_once() {
    let catalog = TestCatalog::default()
        .with_region("meadow", vec![slime("Slime A"), slime("Slime B")])
        .with_region("forest", vec![slime("Wisp")]);
    let config = CombatConfig::default();
    let env = CombatEnv::new(&catalog, &ZeroRng, &config);
    let mut hurt = hero();
    hurt.hp = 40;
    let mut session = start(&catalog, hurt, &["meadow", "forest"], 2).expect("session starts");
    assert_eq!(session.enemy_queue.len(), 1);
    assert_eq!(session.player.hp, 40);

    let mut engine = CombatEngine::new(&mut session);
    let first = engine
        .submit_attack(env, &player_id(), "Slash")
        .expect("first kill");
    assert_eq!(first.snapshot.phase, SessionPhase::AwaitingPlayerChoice);
    assert_eq!(first.snapshot.enemy.name, "Slime B");

    let second = engine
        .submit_attack(env, &player_id(), "Slash")
        .expect("second kill");
    assert_eq!(second.snapshot.phase, SessionPhase::AdvancingRegion);
    assert!(second.events.contains(&CombatEvent::RegionCleared {
        region: "meadow".into(),
        next: Some("forest".into()),
    }));

    let third = engine.submit_attack(env, &player_id(), "Slash");
    assert_eq!(third, Err(EngineError::RegionEntryPending));
    assert_eq!(engine.session().regions_cleared, 1);

    let entered = engine
        .enter_next_region(env, &player_id())
        .expect("next region");
    assert_eq!(entered.snapshot.region, RegionId::from("forest"));
    assert_eq!(entered.snapshot.player.hp, 100);
    assert_eq!(entered.snapshot.phase, SessionPhase::AwaitingPlayerChoice);

    assert_eq!(
        engine.enter_next_region(env, &player_id()),
        Err(EngineError::NoRegionPending)
    );
}

#[test]
fn last_region_cleared_wins_and_locks_the_session() {
    let catalog =
        TestCatalog::default().with_region("meadow", vec![slime("Slime A"), slime("Slime B")]);
    let config = CombatConfig::default();
    let env = CombatEnv::new(&catalog, &ZeroRng, &config);
    let mut session = start(&catalog, hero(), &["meadow"], 2).expect("session starts");

    let mut engine = CombatEngine::new(&mut session);
    engine
        .submit_attack(env, &player_id(), "Slash")
        .expect("first kill");
    let won = engine
        .submit_attack(env, &player_id(), "Slash")
        .expect("second kill");
    assert!(won.is_terminal());
    assert_eq!(
        won.events
            .iter()
            .filter(|event| matches!(event, CombatEvent::SessionWon { .. }))
            .count(),
        1
    );

    let after = engine.submit_attack(env, &player_id(), "Slash");
    assert_eq!(
        after,
        Err(EngineError::SessionNotActive {
            outcome: Outcome::PlayerVictoryAllRegions
        })
    );
}

#[test]
fn enemy_knockout_ends_the_run() {
    let catalog = TestCatalog::default().with_region(
        "volcano",
        vec![Combatant::new("Drake", 500)
            .with_speed(1)
            .with_attack(Attack::new("Inferno", 60, DamageType::Magical))],
    );
    let config = CombatConfig::default();
    let env = CombatEnv::new(&catalog, &ZeroRng, &config);
    let mut weak = hero();
    weak.hp = 50;
    let mut session = start(&catalog, weak, &["volcano"], 1).expect("session starts");

    let mut engine = CombatEngine::new(&mut session);
    let update = engine
        .submit_attack(env, &player_id(), "Slash")
        .expect("exchange resolves");

    assert_eq!(update.outcome, Some(Outcome::PlayerDefeated));
    assert_eq!(update.snapshot.phase, SessionPhase::SessionLost);
    assert_eq!(update.snapshot.player.hp, 0);
    assert_eq!(update.snapshot.enemy.hp, 475);
    assert_eq!(update.gold(), 0);
}

#[test]
fn start_rejects_unusable_requests() {
    let catalog = TestCatalog::default().with_region("meadow", vec![slime("Slime")]);

    let mut unarmed = hero();
    unarmed.attacks.clear();
    assert_eq!(
        start(&catalog, unarmed, &["meadow"], 1),
        Err(EngineError::MissingCharacter {
            player: player_id()
        })
    );

    let mut fallen = hero();
    fallen.hp = 0;
    assert_eq!(
        start(&catalog, fallen, &["meadow"], 1),
        Err(EngineError::PlayerDown {
            player: player_id()
        })
    );

    assert_eq!(
        start(&catalog, hero(), &["desert"], 1),
        Err(EngineError::NoEnemiesAvailable {
            region: "desert".into()
        })
    );
    assert_eq!(start(&catalog, hero(), &[], 1), Err(EngineError::NoRegions));
}

#[test]
fn start_rejects_a_later_region_without_enemies() {
    let catalog = TestCatalog::default().with_region("meadow", vec![slime("Slime")]);

    assert_eq!(
        start(&catalog, hero(), &["meadow", "ruins"], 1),
        Err(EngineError::NoEnemiesAvailable {
            region: "ruins".into()
        })
    );
}

#[test]
fn same_seed_replays_the_same_run() {
    let catalog = TestCatalog::default().with_region(
        "forest",
        ["Wolf", "Boar", "Spider", "Bandit", "Bear"]
            .into_iter()
            .map(|name| {
                Combatant::new(name, 80)
                    .with_speed(1)
                    .with_attack(Attack::new("Claw", 6, DamageType::Physical))
                    .with_attack(Attack::new("Maul", 9, DamageType::Physical))
            })
            .collect(),
    );
    let config = CombatConfig::default();
    let env = CombatEnv::new(&catalog, &PcgRng, &config);

    let play = || {
        let request = SessionRequest {
            player_id: player_id(),
            player: hero(),
            regions: vec!["forest".into()],
            enemies_per_region: 3,
            seed: 99,
        };
        let (mut session, _) = CombatEngine::start(env, request).expect("session starts");
        let mut engine = CombatEngine::new(&mut session);
        let log: Vec<String> = (0..6)
            .filter_map(|_| engine.submit_attack(env, &player_id(), "Slash").ok())
            .flat_map(|update| update.log())
            .collect();
        (session, log)
    };

    assert_eq!(play(), play());
}
