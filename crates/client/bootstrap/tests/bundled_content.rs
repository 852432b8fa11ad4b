use std::fs;
use std::path::PathBuf;

use combat_bootstrap::{BotConfig, ContentOracleFactory, OracleFactory, RuntimeBuilder};
use combat_core::{PlayerId, SessionPhase};

fn bundled() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../game/content/data")
}

fn config() -> BotConfig {
    BotConfig {
        data_dir: Some(bundled()),
        seed: Some(42),
        ..BotConfig::default()
    }
}

#[test]
fn bundled_content_builds_a_runtime() {
    let setup = RuntimeBuilder::new(config()).build().unwrap();

    assert!(!setup.runtime.characters().roster().is_empty());
    assert!(!setup.runtime.shop().catalog().is_empty());
    assert_eq!(setup.oracles.config().regions.len(), 5);
}

#[test]
fn missing_directory_is_an_error() {
    let factory = ContentOracleFactory::new("/definitely/not/here");
    let error = factory.build().err().unwrap();
    assert!(error.to_string().contains("not found"));
}

#[test]
fn a_fresh_character_can_start_a_run() {
    let setup = RuntimeBuilder::new(config()).build().unwrap();
    let runtime = setup.runtime;
    let player = PlayerId::from(1234_u64);
    let name = runtime.characters().roster()[0].name().to_owned();

    runtime.characters().create(&player, &name).unwrap();
    let (session, update) = runtime.start_session(&player, Some(2), Some(3)).unwrap();

    assert_eq!(update.snapshot.regions_remaining, 1);
    assert!(matches!(
        update.snapshot.phase,
        SessionPhase::AwaitingPlayerChoice | SessionPhase::ResolvingEnemyAttack
    ));
    assert_eq!(runtime.shop().balance(&player).unwrap(), 100);
    runtime.abandon(session, &player).unwrap();
}

#[test]
fn configured_region_without_enemies_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    for file in ["attacks.ron", "characters.ron", "enemies.ron", "shop.ron"] {
        fs::copy(bundled().join(file), dir.path().join(file)).unwrap();
    }
    let combat = fs::read_to_string(bundled().join("combat.toml")).unwrap();
    let combat = combat.replace(
        r#"regions = ["meadow", "forest", "mountain", "ruins", "volcano"]"#,
        r#"regions = ["meadow", "atlantis"]"#,
    );
    fs::write(dir.path().join("combat.toml"), combat).unwrap();

    let error = ContentOracleFactory::new(dir.path()).build().err().unwrap();
    assert!(error.to_string().contains("atlantis"));
}
