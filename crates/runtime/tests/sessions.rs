mod common;

use std::sync::{Arc, Mutex, OnceLock};

use combat_core::{CombatEvent, EngineError, Outcome, SessionPhase, Turn};
use combat_runtime::{
    CharacterPatch, CharacterStore, CombatEnvelope, EconomyEvent, Event, HookContext,
    HookCriticality, HookRegistry, PersistPlayerHook, PlayerCommand, RepositoryError, Result,
    Runtime, RuntimeError, ScriptedCommands, SessionEvent, SessionHook, StepOutcome, Topic,
};

use common::{alice, bob};

#[test]
fn full_run_across_two_regions() {
    let runtime = common::runtime();
    let (session, update) = runtime.start_session(&alice(), None, None).unwrap();

    assert_eq!(update.snapshot.region.as_str(), "meadow");
    assert_eq!(update.snapshot.enemy.name, "Green Slime");
    assert_eq!(update.snapshot.whose_turn, Turn::Player);

    let update = runtime.submit_attack(session, &alice(), "Slash").unwrap();
    assert_eq!(update.snapshot.enemy.name, "Blue Slime");
    assert_eq!(update.gold(), 10);

    let update = runtime.submit_attack(session, &alice(), "Slash").unwrap();
    assert_eq!(update.snapshot.phase, SessionPhase::AdvancingRegion);
    assert_eq!(runtime.shop().balance(&alice()).unwrap(), 120);

    let update = runtime.enter_next_region(session, &alice()).unwrap();
    assert_eq!(update.snapshot.enemy.name, "Wolf");
    assert_eq!(update.snapshot.phase, SessionPhase::ResolvingEnemyAttack);

    let update = runtime.resolve_enemy_turn(session, &alice()).unwrap();
    assert_eq!(update.snapshot.player.hp, 92);
    assert_eq!(
        runtime.characters().character(&alice()).unwrap().stats.hp,
        92
    );

    let update = runtime.submit_attack(session, &alice(), "Slash").unwrap();
    assert_eq!(update.outcome, Some(Outcome::PlayerVictoryAllRegions));
    assert!(update.events.contains(&CombatEvent::ClearBonus { gold: 50 }));
    assert_eq!(runtime.shop().balance(&alice()).unwrap(), 180);

    assert_eq!(runtime.active_sessions(), 0);
    assert!(matches!(
        runtime.snapshot(session),
        Err(RuntimeError::SessionNotFound { .. })
    ));
}

#[test]
fn single_enemy_run_pays_one_kill_reward_and_the_bonus() {
    let runtime = common::runtime_with(&["meadow"], HookRegistry::default_hooks());
    let (session, _) = runtime.start_session(&alice(), Some(1), Some(1)).unwrap();

    let update = runtime.submit_attack(session, &alice(), "Slash").unwrap();

    assert_eq!(update.outcome, Some(Outcome::PlayerVictoryAllRegions));
    let kills = update
        .events
        .iter()
        .filter(|event| matches!(event, CombatEvent::KillReward { .. }))
        .count();
    assert_eq!(kills, 1);
    assert_eq!(runtime.shop().balance(&alice()).unwrap(), 160);
}

#[test]
fn faster_enemy_must_be_resolved_first() {
    let runtime = common::runtime_with(&["forest"], HookRegistry::default_hooks());
    let (session, _) = runtime.start_session(&alice(), None, None).unwrap();
    let before = runtime.snapshot(session).unwrap();

    let error = runtime.submit_attack(session, &alice(), "Slash").unwrap_err();
    assert!(matches!(error, RuntimeError::Engine(EngineError::NotYourTurn)));
    assert_eq!(runtime.snapshot(session).unwrap(), before);

    let update = runtime.resolve_enemy_turn(session, &alice()).unwrap();
    assert_eq!(update.log(), vec!["Wolf used Bite, dealt 8 damage (92 hp left)"]);
    assert_eq!(update.snapshot.whose_turn, Turn::Player);
}

#[test]
fn rejected_choices_leave_the_session_untouched() {
    let runtime = common::runtime();
    let (session, _) = runtime.start_session(&alice(), None, None).unwrap();
    let before = runtime.snapshot(session).unwrap();

    for _ in 0..2 {
        let error = runtime.submit_attack(session, &alice(), "Meteor").unwrap_err();
        assert!(matches!(
            error,
            RuntimeError::Engine(EngineError::InvalidAttack { .. })
        ));
    }
    let error = runtime.submit_attack(session, &bob(), "Slash").unwrap_err();
    assert!(matches!(
        error,
        RuntimeError::Engine(EngineError::NotYourSession { .. })
    ));

    assert_eq!(runtime.snapshot(session).unwrap(), before);
}

#[test]
fn one_running_session_per_player() {
    let runtime = common::runtime();
    let (session, _) = runtime.start_session(&alice(), None, None).unwrap();

    assert!(matches!(
        runtime.start_session(&alice(), None, None),
        Err(RuntimeError::SessionAlreadyActive { session: running, .. }) if running == session
    ));
    assert!(matches!(
        runtime.characters().delete(&alice()),
        Err(RuntimeError::SessionAlreadyActive { .. })
    ));

    let (other, _) = runtime.start_session(&bob(), None, None).unwrap();
    assert_ne!(session, other);
}

#[test]
fn start_without_character_is_rejected() {
    let runtime = common::runtime();
    let carol = "carol".into();

    let error = runtime.start_session(&carol, None, None).unwrap_err();
    assert!(matches!(
        error,
        RuntimeError::Engine(EngineError::MissingCharacter { .. })
    ));
    assert_eq!(runtime.active_sessions(), 0);
}

#[test]
fn defeat_persists_zero_hp_until_revived() {
    let (runtime, store) =
        common::runtime_with_store(&["forest"], HookRegistry::default_hooks());
    store.save(&alice(), CharacterPatch::hp(8)).unwrap();

    let (session, _) = runtime.start_session(&alice(), None, None).unwrap();
    let update = runtime.resolve_enemy_turn(session, &alice()).unwrap();

    assert_eq!(update.outcome, Some(Outcome::PlayerDefeated));
    assert_eq!(store.load(&alice()).unwrap().unwrap().stats.hp, 0);
    assert!(matches!(
        runtime.start_session(&alice(), None, None),
        Err(RuntimeError::Engine(EngineError::PlayerDown { .. }))
    ));

    let record = runtime.characters().revive(&alice()).unwrap();
    assert_eq!(record.stats.hp, 100);
    assert!(runtime.start_session(&alice(), None, None).is_ok());
}

#[test]
fn abandon_removes_the_session() {
    let runtime = common::runtime();
    let mut lifecycle = runtime.subscribe(Topic::Session);
    let (session, _) = runtime.start_session(&alice(), None, None).unwrap();

    assert!(matches!(
        runtime.abandon(session, &bob()),
        Err(RuntimeError::Engine(EngineError::NotYourSession { .. }))
    ));
    runtime.abandon(session, &alice()).unwrap();

    assert_eq!(runtime.active_session(&alice()), None);
    assert!(matches!(
        lifecycle.try_recv().unwrap(),
        Event::Session(SessionEvent::Started { .. })
    ));
    assert!(matches!(
        lifecycle.try_recv().unwrap(),
        Event::Session(SessionEvent::Abandoned { .. })
    ));
}

#[test]
fn rewards_are_broadcast() {
    let runtime = common::runtime();
    let mut economy = runtime.subscribe(Topic::Economy);
    let mut combat = runtime.subscribe(Topic::Combat);
    let (session, _) = runtime.start_session(&alice(), None, None).unwrap();

    runtime.submit_attack(session, &alice(), "Slash").unwrap();

    match economy.try_recv().unwrap() {
        Event::Economy(EconomyEvent::Credited {
            amount, balance, ..
        }) => {
            assert_eq!(amount, 10);
            assert_eq!(balance, 110);
        }
        other => panic!("unexpected event {other:?}"),
    }

    let mut seen = Vec::new();
    while let Ok(Event::Combat(CombatEnvelope { event, .. })) = combat.try_recv() {
        seen.push(event);
    }
    assert!(seen.iter().any(|event| matches!(event, CombatEvent::EnemyDefeated { .. })));
    assert!(seen.iter().any(|event| matches!(event, CombatEvent::KillReward { gold: 10, .. })));
}

#[test]
fn custom_registry_leaves_rewards_to_the_caller() {
    let runtime = common::runtime_with(&["meadow", "forest"], HookRegistry::without_rewards());
    let (session, _) = runtime.start_session(&alice(), None, None).unwrap();

    let update = runtime.submit_attack(session, &alice(), "Slash").unwrap();

    assert_eq!(update.gold(), 10);
    assert_eq!(runtime.shop().balance(&alice()).unwrap(), 100);
}

struct FailingStore;

impl SessionHook for FailingStore {
    fn name(&self) -> &'static str {
        "failing_store"
    }

    fn priority(&self) -> i32 {
        -50
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Critical
    }

    fn should_trigger(&self, ctx: &HookContext<'_>) -> bool {
        ctx.update.changed_hp() && ctx.session.nonce > 1
    }

    fn execute(&self, _ctx: &HookContext<'_>) -> Result<()> {
        Err(RepositoryError::CorruptedData("disk full".into()).into())
    }
}

#[test]
fn critical_hook_failure_rolls_the_operation_back() {
    let hooks = HookRegistry::new(vec![
        Arc::new(PersistPlayerHook) as Arc<dyn SessionHook>,
        Arc::new(FailingStore),
        Arc::new(combat_runtime::RewardLedgerHook),
    ]);
    let runtime = common::runtime_with(&["meadow"], hooks);
    let (session, _) = runtime.start_session(&alice(), None, None).unwrap();
    let before = runtime.snapshot(session).unwrap();

    let error = runtime.submit_attack(session, &alice(), "Slash").unwrap_err();

    assert!(matches!(error, RuntimeError::Repository(_)));
    assert_eq!(runtime.snapshot(session).unwrap(), before);
    assert_eq!(runtime.shop().balance(&alice()).unwrap(), 100);
}

#[test]
fn rollback_restores_the_persisted_hp() {
    let hooks = HookRegistry::new(vec![
        Arc::new(PersistPlayerHook) as Arc<dyn SessionHook>,
        Arc::new(FailingStore),
    ]);
    let (runtime, store) = common::runtime_with_store(&["forest"], hooks);
    let (session, update) = runtime.start_session(&alice(), None, None).unwrap();
    assert_eq!(update.snapshot.phase, SessionPhase::ResolvingEnemyAttack);

    let error = runtime.resolve_enemy_turn(session, &alice()).unwrap_err();

    assert!(matches!(error, RuntimeError::Repository(_)));
    assert_eq!(runtime.snapshot(session).unwrap().player.hp, 100);
    let stored = store.load(&alice()).unwrap().unwrap();
    assert_eq!(stored.stats.hp, 100);
}

/// Tries to submit again while the runtime still holds the session lock.
struct Reentrant {
    runtime: OnceLock<Runtime>,
    seen: Mutex<Vec<String>>,
}

impl SessionHook for Reentrant {
    fn name(&self) -> &'static str {
        "reentrant"
    }

    fn should_trigger(&self, ctx: &HookContext<'_>) -> bool {
        ctx.session.nonce > 1
    }

    fn execute(&self, ctx: &HookContext<'_>) -> Result<()> {
        if let Some(runtime) = self.runtime.get() {
            let result = runtime.submit_attack(ctx.session_id, ctx.player(), "Slash");
            let code = match result {
                Err(RuntimeError::SessionBusy { .. }) => "busy".to_string(),
                other => format!("{other:?}"),
            };
            self.seen.lock().unwrap().push(code);
        }
        Ok(())
    }
}

#[test]
fn second_submission_while_resolving_is_busy() {
    let reentrant = Arc::new(Reentrant {
        runtime: OnceLock::new(),
        seen: Mutex::new(Vec::new()),
    });
    let hooks = HookRegistry::new(vec![
        Arc::new(PersistPlayerHook) as Arc<dyn SessionHook>,
        Arc::clone(&reentrant) as Arc<dyn SessionHook>,
    ]);
    let runtime = common::runtime_with(&["meadow"], hooks);
    let _ = reentrant.runtime.set(runtime.clone());

    let (session, _) = runtime.start_session(&alice(), None, None).unwrap();
    let update = runtime.submit_attack(session, &alice(), "Slash").unwrap();

    assert_eq!(update.snapshot.enemies_defeated, 1);
    assert_eq!(*reentrant.seen.lock().unwrap(), vec!["busy".to_string()]);
}

#[tokio::test]
async fn scripted_commands_drive_a_whole_run() {
    let runtime = common::runtime();
    let (session, _) = runtime.start_session(&alice(), None, None).unwrap();
    let provider = ScriptedCommands::new([
        PlayerCommand::Attack("Slash".into()),
        PlayerCommand::Attack("Slash".into()),
        PlayerCommand::Buy("potion".into()),
        PlayerCommand::Continue,
        PlayerCommand::Continue,
        PlayerCommand::Attack("Slash".into()),
    ]);

    let mut last = None;
    for _ in 0..6 {
        last = Some(runtime.step(session, &alice(), &provider).await.unwrap());
    }

    match last {
        Some(StepOutcome::Update(update)) => {
            assert_eq!(update.outcome, Some(Outcome::PlayerVictoryAllRegions));
        }
        other => panic!("unexpected step result {other:?}"),
    }
    assert_eq!(
        runtime.shop().inventory(&alice()).unwrap(),
        vec!["potion".to_string()]
    );
    assert!(matches!(
        runtime.step(session, &alice(), &provider).await,
        Err(RuntimeError::SessionNotFound { .. })
    ));
}

#[test]
fn run_with_an_empty_later_region_never_starts() {
    let runtime = common::runtime_with(&["meadow", "ruins"], HookRegistry::default_hooks());

    let error = runtime.start_session(&alice(), None, None).unwrap_err();

    assert!(matches!(
        error,
        RuntimeError::Engine(EngineError::NoEnemiesAvailable { ref region }) if region.as_str() == "ruins"
    ));
    assert_eq!(runtime.active_sessions(), 0);
}
