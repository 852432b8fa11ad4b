//! Interactive single-player loop.

use std::time::Duration;

use anyhow::{Result, bail};
use combat_bootstrap::RuntimeSetup;
use combat_core::{CombatError, Outcome, PlayerId, SessionPhase, SessionUpdate};
use combat_runtime::{Runtime, RuntimeError, SessionId, StepOutcome};

use crate::input::StdinCommands;
use crate::render;

const LOCAL_PLAYER: &str = "local";

/// Pause before a faster enemy strikes, so the log reads like a fight.
const ENEMY_DELAY: Duration = Duration::from_millis(800);

pub async fn run(setup: RuntimeSetup) -> Result<()> {
    let RuntimeSetup {
        config, runtime, ..
    } = setup;
    let player = PlayerId::from(LOCAL_PLAYER);
    let input = StdinCommands::new();

    if !ensure_character(&runtime, &player, &input).await? {
        return Ok(());
    }

    let (session, update) = runtime.start_session(&player, config.regions, config.enemies)?;
    tracing::info!(session = %session, "run started");
    let mut last = show(&runtime, &player, &update)?;

    let outcome = loop {
        let view = runtime.snapshot(session)?;
        render::status(&view);

        let step = if view.phase == SessionPhase::ResolvingEnemyAttack {
            tokio::time::sleep(ENEMY_DELAY).await;
            runtime
                .resolve_enemy_turn(session, &player)
                .map(StepOutcome::Update)
        } else {
            runtime.step(session, &player, &input).await
        };

        match step {
            Ok(StepOutcome::Update(update)) => {
                last = show(&runtime, &player, &update)?;
                if let Some(outcome) = update.outcome {
                    break Some(outcome);
                }
            }
            Ok(StepOutcome::Purchased(purchase)) => {
                println!(
                    "  Bought {}. Balance: {} gold",
                    purchase.item.name, purchase.balance
                );
            }
            Ok(StepOutcome::ItemUsed(effects)) => render::lines(effects),
            Ok(StepOutcome::Abandoned) => break None,
            Err(error) => retry_or_bail(error)?,
        }
    };

    summary(&runtime, &player, session, outcome, last)
}

/// Creates the local character on first launch and revives a fallen one.
///
/// Returns `false` when input ended before a character was chosen.
async fn ensure_character(
    runtime: &Runtime,
    player: &PlayerId,
    input: &StdinCommands,
) -> Result<bool> {
    let characters = runtime.characters();

    if characters.has_character(player) {
        let record = characters.character(player)?;
        if !record.stats.is_alive() {
            let record = characters.revive(player)?;
            println!("{} rises again at full health.", record.stats.name);
        }
        return Ok(true);
    }

    println!("Choose a character:");
    for template in characters.roster() {
        println!(
            "  {:<12} {}",
            template.name(),
            template.description.as_deref().unwrap_or(&template.race)
        );
    }

    loop {
        let Some(name) = input.read_line().await else {
            return Ok(false);
        };
        match characters.create(player, name.trim()) {
            Ok(record) => {
                println!(
                    "{} the {} joins. Balance: {} gold",
                    record.stats.name,
                    record.race,
                    runtime.shop().balance(player)?
                );
                return Ok(true);
            }
            Err(error) => retry_or_bail(error)?,
        }
    }
}

/// Prints an update and, when the shop just opened, the catalog.
///
/// Returns the update so the summary can report the final state.
fn show(runtime: &Runtime, player: &PlayerId, update: &SessionUpdate) -> Result<SessionUpdate> {
    render::lines(update.log());
    if update.snapshot.phase == SessionPhase::AdvancingRegion {
        let shop = runtime.shop();
        render::shop(
            shop.catalog(),
            shop.balance(player)?,
            &shop.inventory(player)?,
        );
    }
    Ok(update.clone())
}

fn retry_or_bail(error: RuntimeError) -> Result<()> {
    if error.severity().is_recoverable() {
        tracing::debug!(code = error.error_code(), %error, "command rejected");
        println!("  {error}");
        return Ok(());
    }
    tracing::error!(code = error.error_code(), %error, "run aborted");
    bail!(error)
}

fn summary(
    runtime: &Runtime,
    player: &PlayerId,
    session: SessionId,
    outcome: Option<Outcome>,
    last: SessionUpdate,
) -> Result<()> {
    let view = last.snapshot;
    println!();
    match outcome {
        Some(Outcome::PlayerVictoryAllRegions) => println!("== Victory =="),
        Some(Outcome::PlayerDefeated) => println!("== Defeat =="),
        _ => println!("== Run abandoned =="),
    }
    println!(
        "  {} enemies defeated, {} gold earned, {}/{} hp left",
        view.enemies_defeated, view.gold_earned, view.player.hp, view.player.hp_max
    );
    println!("  Balance: {} gold", runtime.shop().balance(player)?);
    tracing::info!(session = %session, ?outcome, "run finished");
    Ok(())
}
