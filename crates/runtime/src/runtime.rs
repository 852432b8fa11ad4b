//! High-level runtime orchestrator.
//!
//! The runtime owns the running sessions, wires the engine to repositories
//! through post-update hooks, and exposes a builder-based API for clients.
//! [`Runtime`] is cheap to clone; clones share every session.

use std::sync::Arc;

use combat_core::{
    CombatEngine, CombatEnv, EngineError, PlayerId, SessionPhase, SessionRequest, SessionSnapshot,
    SessionUpdate,
};
use tokio::sync::broadcast;

use crate::api::{CommandProvider, PlayerCommand, Result, RuntimeError};
use crate::events::{Event, EventBus, SessionEvent, Topic};
use crate::hooks::{HookContext, HookRegistry, SessionHook};
use crate::oracle::OracleManager;
use crate::repository::{
    CharacterPatch, CharacterStore, CurrencyLedger, InMemoryCharacterStore, InMemoryLedger,
};
use crate::services::{CharacterService, Purchase, ShopService};
use crate::session::{SessionId, SessionManager};

/// Runtime configuration shared across sessions.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Capacity of each event bus topic.
    pub event_buffer_size: usize,
    /// Fixed seed for every session. Random per session when `None`.
    pub seed: Option<u64>,
    /// First id handed out by the session manager.
    pub first_session_id: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            seed: None,
            first_session_id: 1,
        }
    }
}

/// What a single [`Runtime::step`] did.
#[derive(Debug, Clone)]
pub enum StepOutcome {
    /// An engine operation committed.
    Update(SessionUpdate),
    /// A shop item was bought.
    Purchased(Purchase),
    /// A shop item was used; one line per effect.
    ItemUsed(Vec<String>),
    /// The player gave up; the session is gone.
    Abandoned,
}

/// Main runtime that orchestrates combat sessions.
#[derive(Clone)]
pub struct Runtime {
    config: RuntimeConfig,
    oracles: OracleManager,
    characters: Arc<dyn CharacterStore>,
    ledger: Arc<dyn CurrencyLedger>,
    sessions: Arc<SessionManager>,
    hooks: HookRegistry,
    events: EventBus,
    shop: ShopService,
    roster: CharacterService,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Starts a run for `player` using their stored character.
    ///
    /// `regions` and `enemies_per_region` fall back to the configured
    /// defaults and are clamped to the configured bounds.
    pub fn start_session(
        &self,
        player: &PlayerId,
        regions: Option<u32>,
        enemies_per_region: Option<u32>,
    ) -> Result<(SessionId, SessionUpdate)> {
        if let Some(session) = self.sessions.active_for(player) {
            return Err(RuntimeError::SessionAlreadyActive {
                player: player.clone(),
                session,
            });
        }

        let record = self
            .characters
            .load(player)?
            .ok_or_else(|| EngineError::MissingCharacter {
                player: player.clone(),
            })?;

        let config = self.oracles.config();
        let request = SessionRequest {
            player_id: player.clone(),
            player: record.stats,
            regions: config.plan_regions(regions),
            enemies_per_region: config.plan_enemies(enemies_per_region),
            seed: self.config.seed.unwrap_or_else(rand::random),
        };
        let planned = request.regions.clone();
        let seed = request.seed;

        let (combat, update) = CombatEngine::start(self.oracles.env(), request)?;
        let session = self.sessions.insert(combat.clone())?;

        let ctx = self.hook_context(session, &combat, &update);
        if let Err(error) = self.hooks.execute_hooks(&ctx) {
            self.sessions.remove(session)?;
            return Err(error);
        }

        tracing::info!(
            player = %player,
            session = %session,
            seed,
            regions = planned.len(),
            "session started"
        );
        self.events.publish(Event::Session(SessionEvent::Started {
            session,
            player: player.clone(),
            regions: planned,
        }));

        Ok((session, update))
    }

    /// Resolves one player attack and the enemy's reply.
    pub fn submit_attack(
        &self,
        session: SessionId,
        requester: &PlayerId,
        attack: &str,
    ) -> Result<SessionUpdate> {
        self.run_operation(session, |engine, env| {
            engine.submit_attack(env, requester, attack)
        })
    }

    /// Lets a faster enemy strike first.
    pub fn resolve_enemy_turn(&self, session: SessionId, requester: &PlayerId) -> Result<SessionUpdate> {
        self.run_operation(session, |engine, env| {
            engine.resolve_enemy_turn(env, requester)
        })
    }

    /// Closes the shop and moves to the next region.
    pub fn enter_next_region(&self, session: SessionId, requester: &PlayerId) -> Result<SessionUpdate> {
        self.run_operation(session, |engine, env| {
            engine.enter_next_region(env, requester)
        })
    }

    /// Drops a running session, e.g. after the caller timed out waiting for
    /// input. Hp already persisted stays as it is.
    pub fn abandon(&self, session: SessionId, requester: &PlayerId) -> Result<()> {
        self.sessions.with_session(session, |active| {
            if active.owner() != requester {
                return Err(EngineError::NotYourSession {
                    requester: requester.clone(),
                    owner: active.owner().clone(),
                }
                .into());
            }
            Ok(())
        })?;

        if self.sessions.remove(session)?.is_some() {
            tracing::info!(player = %requester, session = %session, "session abandoned");
            self.events.publish(Event::Session(SessionEvent::Abandoned {
                session,
                player: requester.clone(),
            }));
        }
        Ok(())
    }

    pub fn snapshot(&self, session: SessionId) -> Result<SessionSnapshot> {
        Ok(self.sessions.get(session)?.combat.snapshot())
    }

    pub fn active_session(&self, player: &PlayerId) -> Option<SessionId> {
        self.sessions.active_for(player)
    }

    /// Asks `provider` for the next command and executes it.
    pub async fn step(
        &self,
        session: SessionId,
        requester: &PlayerId,
        provider: &dyn CommandProvider,
    ) -> Result<StepOutcome> {
        let view = self.snapshot(session)?;
        let command = provider.next_command(&view).await?;
        tracing::debug!(player = %requester, session = %session, ?command, "command received");

        match command {
            PlayerCommand::Attack(attack) => self
                .submit_attack(session, requester, &attack)
                .map(StepOutcome::Update),
            PlayerCommand::Continue if view.phase == SessionPhase::AdvancingRegion => self
                .enter_next_region(session, requester)
                .map(StepOutcome::Update),
            PlayerCommand::Continue => self
                .resolve_enemy_turn(session, requester)
                .map(StepOutcome::Update),
            PlayerCommand::Buy(item) => self
                .shop
                .buy(session, requester, &item)
                .map(StepOutcome::Purchased),
            PlayerCommand::Use(item) => self
                .shop
                .use_item(session, requester, &item)
                .map(StepOutcome::ItemUsed),
            PlayerCommand::Abandon => self
                .abandon(session, requester)
                .map(|()| StepOutcome::Abandoned),
        }
    }

    pub fn shop(&self) -> &ShopService {
        &self.shop
    }

    pub fn characters(&self) -> &CharacterService {
        &self.roster
    }

    pub fn oracles(&self) -> &OracleManager {
        &self.oracles
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.events.subscribe(topic)
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Locks the session, applies `op`, then runs hooks on the result.
    ///
    /// A critical hook failure restores the session to its state before
    /// `op`. Sessions that reached an outcome are removed afterwards.
    fn run_operation(
        &self,
        session: SessionId,
        op: impl FnOnce(&mut CombatEngine<'_>, CombatEnv<'_>) -> std::result::Result<SessionUpdate, EngineError>,
    ) -> Result<SessionUpdate> {
        let update = self.sessions.with_session(session, |active| {
            let before = active.combat.clone();
            let update = {
                let mut engine = CombatEngine::new(&mut active.combat);
                op(&mut engine, self.oracles.env())?
            };

            let ctx = self.hook_context(session, &active.combat, &update);
            if let Err(error) = self.hooks.execute_hooks(&ctx) {
                if update.changed_hp() {
                    self.restore_stored_hp(&before);
                }
                active.combat = before;
                return Err(error);
            }

            tracing::debug!(
                player = %active.owner(),
                session = %session,
                phase = %active.combat.phase,
                player_hp = active.combat.player.hp,
                enemy_hp = active.combat.current_enemy.hp,
                "operation committed"
            );
            Ok(update)
        })?;

        if let Some(outcome) = update.outcome {
            self.sessions.remove(session)?;
            tracing::info!(
                session = %session,
                outcome = %outcome,
                gold = update.snapshot.gold_earned,
                enemies = update.snapshot.enemies_defeated,
                "session finished"
            );
        }
        Ok(update)
    }

    /// Rewrites the hp a rolled-back operation may already have persisted.
    fn restore_stored_hp(&self, before: &combat_core::CombatSession) {
        let hp = before.player.hp;
        if let Err(error) = self
            .characters
            .save(&before.player_id, CharacterPatch::hp(hp))
        {
            tracing::error!(
                player = %before.player_id,
                hp,
                %error,
                "failed to restore stored hp after rollback"
            );
        }
    }

    fn hook_context<'a>(
        &'a self,
        session: SessionId,
        combat: &'a combat_core::CombatSession,
        update: &'a SessionUpdate,
    ) -> HookContext<'a> {
        HookContext {
            session_id: session,
            session: combat,
            update,
            characters: self.characters.as_ref(),
            ledger: self.ledger.as_ref(),
            events: &self.events,
        }
    }
}

/// Builder for [`Runtime`].
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    oracles: Option<OracleManager>,
    characters: Option<Arc<dyn CharacterStore>>,
    ledger: Option<Arc<dyn CurrencyLedger>>,
    hooks: Option<HookRegistry>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            oracles: None,
            characters: None,
            ledger: None,
            hooks: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Character store. Defaults to an in-memory store.
    pub fn character_store(mut self, store: Arc<dyn CharacterStore>) -> Self {
        self.characters = Some(store);
        self
    }

    /// Currency ledger. Defaults to an in-memory ledger.
    pub fn ledger(mut self, ledger: Arc<dyn CurrencyLedger>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    /// Set custom post-update hooks.
    ///
    /// If not provided, the default hooks (PersistPlayer, RewardLedger,
    /// Broadcast) are used. Use [`HookRegistry::without_rewards`] to credit
    /// reward events yourself.
    pub fn with_hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Adds hooks to the default hook set.
    pub fn add_hooks(mut self, additional: Vec<Arc<dyn SessionHook>>) -> Self {
        use crate::hooks::{BroadcastHook, PersistPlayerHook, RewardLedgerHook};

        let mut hooks: Vec<Arc<dyn SessionHook>> = vec![
            Arc::new(PersistPlayerHook) as Arc<dyn SessionHook>,
            Arc::new(RewardLedgerHook),
            Arc::new(BroadcastHook),
        ];
        hooks.extend(additional);

        self.hooks = Some(HookRegistry::new(hooks));
        self
    }

    /// Build the runtime
    pub fn build(self) -> Result<Runtime> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;
        let characters = self
            .characters
            .unwrap_or_else(|| Arc::new(InMemoryCharacterStore::new()));
        let ledger = self
            .ledger
            .unwrap_or_else(|| Arc::new(InMemoryLedger::new()));
        let hooks = self.hooks.unwrap_or_default();
        let events = EventBus::with_capacity(self.config.event_buffer_size);
        let sessions = Arc::new(SessionManager::starting_at(self.config.first_session_id));

        let shop = ShopService::new(
            oracles.clone(),
            Arc::clone(&characters),
            Arc::clone(&ledger),
            Arc::clone(&sessions),
            events.clone(),
        );
        let roster = CharacterService::new(
            oracles.clone(),
            Arc::clone(&characters),
            Arc::clone(&ledger),
            Arc::clone(&sessions),
        );

        tracing::debug!(hooks = hooks.len(), seed = ?self.config.seed, "runtime built");

        Ok(Runtime {
            config: self.config,
            oracles,
            characters,
            ledger,
            sessions,
            hooks,
            events,
            shop,
            roster,
        })
    }
}
