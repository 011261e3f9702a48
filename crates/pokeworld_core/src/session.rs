//! Session controller.
//!
//! Owns the [`PlayerState`], the nearby sets of the current generation cycle
//! and at most one active encounter. Hosts forward intents here and read
//! back state, notifications and snapshots.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::battle::{AttackOutcome, BattleId, BattleSession, CounterOutcome};
use crate::capture::{attempt_capture, CaptureOutcome, CaptureSession};
use crate::catalog::CatalogLookup;
use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use crate::generator::{generate_creatures, generate_trainers, CreatureRecord, TrainerRecord};
use crate::geo::Coordinate;
use crate::ledger::{ItemKind, Ledger};
use crate::location::LocationSource;
use crate::notify::{Notification, NotificationKind, Notifier};
use crate::player::PlayerState;
use crate::rng::RandomSource;
use crate::schedule::{duration_ms, ScheduledTask, Scheduler, TaskKind};
use crate::snapshot::SessionSnapshot;

#[derive(Debug, Clone, PartialEq)]
pub enum Encounter {
    Idle,
    Capture(CaptureSession),
    Battle(BattleSession),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Map,
    Capture,
    Battle,
}

#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    player: PlayerState,
    nearby_creatures: Vec<CreatureRecord>,
    nearby_trainers: Vec<TrainerRecord>,
    encounter: Encounter,
    scheduler: Scheduler,
    notifier: Notifier,
    next_battle: u64,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        let ledger = Ledger::new(
            config.economy.starting_currency,
            config.economy.starting_inventory,
        );
        let player = PlayerState::new(ledger, config.world.default_location);
        let notifier = Notifier::new(config.timing.notification_display());
        Self {
            config,
            player,
            nearby_creatures: Vec::new(),
            nearby_trainers: Vec::new(),
            encounter: Encounter::Idle,
            scheduler: Scheduler::default(),
            notifier,
            next_battle: 1,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn nearby_creatures(&self) -> &[CreatureRecord] {
        &self.nearby_creatures
    }

    pub fn nearby_trainers(&self) -> &[TrainerRecord] {
        &self.nearby_trainers
    }

    pub fn encounter(&self) -> &Encounter {
        &self.encounter
    }

    pub fn screen(&self) -> Screen {
        match self.encounter {
            Encounter::Idle => Screen::Map,
            Encounter::Capture(_) => Screen::Capture,
            Encounter::Battle(_) => Screen::Battle,
        }
    }

    pub fn capture(&self) -> Option<&CaptureSession> {
        match &self.encounter {
            Encounter::Capture(capture) => Some(capture),
            _ => None,
        }
    }

    pub fn battle(&self) -> Option<&BattleSession> {
        match &self.encounter {
            Encounter::Battle(battle) => Some(battle),
            _ => None,
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn pending_tasks(&self) -> &[ScheduledTask] {
        self.scheduler.pending()
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.scheduler.next_due_ms()
    }

    /// The message currently on display, if it has not expired.
    pub fn notification(&self) -> Option<&Notification> {
        self.notifier.current(self.scheduler.now_ms())
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifier.drain()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::from_session(self)
    }

    /// Applies a one-shot position fix, falling back to the configured
    /// default when the source has none.
    pub async fn locate(&mut self, source: &dyn LocationSource) -> Coordinate {
        let location = match source.current_coordinate().await {
            Ok(location) => {
                info!(target: "pokeworld.session", lat = location.lat, lng = location.lng, "location acquired");
                location
            }
            Err(err) => {
                let fallback = self.config.world.default_location;
                warn!(target: "pokeworld.session", error = %err, lat = fallback.lat, lng = fallback.lng, "using default location");
                fallback
            }
        };
        self.player.set_location(location);
        location
    }

    pub fn set_location(&mut self, location: Coordinate) {
        self.player.set_location(location);
    }

    /// Map-only intent; the engine state is untouched.
    pub fn recenter(&self) -> Coordinate {
        self.player.location()
    }

    /// Runs a generation cycle around the player and replaces both nearby sets.
    /// Refused while an encounter is open, since the encounter refers to the
    /// current cycle's records.
    pub async fn refresh_nearby<R: RandomSource + ?Sized>(
        &mut self,
        catalog: Arc<dyn CatalogLookup>,
        rng: &mut R,
    ) -> GameResult<()> {
        self.ensure_idle("refresh")?;
        let center = self.player.location();
        let generator = self.config.creature_generator();
        let creatures = generate_creatures(
            &generator,
            center,
            self.config.world.creature_count,
            catalog,
            rng,
        )
        .await;
        let trainers = generate_trainers(
            center,
            self.config.world.trainer_count,
            &self.config.world.trainer_names,
            self.config.world.trainer_spread,
            rng,
        );
        self.replace_nearby(creatures, trainers)
    }

    pub fn replace_nearby(
        &mut self,
        creatures: Vec<CreatureRecord>,
        trainers: Vec<TrainerRecord>,
    ) -> GameResult<()> {
        self.ensure_idle("replace")?;
        self.nearby_creatures = creatures;
        self.nearby_trainers = trainers;
        Ok(())
    }

    /// Opens a capture on the nearby creature with record id `creature_id`,
    /// replacing any capture already open. Refused during a battle.
    pub fn select_creature(&mut self, creature_id: u32) -> GameResult<()> {
        if matches!(self.encounter, Encounter::Battle(_)) {
            debug!(target: "pokeworld.session", creature_id, "creature selection ignored during battle");
            return Err(GameError::SessionBusy);
        }
        let target = self
            .nearby_creatures
            .iter()
            .find(|creature| creature.id == creature_id)
            .cloned()
            .ok_or(GameError::UnknownCreature(creature_id))?;
        info!(target: "pokeworld.session", creature = %target.name, distance = target.distance_meters, "capture opened");
        self.encounter = Encounter::Capture(CaptureSession::new(target));
        Ok(())
    }

    pub fn select_trainer(&mut self, trainer_id: u32) -> GameResult<BattleId> {
        if self.encounter != Encounter::Idle {
            debug!(target: "pokeworld.session", trainer_id, "trainer selection ignored; encounter active");
            return Err(GameError::SessionBusy);
        }
        let opponent = self
            .nearby_trainers
            .iter()
            .find(|trainer| trainer.id == trainer_id)
            .cloned()
            .ok_or(GameError::UnknownTrainer(trainer_id))?;
        let id = BattleId(self.next_battle);
        self.next_battle += 1;
        info!(target: "pokeworld.session", battle = %id, opponent = %opponent.name, level = opponent.level, "battle started");
        self.encounter = Encounter::Battle(BattleSession::new(id, opponent));
        Ok(id)
    }

    pub fn attempt_capture<R: RandomSource + ?Sized>(
        &mut self,
        item: ItemKind,
        rng: &mut R,
    ) -> GameResult<CaptureOutcome> {
        let Encounter::Capture(capture) = &self.encounter else {
            debug!(target: "pokeworld.session", %item, "throw ignored; no capture open");
            return Err(GameError::NoActiveCapture);
        };
        let capture = capture.clone();

        let outcome = match attempt_capture(&mut self.player, Some(&capture), item, rng) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.notify_error(&err);
                return Err(err);
            }
        };

        let target = capture.target();
        if outcome.success {
            if let Some(idx) = self
                .nearby_creatures
                .iter()
                .position(|creature| creature.id == target.id)
            {
                self.nearby_creatures.remove(idx);
            }
            self.encounter = Encounter::Idle;
            self.post(
                NotificationKind::CaptureSuccess,
                format!("You caught {}!", target.name),
            );
        } else {
            self.post(
                NotificationKind::CaptureFailure,
                format!("{} broke free!", target.name),
            );
        }
        Ok(outcome)
    }

    /// Leaves whatever encounter is open without cost or reward. Delayed
    /// transitions still pending for an abandoned battle become no-ops.
    pub fn flee(&mut self) {
        match std::mem::replace(&mut self.encounter, Encounter::Idle) {
            Encounter::Idle => {}
            Encounter::Capture(capture) => {
                info!(target: "pokeworld.session", creature = %capture.target().name, "fled capture");
            }
            Encounter::Battle(battle) => {
                info!(target: "pokeworld.session", battle = %battle.id(), "left battle");
            }
        }
    }

    pub fn attack<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> GameResult<AttackOutcome> {
        let Encounter::Battle(battle) = &mut self.encounter else {
            return Err(GameError::NoActiveBattle);
        };
        let outcome = battle.attack(self.player.ledger_mut(), rng);
        let battle_id = battle.id();
        let opponent_id = battle.opponent().id;

        match outcome {
            AttackOutcome::Ignored => {}
            AttackOutcome::Hit { .. } => {
                let delay = self.config.timing.counter_attack_delay();
                self.scheduler
                    .schedule(battle_id, TaskKind::CounterAttack, delay);
            }
            AttackOutcome::Victory { reward, .. } => {
                self.nearby_trainers.retain(|trainer| trainer.id != opponent_id);
                self.encounter = Encounter::Idle;
                self.post(NotificationKind::Victory, format!("You won ${reward}!"));
            }
        }
        Ok(outcome)
    }

    pub fn purchase(&mut self, item: ItemKind) -> GameResult<()> {
        let cost = self.config.economy.prices.price(item);
        match self.player.ledger_mut().purchase(item, cost) {
            Ok(()) => {
                self.post(
                    NotificationKind::Purchase,
                    format!("You bought 1 {item} ball!"),
                );
                Ok(())
            }
            Err(err) => {
                self.notify_error(&err);
                Err(err)
            }
        }
    }

    /// Moves the engine clock forward, firing delayed transitions in order.
    pub fn advance<R: RandomSource + ?Sized>(&mut self, elapsed: Duration, rng: &mut R) {
        let until = self.scheduler.now_ms().saturating_add(duration_ms(elapsed));
        while let Some(task) = self.scheduler.pop_due(until) {
            self.run_task(task, rng);
        }
        self.scheduler.advance_to(until);
        self.notifier.expire(until);
    }

    /// Advances until nothing is pending; returns the simulated milliseconds.
    pub fn settle<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> u64 {
        let start = self.scheduler.now_ms();
        while let Some(due) = self.scheduler.next_due_ms() {
            let wait = due.saturating_sub(self.scheduler.now_ms());
            self.advance(Duration::from_millis(wait), rng);
        }
        self.scheduler.now_ms() - start
    }

    fn run_task<R: RandomSource + ?Sized>(&mut self, task: ScheduledTask, rng: &mut R) {
        let battle = match &mut self.encounter {
            Encounter::Battle(battle) if battle.id() == task.battle => battle,
            _ => {
                debug!(target: "pokeworld.session", battle = %task.battle, kind = ?task.kind, "stale task dropped");
                return;
            }
        };

        match task.kind {
            TaskKind::CounterAttack => {
                let outcome = battle.counter_attack(rng);
                if let CounterOutcome::Defeat { .. } = outcome {
                    self.post(NotificationKind::Defeat, "You lost the battle!");
                    let delay = self.config.timing.defeat_teardown_delay();
                    self.scheduler.schedule(task.battle, TaskKind::Teardown, delay);
                }
            }
            TaskKind::Teardown => {
                info!(target: "pokeworld.session", battle = %task.battle, "battle closed");
                self.encounter = Encounter::Idle;
            }
        }
    }

    fn ensure_idle(&self, action: &'static str) -> GameResult<()> {
        if self.encounter != Encounter::Idle {
            debug!(target: "pokeworld.session", action, "nearby sets locked; encounter active");
            return Err(GameError::SessionBusy);
        }
        Ok(())
    }

    fn notify_error(&mut self, err: &GameError) {
        match err {
            GameError::InsufficientFunds { .. } => {
                self.post(NotificationKind::InsufficientFunds, "Not enough money!");
            }
            GameError::OutOfStock(item) => {
                self.post(
                    NotificationKind::OutOfStock,
                    format!("You don't have a {item} ball!"),
                );
            }
            other => {
                debug!(target: "pokeworld.session", error = %other, "intent rejected");
            }
        }
    }

    fn post(&mut self, kind: NotificationKind, message: impl Into<String>) {
        let now = self.scheduler.now_ms();
        self.notifier.post(kind, message, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::BattlePhase;
    use crate::ledger::Inventory;
    use crate::location::FixedLocation;
    use crate::rng::ScriptedRng;

    fn creature(catalog_id: u32, name: &str, d_lat: f64) -> CreatureRecord {
        CreatureRecord {
            id: catalog_id,
            catalog_id,
            name: name.into(),
            image_ref: None,
            elemental_types: Vec::new(),
            base_stats: Vec::new(),
            position: Coordinate::new(d_lat, 0.0),
            distance_meters: 0,
        }
    }

    fn trainer(id: u32, reward: u64) -> TrainerRecord {
        TrainerRecord {
            id,
            name: "Gary".into(),
            level: 20,
            reward,
            position: Coordinate::new(0.0, 0.0),
            distance_meters: 0,
        }
    }

    fn session() -> Session {
        let mut session = Session::new(GameConfig::default());
        session.replace_nearby(
            vec![creature(25, "pikachu", 0.001), creature(16, "pidgey", 0.002)],
            vec![trainer(0, 300), trainer(1, 500)],
        )
        .unwrap();
        session
    }

    #[test]
    fn starts_on_the_map_with_reference_economy() {
        let session = Session::new(GameConfig::default());
        assert_eq!(Screen::Map, session.screen());
        assert_eq!(1000, session.player().ledger().currency());
        assert_eq!(&Inventory::new(5, 0, 0), session.player().ledger().inventory());
    }

    #[test]
    fn successful_capture_returns_to_map() {
        let mut session = session();
        session.select_creature(25).unwrap();
        assert_eq!(Screen::Capture, session.screen());

        let outcome = session
            .attempt_capture(ItemKind::Basic, &mut ScriptedRng::new([0.35]))
            .unwrap();
        assert!(outcome.success);
        assert_eq!(Screen::Map, session.screen());
        assert_eq!(1, session.player().collected().len());
        assert_eq!(1, session.nearby_creatures().len());
        assert_eq!(
            NotificationKind::CaptureSuccess,
            session.notification().unwrap().kind
        );
    }

    #[test]
    fn failed_capture_keeps_capture_open() {
        let mut session = session();
        session.select_creature(25).unwrap();
        let outcome = session
            .attempt_capture(ItemKind::Basic, &mut ScriptedRng::new([0.5]))
            .unwrap();
        assert!(!outcome.success);
        assert_eq!(Screen::Capture, session.screen());
        assert_eq!(2, session.nearby_creatures().len());
        assert_eq!(4, session.player().ledger().inventory().basic);
    }

    #[test]
    fn out_of_stock_throw_is_notified_and_harmless() {
        let mut session = session();
        session.select_creature(16).unwrap();
        let err = session
            .attempt_capture(ItemKind::Great, &mut ScriptedRng::new([0.0]))
            .unwrap_err();
        assert_eq!(GameError::OutOfStock(ItemKind::Great), err);
        assert_eq!(Screen::Capture, session.screen());
        assert_eq!(NotificationKind::OutOfStock, session.notification().unwrap().kind);
    }

    #[test]
    fn throw_without_capture_is_rejected() {
        let mut session = session();
        let err = session
            .attempt_capture(ItemKind::Basic, &mut ScriptedRng::new([0.0]))
            .unwrap_err();
        assert_eq!(GameError::NoActiveCapture, err);
        assert_eq!(5, session.player().ledger().inventory().basic);
    }

    #[test]
    fn selecting_another_creature_replaces_capture() {
        let mut session = session();
        session.select_creature(25).unwrap();
        session.select_creature(16).unwrap();
        assert_eq!("pidgey", session.capture().unwrap().target().name);
        assert_eq!(Err(GameError::UnknownCreature(1)), session.select_creature(1));
    }

    #[test]
    fn flee_ends_capture_without_cost() {
        let mut session = session();
        session.select_creature(25).unwrap();
        session.flee();
        assert_eq!(Screen::Map, session.screen());
        assert_eq!(5, session.player().ledger().inventory().basic);
        assert_eq!(2, session.nearby_creatures().len());
    }

    #[test]
    fn only_one_encounter_at_a_time() {
        let mut session = session();
        session.select_trainer(0).unwrap();
        assert_eq!(Err(GameError::SessionBusy), session.select_trainer(1));
        assert_eq!(Err(GameError::SessionBusy), session.select_creature(25));
        assert_eq!(0, session.battle().unwrap().opponent().id);
    }

    #[test]
    fn counter_attack_is_a_separate_delayed_transition() {
        let mut session = session();
        session.select_trainer(0).unwrap();
        let mut rng = ScriptedRng::new([0.5, 0.0]);
        session.attack(&mut rng).unwrap();
        let battle = session.battle().unwrap();
        assert_eq!(BattlePhase::OpponentTurn, battle.phase());
        assert_eq!(65, battle.opponent_health());
        assert_eq!(100, battle.player_health());

        assert_eq!(Ok(AttackOutcome::Ignored), session.attack(&mut rng));

        session.advance(Duration::from_millis(1499), &mut rng);
        assert_eq!(BattlePhase::OpponentTurn, session.battle().unwrap().phase());
        session.advance(Duration::from_millis(1), &mut rng);
        let battle = session.battle().unwrap();
        assert_eq!(BattlePhase::PlayerTurn, battle.phase());
        assert_eq!(85, battle.player_health());
    }

    #[test]
    fn victory_removes_trainer_and_pays() {
        let mut session = session();
        session.select_trainer(1).unwrap();
        // 49 per attack, 15 per counter
        let mut rng = ScriptedRng::new([0.999_999, 0.0, 0.999_999, 0.0, 0.999_999]);
        for _ in 0..3 {
            session.attack(&mut rng).unwrap();
            session.settle(&mut rng);
        }
        assert_eq!(Screen::Map, session.screen());
        assert_eq!(1500, session.player().ledger().currency());
        assert!(session.nearby_trainers().iter().all(|t| t.id != 1));
        assert_eq!("You won $500!", session.notification().unwrap().message);
    }

    #[test]
    fn nearby_sets_are_locked_during_a_battle() {
        let mut session = session();
        session.select_trainer(0).unwrap();
        let mut dawn = trainer(0, 900);
        dawn.name = "Dawn".into();
        assert_eq!(
            Err(GameError::SessionBusy),
            session.replace_nearby(Vec::new(), vec![dawn, trainer(1, 500)])
        );

        // 49 per attack, 15 per counter
        let mut rng = ScriptedRng::new([0.999_999, 0.0, 0.999_999, 0.0, 0.999_999]);
        for _ in 0..3 {
            session.attack(&mut rng).unwrap();
            session.settle(&mut rng);
        }
        assert_eq!(1300, session.player().ledger().currency());
        let left: Vec<(u32, u64)> = session
            .nearby_trainers()
            .iter()
            .map(|t| (t.id, t.reward))
            .collect();
        assert_eq!(vec![(1, 500)], left);
        assert_eq!(2, session.nearby_creatures().len());

        session
            .replace_nearby(Vec::new(), vec![trainer(0, 900)])
            .unwrap();
        assert_eq!(1, session.nearby_trainers().len());
    }

    #[tokio::test]
    async fn refresh_is_refused_while_capturing() {
        let catalog: Arc<dyn CatalogLookup> =
            Arc::new(crate::catalog::StaticCatalog::first_generation().unwrap());
        let mut session = session();
        session.select_creature(25).unwrap();
        let mut rng = ScriptedRng::new([0.5]);
        assert_eq!(
            Err(GameError::SessionBusy),
            session.refresh_nearby(Arc::clone(&catalog), &mut rng).await
        );
        assert_eq!(2, session.nearby_creatures().len());
        assert_eq!(1, rng.remaining());

        session.flee();
        session.refresh_nearby(catalog, &mut rng).await.unwrap();
        assert_eq!(5, session.nearby_creatures().len());
        assert_eq!(3, session.nearby_trainers().len());
    }

    #[test]
    fn duplicate_species_are_selected_by_record_id() {
        let mut session = Session::new(GameConfig::default());
        let near = CreatureRecord {
            id: 0,
            distance_meters: 111,
            ..creature(25, "pikachu", 0.001)
        };
        let far = CreatureRecord {
            id: 1,
            distance_meters: 400,
            ..creature(25, "pikachu", 0.0036)
        };
        session.replace_nearby(vec![near, far], Vec::new()).unwrap();

        session.select_creature(1).unwrap();
        assert_eq!(400, session.capture().unwrap().target().distance_meters);
        session
            .attempt_capture(ItemKind::Basic, &mut ScriptedRng::new([0.1]))
            .unwrap();

        let left: Vec<(u32, u32)> = session
            .nearby_creatures()
            .iter()
            .map(|c| (c.id, c.distance_meters))
            .collect();
        assert_eq!(vec![(0, 111)], left);
        assert_eq!(400, session.player().collected()[0].distance_meters);
        session.select_creature(0).unwrap();
        assert_eq!(111, session.capture().unwrap().target().distance_meters);
    }

    #[test]
    fn defeat_blocks_attacks_until_teardown() {
        let mut session = session();
        session.select_trainer(0).unwrap();
        // player deals 20, opponent deals 39
        let mut rng = ScriptedRng::new([0.0, 0.999_999, 0.0, 0.999_999, 0.0, 0.999_999]);
        for _ in 0..3 {
            session.attack(&mut rng).unwrap();
            session.advance(Duration::from_millis(1500), &mut rng);
        }
        let battle = session.battle().unwrap();
        assert_eq!(BattlePhase::Defeat, battle.phase());
        assert_eq!(0, battle.player_health());
        assert_eq!(Ok(AttackOutcome::Ignored), session.attack(&mut rng));

        session.advance(Duration::from_millis(1999), &mut rng);
        assert_eq!(Screen::Battle, session.screen());
        session.advance(Duration::from_millis(1), &mut rng);
        assert_eq!(Screen::Map, session.screen());
        assert_eq!(1000, session.player().ledger().currency());
        assert_eq!(2, session.nearby_trainers().len());
    }

    #[test]
    fn stale_counter_attack_is_dropped() {
        let mut session = session();
        session.select_trainer(0).unwrap();
        let mut rng = ScriptedRng::new([0.5, 0.0]);
        session.attack(&mut rng).unwrap();
        session.flee();
        let rematch = session.select_trainer(0).unwrap();

        session.advance(Duration::from_millis(5000), &mut rng);
        let battle = session.battle().unwrap();
        assert_eq!(rematch, battle.id());
        assert_eq!(BattlePhase::PlayerTurn, battle.phase());
        assert_eq!(100, battle.player_health());
        assert!(session.pending_tasks().is_empty());
    }

    #[test]
    fn attack_without_battle_is_rejected() {
        let mut session = session();
        assert_eq!(
            Err(GameError::NoActiveBattle),
            session.attack(&mut ScriptedRng::new([0.0]))
        );
    }

    #[test]
    fn purchase_uses_price_table() {
        let mut session = session();
        session.purchase(ItemKind::Ultra).unwrap();
        assert_eq!(400, session.player().ledger().currency());
        assert_eq!(1, session.player().ledger().inventory().ultra);

        let err = session.purchase(ItemKind::Ultra).unwrap_err();
        assert!(matches!(err, GameError::InsufficientFunds { .. }));
        assert_eq!(400, session.player().ledger().currency());
        assert_eq!(
            NotificationKind::InsufficientFunds,
            session.notification().unwrap().kind
        );
    }

    #[test]
    fn notifications_expire() {
        let mut session = session();
        session.purchase(ItemKind::Basic).unwrap();
        let mut rng = ScriptedRng::default();
        session.advance(Duration::from_millis(2999), &mut rng);
        assert!(session.notification().is_some());
        session.advance(Duration::from_millis(1), &mut rng);
        assert!(session.notification().is_none());
        assert_eq!(1, session.take_notifications().len());
    }

    #[tokio::test]
    async fn missing_fix_falls_back_to_default() {
        let mut session = Session::new(GameConfig::default());
        session.set_location(Coordinate::new(1.0, 1.0));
        let location = session.locate(&FixedLocation::unavailable()).await;
        assert_eq!(GameConfig::default().world.default_location, location);
        assert_eq!(location, session.recenter());

        let fix = Coordinate::new(40.4168, -3.7038);
        assert_eq!(fix, session.locate(&FixedLocation::new(fix)).await);
        assert_eq!(fix, session.player().location());
    }
}
