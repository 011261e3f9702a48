//! Helpers for deterministic regression tests.

use std::time::Duration;

use pokeworld_core::battle::MAX_HEALTH;
use pokeworld_core::{
    AttackOutcome, BattlePhase, Coordinate, CreatureRecord, GameConfig, Inventory, RandomSource,
    Session, TrainerRecord,
};
use serde::Serialize;

pub use pokeworld_core::DEFAULT_SEED;

/// Upper bound on loop iterations while driving a battle.
const MAX_BATTLE_STEPS: usize = 64;

pub fn sample_creature(catalog_id: u32, name: &str) -> CreatureRecord {
    CreatureRecord {
        id: catalog_id,
        catalog_id,
        name: name.to_owned(),
        image_ref: None,
        elemental_types: vec!["normal".to_owned()],
        base_stats: Vec::new(),
        position: Coordinate::new(-33.0236, -71.5518),
        distance_meters: 111,
    }
}

pub fn sample_trainer(id: u32, reward: u64) -> TrainerRecord {
    TrainerRecord {
        id,
        name: "Misty".to_owned(),
        level: 18,
        reward,
        position: Coordinate::new(-33.0246, -71.5508),
        distance_meters: 111,
    }
}

/// Reference config with the given starting economy.
pub fn session_with(currency: u64, inventory: Inventory) -> Session {
    let mut config = GameConfig::default();
    config.economy.starting_currency = currency;
    config.economy.starting_inventory = inventory;
    Session::new(config)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BattleStep {
    pub at_ms: u64,
    pub event: &'static str,
    pub phase: BattlePhase,
    pub opponent_health: u32,
    pub player_health: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BattleTrace {
    pub opponent: u32,
    pub result: BattlePhase,
    pub reward_paid: u64,
    pub trainer_remains: bool,
    pub steps: Vec<BattleStep>,
}

/// Fights `trainer_id` to the end, letting every delayed transition fire
/// as soon as it is due. Returns `None` if the battle cannot start.
pub fn run_battle<R: RandomSource + ?Sized>(
    session: &mut Session,
    trainer_id: u32,
    rng: &mut R,
) -> Option<BattleTrace> {
    let currency_before = session.player().ledger().currency();
    session.select_trainer(trainer_id).ok()?;

    let mut steps = vec![observe(session, "start")?];
    let mut result = BattlePhase::PlayerTurn;
    let mut player_health = MAX_HEALTH;

    for _ in 0..MAX_BATTLE_STEPS {
        if session.battle().is_none() {
            break;
        }
        match session.attack(rng).ok()? {
            AttackOutcome::Victory { .. } => {
                result = BattlePhase::Victory;
                steps.push(BattleStep {
                    at_ms: session.now_ms(),
                    event: "attack",
                    phase: BattlePhase::Victory,
                    opponent_health: 0,
                    player_health,
                });
                break;
            }
            AttackOutcome::Hit { .. } => steps.extend(observe(session, "attack")),
            AttackOutcome::Ignored => {}
        }

        while let Some(due) = session.next_due_ms() {
            session.advance(Duration::from_millis(due - session.now_ms()), rng);
            match observe(session, "counter") {
                Some(step) => {
                    player_health = step.player_health;
                    if step.phase == BattlePhase::Defeat {
                        result = BattlePhase::Defeat;
                    }
                    steps.push(step);
                }
                None => steps.push(BattleStep {
                    at_ms: session.now_ms(),
                    event: "teardown",
                    phase: result,
                    opponent_health: steps.last().map_or(0, |step| step.opponent_health),
                    player_health,
                }),
            }
        }
    }

    Some(BattleTrace {
        opponent: trainer_id,
        result,
        reward_paid: session.player().ledger().currency() - currency_before,
        trainer_remains: session
            .nearby_trainers()
            .iter()
            .any(|trainer| trainer.id == trainer_id),
        steps,
    })
}

fn observe(session: &Session, event: &'static str) -> Option<BattleStep> {
    let battle = session.battle()?;
    Some(BattleStep {
        at_ms: session.now_ms(),
        event,
        phase: battle.phase(),
        opponent_health: battle.opponent_health(),
        player_health: battle.player_health(),
    })
}
