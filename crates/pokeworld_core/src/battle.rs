//! Turn-based combat against a single trainer.
//!
//! The player's attack and the opponent's counter-attack are separate
//! transitions so a shell can render the state between them.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::generator::TrainerRecord;
use crate::ledger::Ledger;
use crate::rng::RandomSource;

pub const MAX_HEALTH: u32 = 100;
pub const PLAYER_DAMAGE: RangeInclusive<u32> = 20..=49;
pub const OPPONENT_DAMAGE: RangeInclusive<u32> = 15..=39;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BattleId(pub u64);

impl fmt::Display for BattleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "battle#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattlePhase {
    PlayerTurn,
    OpponentTurn,
    Victory,
    Defeat,
}

impl BattlePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, BattlePhase::Victory | BattlePhase::Defeat)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum AttackOutcome {
    /// Not the player's turn; nothing happened.
    Ignored,
    Hit { damage: u32, opponent_health: u32 },
    Victory { damage: u32, reward: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum CounterOutcome {
    Ignored,
    Hit { damage: u32, player_health: u32 },
    Defeat { damage: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleSession {
    id: BattleId,
    opponent: TrainerRecord,
    opponent_health: u32,
    player_health: u32,
    phase: BattlePhase,
}

impl BattleSession {
    pub fn new(id: BattleId, opponent: TrainerRecord) -> Self {
        Self {
            id,
            opponent,
            opponent_health: MAX_HEALTH,
            player_health: MAX_HEALTH,
            phase: BattlePhase::PlayerTurn,
        }
    }

    pub fn id(&self) -> BattleId {
        self.id
    }

    pub fn opponent(&self) -> &TrainerRecord {
        &self.opponent
    }

    pub fn opponent_health(&self) -> u32 {
        self.opponent_health
    }

    pub fn player_health(&self) -> u32 {
        self.player_health
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Player action. Knocking the opponent out settles the reward into
    /// `ledger` immediately and skips the counter-attack.
    pub fn attack<R: RandomSource + ?Sized>(&mut self, ledger: &mut Ledger, rng: &mut R) -> AttackOutcome {
        if self.phase != BattlePhase::PlayerTurn {
            debug!(target: "pokeworld.battle", battle = %self.id, phase = ?self.phase, "attack ignored");
            return AttackOutcome::Ignored;
        }

        let damage = rng.roll(PLAYER_DAMAGE);
        self.opponent_health = self.opponent_health.saturating_sub(damage);
        debug!(target: "pokeworld.battle", battle = %self.id, damage, health = self.opponent_health, "player hit");

        if self.opponent_health == 0 {
            self.phase = BattlePhase::Victory;
            ledger.credit(self.opponent.reward);
            info!(
                target: "pokeworld.battle",
                battle = %self.id,
                opponent = %self.opponent.name,
                reward = self.opponent.reward,
                "battle won"
            );
            return AttackOutcome::Victory {
                damage,
                reward: self.opponent.reward,
            };
        }

        self.phase = BattlePhase::OpponentTurn;
        AttackOutcome::Hit {
            damage,
            opponent_health: self.opponent_health,
        }
    }

    /// The opponent's delayed reply. Only meaningful during its turn.
    pub fn counter_attack<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> CounterOutcome {
        if self.phase != BattlePhase::OpponentTurn {
            debug!(target: "pokeworld.battle", battle = %self.id, phase = ?self.phase, "counter-attack ignored");
            return CounterOutcome::Ignored;
        }

        let damage = rng.roll(OPPONENT_DAMAGE);
        self.player_health = self.player_health.saturating_sub(damage);
        debug!(target: "pokeworld.battle", battle = %self.id, damage, health = self.player_health, "opponent hit");

        if self.player_health == 0 {
            self.phase = BattlePhase::Defeat;
            info!(target: "pokeworld.battle", battle = %self.id, opponent = %self.opponent.name, "battle lost");
            return CounterOutcome::Defeat { damage };
        }

        self.phase = BattlePhase::PlayerTurn;
        CounterOutcome::Hit {
            damage,
            player_health: self.player_health,
        }
    }
}
