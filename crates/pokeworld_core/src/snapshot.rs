use serde::{Deserialize, Serialize};

use crate::battle::BattleSession;
use crate::generator::{CreatureRecord, TrainerRecord};
use crate::geo::Coordinate;
use crate::ledger::Inventory;
use crate::notify::Notification;
use crate::session::{Screen, Session};

/// Everything a presentation shell needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub now_ms: u64,
    pub screen: Screen,
    pub currency: u64,
    pub inventory: Inventory,
    pub location: Coordinate,
    pub collected: Vec<CreatureRecord>,
    pub nearby_creatures: Vec<CreatureRecord>,
    pub nearby_trainers: Vec<TrainerRecord>,
    pub capture_target: Option<CreatureRecord>,
    pub battle: Option<BattleSession>,
    pub notification: Option<Notification>,
}

impl SessionSnapshot {
    pub fn from_session(session: &Session) -> Self {
        let ledger = session.player().ledger();
        Self {
            now_ms: session.now_ms(),
            screen: session.screen(),
            currency: ledger.currency(),
            inventory: *ledger.inventory(),
            location: session.player().location(),
            collected: session.player().collected().to_vec(),
            nearby_creatures: session.nearby_creatures().to_vec(),
            nearby_trainers: session.nearby_trainers().to_vec(),
            capture_target: session.capture().map(|capture| capture.target().clone()),
            battle: session.battle().cloned(),
            notification: session.notification().cloned(),
        }
    }
}
