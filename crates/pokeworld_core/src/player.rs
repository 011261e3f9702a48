use serde::{Deserialize, Serialize};

use crate::generator::CreatureRecord;
use crate::geo::Coordinate;
use crate::ledger::Ledger;

/// The only mutable aggregate of a game. Owned by the session; every change
/// goes through the ledger, capture or battle contracts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    ledger: Ledger,
    collected: Vec<CreatureRecord>,
    location: Coordinate,
}

impl PlayerState {
    pub fn new(ledger: Ledger, location: Coordinate) -> Self {
        Self {
            ledger,
            collected: Vec::new(),
            location,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub(crate) fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    pub fn collected(&self) -> &[CreatureRecord] {
        &self.collected
    }

    pub fn location(&self) -> Coordinate {
        self.location
    }

    pub(crate) fn set_location(&mut self, location: Coordinate) {
        self.location = location;
    }

    /// The collection only grows.
    pub(crate) fn collect(&mut self, creature: CreatureRecord) {
        self.collected.push(creature);
    }
}
