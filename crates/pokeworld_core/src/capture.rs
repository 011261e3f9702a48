//! Probabilistic capture resolution.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{GameError, GameResult};
use crate::generator::CreatureRecord;
use crate::geo::Coordinate;
use crate::ledger::{Inventory, ItemKind, Ledger};
use crate::player::PlayerState;
use crate::rng::RandomSource;

/// Open while the player is trying to catch one specific creature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureSession {
    target: CreatureRecord,
}

impl CaptureSession {
    pub fn new(target: CreatureRecord) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &CreatureRecord {
        &self.target
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaptureOutcome {
    pub item: ItemKind,
    pub roll: f64,
    pub success: bool,
}

/// Spends one `item` and rolls against its capture rate.
///
/// Out of stock fails before anything changes. Otherwise the item is gone
/// regardless of the roll, and a success appends the target to the
/// player's collection.
pub fn attempt_capture<R: RandomSource + ?Sized>(
    state: &mut PlayerState,
    capture: Option<&CaptureSession>,
    item: ItemKind,
    rng: &mut R,
) -> GameResult<CaptureOutcome> {
    let capture = capture.ok_or(GameError::NoActiveCapture)?;
    state.ledger_mut().consume_item(item)?;

    let roll = rng.next_unit();
    let success = roll < item.capture_rate();
    debug!(target: "pokeworld.capture", %item, roll, rate = item.capture_rate(), "capture roll");
    if success {
        state.collect(capture.target().clone());
    }
    info!(
        target: "pokeworld.capture",
        creature = %capture.target().name,
        %item,
        success,
        "capture attempted"
    );
    Ok(CaptureOutcome {
        item,
        roll,
        success,
    })
}

/// Monte Carlo success rate of `item` against `target`, run through the
/// same resolver as real throws on a scratch player.
pub fn estimate_capture_rate<R: RandomSource + ?Sized>(
    target: &CreatureRecord,
    item: ItemKind,
    trials: u32,
    rng: &mut R,
) -> f64 {
    if trials == 0 {
        return 0.0;
    }
    let stock = Inventory::default().with_count(item, trials);
    let mut scratch = PlayerState::new(Ledger::new(0, stock), Coordinate::new(0.0, 0.0));
    let session = CaptureSession::new(target.clone());
    let mut successes = 0u32;
    for _ in 0..trials {
        match attempt_capture(&mut scratch, Some(&session), item, rng) {
            Ok(outcome) if outcome.success => successes += 1,
            Ok(_) => {}
            Err(_) => break,
        }
    }
    f64::from(successes) / f64::from(trials)
}
