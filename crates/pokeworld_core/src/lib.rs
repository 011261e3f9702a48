//! Game-state engine for a location-based creature collecting game.
//!
//! The engine never renders or fetches anything on its own. Hosts feed it
//! catalog and location capabilities, forward player intents into a
//! [`Session`], and render the resulting [`SessionSnapshot`].

pub mod battle;
pub mod capture;
pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod geo;
pub mod ledger;
pub mod location;
pub mod notify;
pub mod player;
pub mod rng;
pub mod schedule;
pub mod session;
pub mod snapshot;

pub use battle::{AttackOutcome, BattleId, BattlePhase, BattleSession, CounterOutcome};
pub use capture::{attempt_capture, estimate_capture_rate, CaptureOutcome, CaptureSession};
pub use catalog::{CatalogLookup, CreatureData, StatEntry, StaticCatalog};
pub use config::{
    CatalogConfig, EconomyConfig, GameConfig, PriceTable, SimulationConfig, TelemetryConfig,
    TimingConfig, WorldConfig,
};
pub use error::{CatalogError, GameError, GameResult, LocationError};
pub use generator::{
    generate_creatures, generate_trainers, Candidate, CreatureGenerator, CreatureRecord,
    TrainerRecord,
};
pub use geo::{planar_distance_meters, Coordinate};
pub use ledger::{Inventory, ItemKind, Ledger};
pub use location::{FixedLocation, LocationSource};
pub use notify::{Notification, NotificationKind};
pub use player::PlayerState;
pub use rng::{RandomSource, ScriptedRng, SimulationRng, DEFAULT_SEED};
pub use session::{Encounter, Screen, Session};
pub use snapshot::SessionSnapshot;
