use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::generator::CreatureGenerator;
use crate::geo::Coordinate;
use crate::ledger::{Inventory, ItemKind};
use crate::rng::DEFAULT_SEED;

pub const SEED_ENV: &str = "POKEWORLD_SEED";

/// Every section is optional; omitted values match the reference game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub simulation: SimulationConfig,
    pub world: WorldConfig,
    pub economy: EconomyConfig,
    pub timing: TimingConfig,
    pub telemetry: TelemetryConfig,
    pub catalog: CatalogConfig,
}

impl GameConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&data).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml(data: &str) -> Result<Self> {
        let cfg: GameConfig = toml::from_str(data)?;
        Ok(cfg)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Some(seed) = std::env::var(SEED_ENV).ok().and_then(|val| val.parse().ok()) {
            self.simulation.seed = seed;
        }
        self
    }

    pub fn creature_generator(&self) -> CreatureGenerator {
        CreatureGenerator {
            catalog_size: self.world.catalog_size,
            spread: self.world.creature_spread,
            lookup_timeout: self.timing.lookup_timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { seed: DEFAULT_SEED }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub default_location: Coordinate,
    pub creature_count: usize,
    pub trainer_count: usize,
    pub trainer_names: Vec<String>,
    pub catalog_size: u32,
    pub creature_spread: f64,
    pub trainer_spread: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            default_location: Coordinate::new(-33.0246, -71.5518),
            creature_count: 5,
            trainer_count: 3,
            trainer_names: ["Ash", "Misty", "Brock", "Gary", "May", "Dawn"]
                .iter()
                .map(|name| name.to_string())
                .collect(),
            catalog_size: 151,
            creature_spread: 0.005,
            trainer_spread: 0.0075,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub starting_currency: u64,
    pub starting_inventory: Inventory,
    pub prices: PriceTable,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_currency: 1000,
            starting_inventory: Inventory::new(5, 0, 0),
            prices: PriceTable::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceTable {
    pub basic: u64,
    pub great: u64,
    pub ultra: u64,
}

impl PriceTable {
    pub fn price(&self, item: ItemKind) -> u64 {
        match item {
            ItemKind::Basic => self.basic,
            ItemKind::Great => self.great,
            ItemKind::Ultra => self.ultra,
        }
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            basic: 100,
            great: 300,
            ultra: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub counter_attack_ms: u64,
    pub defeat_teardown_ms: u64,
    pub notification_ms: u64,
    pub lookup_timeout_ms: u64,
}

impl TimingConfig {
    pub fn counter_attack_delay(&self) -> Duration {
        Duration::from_millis(self.counter_attack_ms)
    }

    pub fn defeat_teardown_delay(&self) -> Duration {
        Duration::from_millis(self.defeat_teardown_ms)
    }

    pub fn notification_display(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            counter_attack_ms: 1500,
            defeat_teardown_ms: 2000,
            notification_ms: 3000,
            lookup_timeout_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub trace_filter: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub path: Option<PathBuf>,
}
