//! Currency and consumable item bookkeeping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::error::{GameError, GameResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Basic,
    Great,
    Ultra,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Basic, ItemKind::Great, ItemKind::Ultra];

    /// Probability that a throw with this item captures its target.
    pub fn capture_rate(self) -> f64 {
        match self {
            ItemKind::Basic => 0.40,
            ItemKind::Great => 0.60,
            ItemKind::Ultra => 0.80,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Basic => "basic",
            ItemKind::Great => "great",
            ItemKind::Ultra => "ultra",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown item kind `{0}` (expected basic, great or ultra)")]
pub struct ParseItemKindError(String);

impl FromStr for ItemKind {
    type Err = ParseItemKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(ItemKind::Basic),
            "great" => Ok(ItemKind::Great),
            "ultra" => Ok(ItemKind::Ultra),
            other => Err(ParseItemKindError(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inventory {
    pub basic: u32,
    pub great: u32,
    pub ultra: u32,
}

impl Inventory {
    pub fn new(basic: u32, great: u32, ultra: u32) -> Self {
        Self {
            basic,
            great,
            ultra,
        }
    }

    pub fn with_count(mut self, item: ItemKind, count: u32) -> Self {
        *self.slot_mut(item) = count;
        self
    }

    pub fn count(&self, item: ItemKind) -> u32 {
        match item {
            ItemKind::Basic => self.basic,
            ItemKind::Great => self.great,
            ItemKind::Ultra => self.ultra,
        }
    }

    fn slot_mut(&mut self, item: ItemKind) -> &mut u32 {
        match item {
            ItemKind::Basic => &mut self.basic,
            ItemKind::Great => &mut self.great,
            ItemKind::Ultra => &mut self.ultra,
        }
    }
}

/// Currency balance plus item stock. Counts and balance never go negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    currency: u64,
    inventory: Inventory,
}

impl Ledger {
    pub fn new(currency: u64, inventory: Inventory) -> Self {
        Self {
            currency,
            inventory,
        }
    }

    pub fn currency(&self) -> u64 {
        self.currency
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn can_afford(&self, cost: u64) -> bool {
        self.currency >= cost
    }

    pub fn purchase(&mut self, item: ItemKind, cost: u64) -> GameResult<()> {
        if !self.can_afford(cost) {
            debug!(target: "pokeworld.ledger", %item, cost, currency = self.currency, "purchase rejected");
            return Err(GameError::InsufficientFunds {
                needed: cost,
                available: self.currency,
            });
        }
        let stock = self
            .inventory
            .count(item)
            .checked_add(1)
            .ok_or(GameError::StockFull(item))?;
        self.currency -= cost;
        *self.inventory.slot_mut(item) = stock;
        info!(target: "pokeworld.ledger", %item, cost, currency = self.currency, stock, "item purchased");
        Ok(())
    }

    pub fn has_item(&self, item: ItemKind) -> bool {
        self.inventory.count(item) >= 1
    }

    /// Removes one item. The caller's use of it afterwards never refunds.
    pub fn consume_item(&mut self, item: ItemKind) -> GameResult<()> {
        let slot = self.inventory.slot_mut(item);
        if *slot == 0 {
            return Err(GameError::OutOfStock(item));
        }
        *slot -= 1;
        debug!(target: "pokeworld.ledger", %item, stock = *slot, "item consumed");
        Ok(())
    }

    pub fn credit(&mut self, amount: u64) {
        self.currency = self.currency.saturating_add(amount);
        info!(target: "pokeworld.ledger", amount, currency = self.currency, "currency credited");
    }
}
