use thiserror::Error;

use crate::ledger::ItemKind;

/// Recoverable engine failures. None of them leave partial mutation behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },
    #[error("no {0} left in inventory")]
    OutOfStock(ItemKind),
    #[error("no room for another {0}")]
    StockFull(ItemKind),
    #[error("no capture in progress")]
    NoActiveCapture,
    #[error("no battle in progress")]
    NoActiveBattle,
    #[error("another encounter is already active")]
    SessionBusy,
    #[error("creature {0} is not nearby")]
    UnknownCreature(u32),
    #[error("trainer {0} is not nearby")]
    UnknownTrainer(u32),
}

pub type GameResult<T> = Result<T, GameError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog has no entry for id {0}")]
    NotFound(u32),
    #[error("lookup for id {id} failed: {reason}")]
    LookupFailed { id: u32, reason: String },
    #[error("lookup for id {0} timed out")]
    Timeout(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("location unavailable: {0}")]
    Unavailable(String),
}
