//! Error types for the hatchery core.
//!
//! Every variant is recoverable: an operation that returns `Err` leaves the
//! state it was called on untouched.

use crate::catalog::EggType;
use crate::services::Currency;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BreedingError {
    #[error("You don't have any free egg slots")]
    NoFreeEggSlot,
    #[error("You don't have any free egg slots, your queue is full")]
    NoFreeSlotOrQueue,
    #[error("Cannot place an empty egg")]
    EmptyEgg,
    #[error("Could not place {0:?} egg: no free slot")]
    EggListFull(EggType),
    #[error("Queue index {index} out of range (len {len})")]
    QueueIndexOutOfRange { index: usize, len: usize },
    #[error("Egg index {index} out of range (len {len})")]
    EggIndexOutOfRange { index: usize, len: usize },
    #[error("Egg in slot {0} is not ready to hatch")]
    NotReady(usize),
    #[error("Unknown fossil: {0}")]
    UnknownFossil(String),
    #[error("Unknown pokemon: {0}")]
    UnknownPokemon(String),
    #[error("{pokemon} needs region {required}, highest unlocked is {highest}")]
    RegionLocked {
        pokemon: String,
        required: u32,
        highest: u32,
    },
    #[error("Insufficient quest points: need {cost}")]
    InsufficientFunds { cost: u64 },
    #[error("Cannot gain another egg slot (max {max})")]
    EggSlotsMaxed { max: usize },
    #[error("No hatch table for {0:?} eggs")]
    UnknownEggType(EggType),
    #[error("No hatchable pokemon for {0:?} eggs in unlocked regions")]
    EmptyCatalog(EggType),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShopError {
    #[error("{0} is sold out")]
    SoldOut(String),
    #[error("Insufficient funds: need {cost} {currency:?}")]
    InsufficientFunds { cost: u64, currency: Currency },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}
