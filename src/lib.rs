//! Hatchery Core - idle game state library
//!
//! Deterministic, synchronous game state for the hatchery side of an
//! incremental pokemon game:
//! - Breeding pool (incubator slots, overflow queue, hatching)
//! - Egg lifecycle and save records
//! - Region-tiered hatch tables with rank-weighted selection
//! - Shop pricing (geometric bulk cost, multiplier growth and decay)
//! - Badge case
//!
//! Wallet, party, pokedex and notifications are owned by the host game and
//! reached through the traits in [`services`].

pub mod badges;
pub mod breeding;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod egg;
pub mod error;
pub mod logging;
pub mod selection;
pub mod services;
pub mod shop;

pub use badges::BadgeCase;
pub use breeding::{Admission, Breeding, BreedingSave, HatchEvent};
pub use catalog::{EggType, HatchCatalog};
pub use config::HatcheryConfig;
pub use egg::{Egg, EggSave};
pub use error::{BreedingError, ConfigError, ShopError};
pub use shop::{ItemMultipliers, ItemRegistry, PurchaseOutcome, ShopItem, ShopOptions};
