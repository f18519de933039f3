//! Centralized game constants for the hatchery core.
//!
//! Values that callers may want to tune live in `config`; the defaults there
//! are taken from here. Literal caps that are part of the game rules
//! (price multiplier ceiling) are only defined here.

// =====================================================
// Breeding
// =====================================================

/// Number of egg slots in the incubator (ceiling for purchasable slots)
pub const EGG_LIST_LEN: usize = 4;

/// Slots unlocked on a fresh save
pub const STARTING_EGG_SLOTS: usize = 1;

/// Queue capacity on a fresh save
pub const STARTING_QUEUE_SLOTS: usize = 0;

/// Steps needed per egg cycle: total_steps = egg_cycles * STEPS_PER_EGG_CYCLE
pub const STEPS_PER_EGG_CYCLE: u64 = 40;

/// Steps for a pokemon without a known egg cycle count
pub const DEFAULT_EGG_STEPS: u64 = 500;

/// Quest point cost per slot: cost(slot) = slot * EGG_SLOT_COST_STEP
pub const EGG_SLOT_COST_STEP: u64 = 500;

/// Highest unlocked tier gets 1/ratio, the next 1/ratio^2, and so on
pub const HATCH_TIER_RATIO: f64 = 2.0;

// =====================================================
// Shop
// =====================================================

/// Per-unit price growth for shop items without a custom multiplier
pub const ITEM_PRICE_MULTIPLIER: f64 = 1.00045;

/// Accumulated price multiplier ceiling
pub const MAX_PRICE_MULTIPLIER: f64 = 100.0;

/// Accumulated price multiplier floor
pub const MIN_PRICE_MULTIPLIER: f64 = 1.0;

/// The one item that is always sold at a flat price
pub const DEFAULT_BALL: &str = "Pokeball";
