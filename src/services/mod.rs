//! Collaborator seams.
//!
//! The hatchery core owns eggs, queues and prices. Everything else (wallet,
//! party roster, pokedex data, item inventory, player-facing notifications)
//! belongs to the surrounding game and is reached through these traits.
//! In-memory implementations are provided for the simulator and tests.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::logging::NOTIFY_TARGET;

/// Currencies the core spends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    Money,
    QuestPoint,
    DungeonToken,
    Diamond,
    FarmPoint,
}

impl Currency {
    /// Plural display name used in "not enough ..." messages
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Money => "money",
            Self::QuestPoint => "quest points",
            Self::DungeonToken => "dungeon tokens",
            Self::Diamond => "diamonds",
            Self::FarmPoint => "farm points",
        }
    }
}

/// A cost in a single currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub amount: u64,
    pub currency: Currency,
}

impl Amount {
    pub fn new(amount: u64, currency: Currency) -> Self {
        Self { amount, currency }
    }
}

/// Caught state of a species, ordered from worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CaughtStatus {
    NotCaught,
    Caught,
    CaughtShiny,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Success,
    Warning,
    Danger,
}

/// Player-facing message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    /// Display time in milliseconds, None = sink default
    pub timeout_ms: Option<u64>,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
            timeout_ms: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Warning,
            message: message.into(),
            timeout_ms: None,
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Danger,
            message: message.into(),
            timeout_ms: None,
        }
    }

    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }
}

// =====================================================
// Traits
// =====================================================

/// Static species data
pub trait Pokedex {
    /// Whether the species exists at all
    fn contains(&self, name: &str) -> bool;
    /// Egg cycles for the species, None when the species has none on record
    fn egg_cycles(&self, name: &str) -> Option<u32>;
    /// Region index the species is native to
    fn native_region(&self, name: &str) -> Option<u32>;
    /// Species revived from a fossil item
    fn fossil_pokemon(&self, fossil: &str) -> Option<String>;
    /// Direct pre-evolution, if any
    fn devolution(&self, name: &str) -> Option<String>;
}

/// The player's caught pokemon
pub trait Party {
    fn set_breeding(&mut self, name: &str, breeding: bool);
    fn is_breeding(&self, name: &str) -> bool;
    fn caught_status(&self, name: &str) -> CaughtStatus;
}

/// Opaque currency balance
pub trait Wallet {
    fn has_amount(&self, cost: &Amount) -> bool;
    fn lose_amount(&mut self, cost: &Amount);
}

/// Item stacks owned by the player
pub trait Inventory {
    fn gain_item(&mut self, name: &str, amount: u64);
}

/// Sink for player-facing messages
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

// =====================================================
// In-memory implementations
// =====================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeciesData {
    pub egg_cycles: Option<u32>,
    pub native_region: u32,
    pub devolution: Option<String>,
}

/// Pokedex backed by hash maps
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticPokedex {
    pub species: HashMap<String, SpeciesData>,
    pub fossils: HashMap<String, String>,
}

impl StaticPokedex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_species(
        mut self,
        name: &str,
        egg_cycles: Option<u32>,
        native_region: u32,
    ) -> Self {
        self.species.insert(
            name.to_string(),
            SpeciesData {
                egg_cycles,
                native_region,
                devolution: None,
            },
        );
        self
    }

    pub fn with_devolution(mut self, name: &str, devolution: &str) -> Self {
        self.species.entry(name.to_string()).or_default().devolution =
            Some(devolution.to_string());
        self
    }

    pub fn with_fossil(mut self, fossil: &str, pokemon: &str) -> Self {
        self.fossils.insert(fossil.to_string(), pokemon.to_string());
        self
    }
}

impl Pokedex for StaticPokedex {
    fn contains(&self, name: &str) -> bool {
        self.species.contains_key(name)
    }

    fn egg_cycles(&self, name: &str) -> Option<u32> {
        self.species.get(name).and_then(|s| s.egg_cycles)
    }

    fn native_region(&self, name: &str) -> Option<u32> {
        self.species.get(name).map(|s| s.native_region)
    }

    fn fossil_pokemon(&self, fossil: &str) -> Option<String> {
        self.fossils.get(fossil).cloned()
    }

    fn devolution(&self, name: &str) -> Option<String> {
        self.species.get(name).and_then(|s| s.devolution.clone())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartyEntry {
    pub breeding: bool,
    pub shiny: bool,
}

/// Party backed by a hash map; pokemon missing from the map count as not caught
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryParty {
    pub caught: HashMap<String, PartyEntry>,
}

impl MemoryParty {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catch(&mut self, name: &str, shiny: bool) {
        let entry = self.caught.entry(name.to_string()).or_default();
        entry.shiny |= shiny;
    }
}

impl Party for MemoryParty {
    fn set_breeding(&mut self, name: &str, breeding: bool) {
        match self.caught.get_mut(name) {
            Some(entry) => entry.breeding = breeding,
            None => tracing::warn!(pokemon = name, "set_breeding on uncaught pokemon"),
        }
    }

    fn is_breeding(&self, name: &str) -> bool {
        self.caught.get(name).map(|e| e.breeding).unwrap_or(false)
    }

    fn caught_status(&self, name: &str) -> CaughtStatus {
        match self.caught.get(name) {
            Some(entry) if entry.shiny => CaughtStatus::CaughtShiny,
            Some(_) => CaughtStatus::Caught,
            None => CaughtStatus::NotCaught,
        }
    }
}

/// Wallet with one balance per currency
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryWallet {
    pub balances: HashMap<Currency, u64>,
}

impl MemoryWallet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self, currency: Currency) -> u64 {
        self.balances.get(&currency).copied().unwrap_or(0)
    }

    pub fn gain_amount(&mut self, amount: &Amount) {
        *self.balances.entry(amount.currency).or_default() += amount.amount;
    }
}

impl Wallet for MemoryWallet {
    fn has_amount(&self, cost: &Amount) -> bool {
        self.balance(cost.currency) >= cost.amount
    }

    fn lose_amount(&mut self, cost: &Amount) {
        let balance = self.balances.entry(cost.currency).or_default();
        *balance = balance.saturating_sub(cost.amount);
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryInventory {
    pub items: HashMap<String, u64>,
}

impl MemoryInventory {
    pub fn count(&self, name: &str) -> u64 {
        self.items.get(name).copied().unwrap_or(0)
    }
}

impl Inventory for MemoryInventory {
    fn gain_item(&mut self, name: &str, amount: u64) {
        *self.items.entry(name.to_string()).or_default() += amount;
    }
}

/// Forwards notifications to the tracing subscriber
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&mut self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => {
                tracing::info!(target: NOTIFY_TARGET, "{}", notification.message)
            }
            NotificationKind::Warning | NotificationKind::Danger => {
                tracing::warn!(target: NOTIFY_TARGET, "{}", notification.message)
            }
        }
    }
}

/// Keeps every notification in order
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    pub entries: Vec<Notification>,
}

impl NotificationLog {
    pub fn last(&self) -> Option<&Notification> {
        self.entries.last()
    }

    pub fn warnings(&self) -> usize {
        self.entries
            .iter()
            .filter(|n| n.kind != NotificationKind::Success)
            .count()
    }
}

impl Notifier for NotificationLog {
    fn notify(&mut self, notification: Notification) {
        self.entries.push(notification);
    }
}
