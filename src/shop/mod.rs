//! Shop pricing.
//!
//! Every item has a base price and a per-unit growth factor (`multiplier`).
//! The accumulated multiplier lives in [`ItemMultipliers`], keyed by the
//! item's save name, and is clamped to `[1, 100]`:
//!
//! - buying `n` multiplies it by `multiplier^n`
//! - decay divides it by `multiplier^n`
//!
//! The current price is `round(base_price * accumulated)`. Buying `n` at once
//! costs the geometric series `price * (1 - m^n) / (1 - m)`, except for the
//! default ball which is always sold flat.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::config::ShopConfig;
use crate::constants::{ITEM_PRICE_MULTIPLIER, MAX_PRICE_MULTIPLIER, MIN_PRICE_MULTIPLIER};
use crate::error::ShopError;
use crate::services::{Amount, Currency, Inventory, Notification, Notifier, Wallet};

/// Accumulated price multipliers by save name; missing keys read as 1
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemMultipliers(HashMap<String, f64>);

impl ItemMultipliers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored value clamped to `[1, 100]`; NaN reads as 1
    pub fn get(&self, save_name: &str) -> f64 {
        match self.0.get(save_name).copied() {
            Some(value) if !value.is_nan() => {
                value.clamp(MIN_PRICE_MULTIPLIER, MAX_PRICE_MULTIPLIER)
            }
            _ => MIN_PRICE_MULTIPLIER,
        }
    }

    pub fn set(&mut self, save_name: &str, value: f64) {
        self.0.insert(save_name.to_string(), value);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopOptions {
    /// Key into [`ItemMultipliers`], defaults to the item name
    pub save_name: Option<String>,
    pub max_amount: u64,
    pub multiplier: f64,
    pub multiplier_decrease: bool,
}

impl Default for ShopOptions {
    fn default() -> Self {
        Self {
            save_name: None,
            max_amount: u64::MAX,
            multiplier: ITEM_PRICE_MULTIPLIER,
            multiplier_decrease: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseOutcome {
    /// Zero units requested
    Nothing,
    Bought { amount: u64, cost: u64, clamped: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopItem {
    pub name: String,
    pub save_name: String,
    pub base_price: u64,
    pub currency: Currency,
    price: u64,
    pub max_amount: u64,
    /// Per-unit growth factor, never below 1
    pub multiplier: f64,
    pub multiplier_decrease: bool,
    /// Sold at `base_price * n` with no multiplier; set by
    /// [`ItemRegistry::register`] for the configured default ball
    pub flat_price: bool,
    pub available: bool,
}

impl ShopItem {
    pub fn new(name: &str, base_price: u64, currency: Currency, options: ShopOptions) -> Self {
        let save_name = options
            .save_name
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| name.to_string());
        Self {
            name: name.to_string(),
            save_name,
            base_price,
            currency,
            price: base_price,
            max_amount: options.max_amount,
            multiplier: options.multiplier.max(1.0),
            multiplier_decrease: options.multiplier_decrease,
            flat_price: false,
            available: true,
        }
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn display_name(&self) -> String {
        self.name.replace('_', " ")
    }

    /// Cost of buying `amount` units right now
    pub fn total_price(&self, amount: u64) -> u64 {
        if self.flat_price {
            return self.base_price.saturating_mul(amount);
        }
        if self.multiplier == 1.0 {
            return self.price.saturating_mul(amount);
        }
        let m = self.multiplier;
        let total = self.price as f64 * (1.0 - m.powf(amount as f64)) / (1.0 - m);
        // saturating cast; NaN and negatives become 0
        total.floor().max(0.0) as u64
    }

    /// Recompute the current price from the stored multiplier
    pub fn sync_price(&mut self, multipliers: &ItemMultipliers) {
        self.price = self.price_for(multipliers.get(&self.save_name));
    }

    fn price_for(&self, accumulated: f64) -> u64 {
        (self.base_price as f64 * accumulated).round() as u64
    }

    /// Returns the new price
    pub fn increase_price_multiplier(&mut self, n: u64, multipliers: &mut ItemMultipliers) -> u64 {
        let next = (multipliers.get(&self.save_name) * self.multiplier.powf(n as f64))
            .min(MAX_PRICE_MULTIPLIER);
        multipliers.set(&self.save_name, next);
        self.price = self.price_for(next);
        self.price
    }

    /// Returns the new price; items without decay keep theirs
    pub fn decrease_price_multiplier(&mut self, n: u64, multipliers: &mut ItemMultipliers) -> u64 {
        if !self.multiplier_decrease {
            return self.price;
        }
        let next = (multipliers.get(&self.save_name) / self.multiplier.powf(n as f64))
            .max(MIN_PRICE_MULTIPLIER);
        multipliers.set(&self.save_name, next);
        self.price = self.price_for(next);
        self.price
    }

    pub fn buy(
        &mut self,
        n: u64,
        wallet: &mut impl Wallet,
        inventory: &mut impl Inventory,
        multipliers: &mut ItemMultipliers,
        notifier: &mut impl Notifier,
    ) -> Result<PurchaseOutcome, ShopError> {
        if n == 0 {
            return Ok(PurchaseOutcome::Nothing);
        }

        let mut amount = n;
        let clamped = amount > self.max_amount;
        if clamped {
            notifier.notify(Notification::danger(format!(
                "You can only buy {} × {}!",
                self.max_amount,
                self.display_name()
            )));
            amount = self.max_amount;
            if amount == 0 {
                return Ok(PurchaseOutcome::Nothing);
            }
        }

        if !self.available {
            notifier.notify(Notification::danger(format!(
                "{} is sold out!",
                self.display_name()
            )));
            return Err(ShopError::SoldOut(self.name.clone()));
        }

        let plural = if amount > 1 { "s" } else { "" };
        let cost = Amount::new(self.total_price(amount), self.currency);
        if !wallet.has_amount(&cost) {
            notifier.notify(Notification::danger(format!(
                "You don't have enough {} to buy {} {}{}",
                self.currency.plural(),
                amount,
                self.display_name(),
                plural
            )));
            return Err(ShopError::InsufficientFunds {
                cost: cost.amount,
                currency: self.currency,
            });
        }

        wallet.lose_amount(&cost);
        inventory.gain_item(&self.name, amount);
        self.increase_price_multiplier(amount, multipliers);
        tracing::debug!(item = %self.name, amount, cost = cost.amount, price = self.price, "item bought");
        notifier.notify(Notification::success(format!(
            "You bought {} {}{}",
            amount,
            self.display_name(),
            plural
        )));

        Ok(PurchaseOutcome::Bought {
            amount,
            cost: cost.amount,
            clamped,
        })
    }
}

/// Items by save name. The first registration of a save name wins.
#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    items: BTreeMap<String, ShopItem>,
    config: ShopConfig,
}

impl ItemRegistry {
    pub fn new(config: ShopConfig) -> Self {
        Self {
            items: BTreeMap::new(),
            config,
        }
    }

    /// Options carrying the configured default growth factor
    pub fn default_options(&self) -> ShopOptions {
        ShopOptions {
            multiplier: self.config.default_price_multiplier,
            ..ShopOptions::default()
        }
    }

    /// Returns false when the save name is already taken
    pub fn register(&mut self, mut item: ShopItem) -> bool {
        if self.items.contains_key(&item.save_name) {
            return false;
        }
        item.flat_price = item.name == self.config.default_ball;
        self.items.insert(item.save_name.clone(), item);
        true
    }

    pub fn get(&self, save_name: &str) -> Option<&ShopItem> {
        self.items.get(save_name)
    }

    pub fn get_mut(&mut self, save_name: &str) -> Option<&mut ShopItem> {
        self.items.get_mut(save_name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShopItem> {
        self.items.values()
    }

    /// Load prices after the multipliers were restored
    pub fn sync_prices(&mut self, multipliers: &ItemMultipliers) {
        for item in self.items.values_mut() {
            item.sync_price(multipliers);
        }
    }

    /// Time-based decay for every item
    pub fn decrease_all(&mut self, n: u64, multipliers: &mut ItemMultipliers) {
        for item in self.items.values_mut() {
            item.decrease_price_multiplier(n, multipliers);
        }
    }
}
