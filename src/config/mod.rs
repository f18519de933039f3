//! Hatchery configuration.
//!
//! Loaded from `.ron` or `.json`; every field has a default so partial
//! files are fine. `validate` runs after every load.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::logging::TracingConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreedingConfig {
    /// Physical incubator slots, the ceiling for purchased slots
    pub egg_list_len: usize,
    pub starting_egg_slots: usize,
    pub starting_queue_slots: usize,
    pub steps_per_egg_cycle: u64,
    pub default_egg_steps: u64,
    pub egg_slot_cost_step: u64,
    pub tier_ratio: f64,
}

impl Default for BreedingConfig {
    fn default() -> Self {
        Self {
            egg_list_len: EGG_LIST_LEN,
            starting_egg_slots: STARTING_EGG_SLOTS,
            starting_queue_slots: STARTING_QUEUE_SLOTS,
            steps_per_egg_cycle: STEPS_PER_EGG_CYCLE,
            default_egg_steps: DEFAULT_EGG_STEPS,
            egg_slot_cost_step: EGG_SLOT_COST_STEP,
            tier_ratio: HATCH_TIER_RATIO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    pub default_price_multiplier: f64,
    pub default_ball: String,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            default_price_multiplier: ITEM_PRICE_MULTIPLIER,
            default_ball: DEFAULT_BALL.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HatcheryConfig {
    pub breeding: BreedingConfig,
    pub shop: ShopConfig,
    pub logging: TracingConfig,
    pub rng_seed: u64,
}

impl Default for HatcheryConfig {
    fn default() -> Self {
        Self {
            breeding: BreedingConfig::default(),
            shop: ShopConfig::default(),
            logging: TracingConfig::default(),
            rng_seed: 42,
        }
    }
}

impl HatcheryConfig {
    /// Read and validate a config file; the format follows the extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("ron") => Self::from_ron_str(&content)?,
            Some("json") => Self::from_json_str(&content)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };
        tracing::info!(path = %path.display(), "loaded hatchery config");
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let b = &self.breeding;
        if b.egg_list_len == 0 {
            return Err(ConfigError::Invalid("egg_list_len must be at least 1".into()));
        }
        if b.starting_egg_slots > b.egg_list_len {
            return Err(ConfigError::Invalid(format!(
                "starting_egg_slots {} exceeds egg_list_len {}",
                b.starting_egg_slots, b.egg_list_len
            )));
        }
        if b.steps_per_egg_cycle == 0 || b.default_egg_steps == 0 {
            return Err(ConfigError::Invalid("egg step counts must be positive".into()));
        }
        if b.tier_ratio.is_nan() || b.tier_ratio <= 1.0 {
            return Err(ConfigError::Invalid(format!(
                "tier_ratio must be > 1, got {}",
                b.tier_ratio
            )));
        }
        if self.shop.default_price_multiplier.is_nan() || self.shop.default_price_multiplier < 1.0 {
            return Err(ConfigError::Invalid(format!(
                "default_price_multiplier must be >= 1, got {}",
                self.shop.default_price_multiplier
            )));
        }
        Ok(())
    }
}
