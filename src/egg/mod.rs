//! A single incubator slot.
//!
//! An egg accrues steps until it reaches `total_steps`. Accrual and hatching
//! are separate calls: the pool adds steps to every slot first and decides
//! when to hatch.

use serde::{Deserialize, Serialize};

use crate::catalog::EggType;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Egg {
    egg_type: EggType,
    total_steps: u64,
    steps: u64,
    pokemon: Option<String>,
}

/// Persisted egg. Empty slots are written with `type: None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EggSave {
    #[serde(rename = "type")]
    pub egg_type: EggType,
    pub total_steps: u64,
    pub steps: u64,
    pub pokemon: Option<String>,
}

impl Egg {
    /// Empty slot
    pub fn none() -> Self {
        Self::default()
    }

    /// An incubating egg. Returns `None` when asked for an empty egg, a zero
    /// step target or a blank pokemon name.
    pub fn new(egg_type: EggType, total_steps: u64, pokemon: impl Into<String>) -> Option<Self> {
        let pokemon = pokemon.into();
        if egg_type == EggType::None || total_steps == 0 || pokemon.is_empty() {
            return None;
        }
        Some(Self {
            egg_type,
            total_steps,
            steps: 0,
            pokemon: Some(pokemon),
        })
    }

    pub fn is_none(&self) -> bool {
        self.egg_type == EggType::None
    }

    pub fn egg_type(&self) -> EggType {
        self.egg_type
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn pokemon(&self) -> Option<&str> {
        self.pokemon.as_deref()
    }

    /// Relabel the egg (mystery eggs hide their roll)
    pub fn set_egg_type(&mut self, egg_type: EggType) {
        if !self.is_none() && egg_type != EggType::None {
            self.egg_type = egg_type;
        }
    }

    /// No-op on an empty slot
    pub fn add_steps(&mut self, amount: u64) {
        if self.is_none() {
            return;
        }
        self.steps = self.steps.saturating_add(amount);
    }

    /// `min(1.0, steps / total_steps)`, display only
    pub fn progress_ratio(&self) -> f64 {
        if self.total_steps == 0 {
            return 0.0;
        }
        (self.steps as f64 / self.total_steps as f64).min(1.0)
    }

    /// Progress in percent
    pub fn progress(&self) -> f64 {
        self.progress_ratio() * 100.0
    }

    pub fn steps_remaining(&self) -> u64 {
        self.total_steps.saturating_sub(self.steps)
    }

    pub fn can_hatch(&self) -> bool {
        !self.is_none() && self.steps >= self.total_steps
    }

    /// The pokemon inside, once the egg is ready.
    ///
    /// Never mutates; the pool clears the slot after a successful hatch.
    pub fn hatch(&self) -> Option<&str> {
        if !self.can_hatch() {
            return None;
        }
        self.pokemon()
    }

    pub fn to_save(&self) -> EggSave {
        EggSave {
            egg_type: self.egg_type,
            total_steps: self.total_steps,
            steps: self.steps,
            pokemon: self.pokemon.clone(),
        }
    }

    /// Rebuild from a save record. Records that cannot describe a live egg
    /// (no pokemon, zero target) load as an empty slot.
    pub fn from_save(save: &EggSave) -> Self {
        if save.egg_type == EggType::None {
            return Self::none();
        }
        let pokemon = save.pokemon.clone().unwrap_or_default();
        match Self::new(save.egg_type, save.total_steps, pokemon) {
            Some(mut egg) => {
                egg.steps = save.steps;
                egg
            }
            None => {
                tracing::warn!(?save, "dropping malformed egg from save");
                Self::none()
            }
        }
    }
}
