//! Persisted breeding state.
//!
//! ```json
//! {
//!   "eggList": [{"type": "Fire", "totalSteps": 800, "steps": 120, "pokemon": "Vulpix"}, null],
//!   "eggSlots": 2,
//!   "queueList": ["Eevee"],
//!   "queueSlots": 1
//! }
//! ```
//!
//! Every field is optional on import. Missing fields fall back to the
//! configured defaults; a `null` document leaves the pool untouched.

use serde::{Deserialize, Serialize};

use super::Breeding;
use crate::egg::{Egg, EggSave};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BreedingSave {
    pub egg_list: Option<Vec<Option<EggSave>>>,
    pub egg_slots: Option<usize>,
    pub queue_list: Option<Vec<String>>,
    pub queue_slots: Option<usize>,
}

impl Breeding {
    pub fn to_save(&self) -> BreedingSave {
        BreedingSave {
            egg_list: Some(self.eggs.iter().map(|egg| Some(egg.to_save())).collect()),
            egg_slots: Some(self.egg_slots),
            queue_list: Some(self.queue.clone()),
            queue_slots: Some(self.queue_slots),
        }
    }

    /// Replace the pool state with a save record.
    ///
    /// Eggs are rebuilt from their fields and packed towards slot 0, keeping
    /// their order. A record that would break the
    /// pool invariants is widened rather than truncated: extra occupied
    /// eggs raise `egg_slots` (up to the slot array), an over-long queue
    /// raises `queue_slots`.
    pub fn load_save(&mut self, save: &BreedingSave) {
        let len = self.eggs.len();

        self.eggs = vec![Egg::none(); len];
        if let Some(list) = &save.egg_list {
            if list.len() > len {
                tracing::warn!(saved = list.len(), len, "dropping eggs beyond the slot array");
            }
            for (slot, saved) in self.eggs.iter_mut().zip(list) {
                if let Some(saved) = saved {
                    *slot = Egg::from_save(saved);
                }
            }
        }
        self.move_eggs();

        let mut egg_slots = save.egg_slots.unwrap_or(self.config.starting_egg_slots);
        if egg_slots > len {
            tracing::warn!(egg_slots, len, "saved egg slots exceed slot array");
            egg_slots = len;
        }
        let occupied = self.occupied_slots();
        if occupied > egg_slots {
            tracing::warn!(occupied, egg_slots, "raising egg slots to fit saved eggs");
            egg_slots = occupied;
        }
        self.egg_slots = egg_slots;

        self.queue = save.queue_list.clone().unwrap_or_default();
        let queue_slots = save
            .queue_slots
            .unwrap_or(self.config.starting_queue_slots);
        if self.queue.len() > queue_slots {
            tracing::warn!(
                queued = self.queue.len(),
                queue_slots,
                "raising queue slots to fit saved queue"
            );
        }
        self.queue_slots = queue_slots.max(self.queue.len());
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.to_save()).unwrap_or_default()
    }

    /// Import from JSON; `null` is accepted and changes nothing
    pub fn load_json(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let save: Option<BreedingSave> = serde_json::from_str(json)?;
        if let Some(save) = save {
            self.load_save(&save);
        }
        Ok(())
    }
}
