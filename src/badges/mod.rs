//! Gym badge ownership.
//!
//! A fixed-length set of flags. The save form is the flag list truncated
//! after the highest owned badge; missing trailing entries read as unowned.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeCase {
    badges: Vec<bool>,
}

impl BadgeCase {
    pub fn new(total: usize) -> Self {
        Self {
            badges: vec![false; total],
        }
    }

    pub fn len(&self) -> usize {
        self.badges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.badges.is_empty()
    }

    /// Returns false for an id outside the case
    pub fn gain_badge(&mut self, id: usize) -> bool {
        match self.badges.get_mut(id) {
            Some(owned) => {
                *owned = true;
                true
            }
            None => {
                tracing::error!(id, total = self.badges.len(), "unknown badge");
                false
            }
        }
    }

    /// `None` is the "no badge required" marker and always counts as owned
    pub fn has_badge(&self, id: Option<usize>) -> bool {
        match id {
            None => true,
            Some(id) => self.badges.get(id).copied().unwrap_or(false),
        }
    }

    pub fn badge_count(&self) -> usize {
        self.badges.iter().filter(|&&owned| owned).count()
    }

    pub fn to_save(&self) -> Vec<bool> {
        let end = self
            .badges
            .iter()
            .rposition(|&owned| owned)
            .map_or(0, |last| last + 1);
        self.badges[..end].to_vec()
    }

    /// Entries past the end of the case are ignored
    pub fn from_save(&mut self, save: &[bool]) {
        if save.len() > self.badges.len() {
            tracing::warn!(
                saved = save.len(),
                total = self.badges.len(),
                "ignoring saved badges beyond the case"
            );
        }
        for (owned, &saved) in self.badges.iter_mut().zip(save) {
            *owned = saved;
        }
    }
}
