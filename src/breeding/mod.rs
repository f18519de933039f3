//! Breeding pool.
//!
//! A fixed array of incubator slots (only the first `egg_slots` are usable)
//! plus a FIFO queue of pokemon waiting for a slot.
//!
//! Lifecycle of a slot:
//!   empty → incubating → ready → hatched → empty (compacted, refilled from queue)
//!
//! Steps are fanned out to every slot by [`Breeding::tick`]. A ready egg is
//! only hatched automatically while somebody is waiting in the queue;
//! otherwise it sits at 100% until [`Breeding::hatch_pokemon_egg`] is called.

pub mod save;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{EggType, HatchCatalog};
use crate::config::BreedingConfig;
use crate::egg::Egg;
use crate::error::BreedingError;
use crate::services::{
    Amount, CaughtStatus, Currency, Notification, Notifier, Party, Pokedex, Wallet,
};

pub use save::BreedingSave;

/// Where an admitted egg ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Admission {
    /// Placed into this slot
    Incubating(usize),
    /// Waiting at this queue position
    Queued(usize),
}

/// Emitted for every egg that hatches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HatchEvent {
    pub slot: usize,
    pub pokemon: String,
    pub egg_type: EggType,
    pub steps: u64,
    /// Queue entry moved into the incubator as a result
    pub promoted: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Breeding {
    eggs: Vec<Egg>,
    egg_slots: usize,
    queue: Vec<String>,
    queue_slots: usize,
    catalog: HatchCatalog,
    config: BreedingConfig,
}

impl Default for Breeding {
    fn default() -> Self {
        Self::new(BreedingConfig::default(), HatchCatalog::default())
    }
}

impl Breeding {
    pub fn new(config: BreedingConfig, catalog: HatchCatalog) -> Self {
        let egg_list_len = config.egg_list_len.max(1);
        Self {
            eggs: vec![Egg::none(); egg_list_len],
            egg_slots: config.starting_egg_slots.min(egg_list_len),
            queue: Vec::new(),
            queue_slots: config.starting_queue_slots,
            catalog,
            config,
        }
    }

    // =====================================================
    // Accessors
    // =====================================================

    pub fn eggs(&self) -> &[Egg] {
        &self.eggs
    }

    pub fn egg_slots(&self) -> usize {
        self.egg_slots
    }

    pub fn queue(&self) -> &[String] {
        &self.queue
    }

    pub fn queue_slots(&self) -> usize {
        self.queue_slots
    }

    pub fn catalog(&self) -> &HatchCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &BreedingConfig {
        &self.config
    }

    pub fn occupied_slots(&self) -> usize {
        self.eggs.iter().filter(|egg| !egg.is_none()).count()
    }

    pub fn has_free_egg_slot(&self) -> bool {
        self.occupied_slots() < self.egg_slots
    }

    pub fn has_free_queue_slot(&self) -> bool {
        self.queue_slots > 0 && self.queue.len() < self.queue_slots
    }

    /// Whether any intake path has room
    pub fn can_accept(&self) -> bool {
        self.has_free_egg_slot() || self.has_free_queue_slot()
    }

    // =====================================================
    // Egg creation
    // =====================================================

    /// Steps needed to hatch a species with the given egg cycles
    pub fn get_steps(&self, egg_cycles: Option<u32>) -> u64 {
        match egg_cycles {
            Some(cycles) if cycles > 0 => cycles as u64 * self.config.steps_per_egg_cycle,
            _ => self.config.default_egg_steps,
        }
    }

    pub fn create_egg(
        &self,
        pokemon: &str,
        egg_type: EggType,
        dex: &impl Pokedex,
    ) -> Result<Egg, BreedingError> {
        if !dex.contains(pokemon) {
            return Err(BreedingError::UnknownPokemon(pokemon.to_string()));
        }
        let steps = self.get_steps(dex.egg_cycles(pokemon));
        Egg::new(egg_type, steps, pokemon)
            .ok_or_else(|| BreedingError::UnknownPokemon(pokemon.to_string()))
    }

    /// Roll a species from the typed hatch table
    pub fn create_typed_egg<R>(
        &self,
        egg_type: EggType,
        highest_region: u32,
        dex: &impl Pokedex,
        rng: &mut R,
    ) -> Result<Egg, BreedingError>
    where
        R: Rng + ?Sized,
    {
        let pokemon = self
            .catalog
            .roll(egg_type, highest_region, self.config.tier_ratio, rng)?;
        self.create_egg(&pokemon, egg_type, dex)
    }

    /// Typed egg of a uniformly chosen type, relabelled as a mystery egg
    pub fn create_random_egg<R>(
        &self,
        highest_region: u32,
        dex: &impl Pokedex,
        rng: &mut R,
    ) -> Result<Egg, BreedingError>
    where
        R: Rng + ?Sized,
    {
        let egg_type = self
            .catalog
            .random_type(rng)
            .ok_or(BreedingError::EmptyCatalog(EggType::Mystery))?;
        let mut egg = self.create_typed_egg(egg_type, highest_region, dex, rng)?;
        egg.set_egg_type(EggType::Mystery);
        Ok(egg)
    }

    /// Fossil egg, gated on the fossil pokemon's native region
    pub fn create_fossil_egg(
        &self,
        fossil: &str,
        highest_region: u32,
        dex: &impl Pokedex,
        notifier: &mut impl Notifier,
    ) -> Result<Egg, BreedingError> {
        let pokemon = dex
            .fossil_pokemon(fossil)
            .ok_or_else(|| BreedingError::UnknownFossil(fossil.to_string()))?;
        let native_region = dex
            .native_region(&pokemon)
            .ok_or_else(|| BreedingError::UnknownPokemon(pokemon.clone()))?;

        if native_region > highest_region {
            notifier.notify(
                Notification::warning(
                    "You must progress further before you can uncover this fossil Pokémon!",
                )
                .with_timeout(5_000),
            );
            return Err(BreedingError::RegionLocked {
                pokemon,
                required: native_region,
                highest: highest_region,
            });
        }

        self.create_egg(&pokemon, EggType::Fossil, dex)
    }

    // =====================================================
    // Intake
    // =====================================================

    /// Place an egg into the first empty usable slot.
    ///
    /// Callers check [`Breeding::has_free_egg_slot`] first; a full pool here
    /// is a caller bug and is logged as such.
    pub fn gain_egg(&mut self, egg: Egg) -> Result<usize, BreedingError> {
        if egg.is_none() {
            return Err(BreedingError::EmptyEgg);
        }
        let usable = self.egg_slots.min(self.eggs.len());
        let free = if self.has_free_egg_slot() {
            self.eggs[..usable].iter().position(|slot| slot.is_none())
        } else {
            None
        };
        match free {
            Some(index) => {
                tracing::debug!(slot = index, egg_type = ?egg.egg_type(), pokemon = ?egg.pokemon(), "egg placed");
                self.eggs[index] = egg;
                Ok(index)
            }
            None => {
                tracing::error!(egg_type = ?egg.egg_type(), "could not place egg: no free slot");
                Err(BreedingError::EggListFull(egg.egg_type()))
            }
        }
    }

    pub fn gain_random_egg<R>(
        &mut self,
        highest_region: u32,
        dex: &impl Pokedex,
        rng: &mut R,
    ) -> Result<usize, BreedingError>
    where
        R: Rng + ?Sized,
    {
        let egg = self.create_random_egg(highest_region, dex, rng)?;
        self.gain_egg(egg)
    }

    /// Breed a party pokemon: straight into a slot, else into the queue
    pub fn add_pokemon_to_hatchery(
        &mut self,
        pokemon: &str,
        dex: &impl Pokedex,
        party: &mut impl Party,
        notifier: &mut impl Notifier,
    ) -> Result<Admission, BreedingError> {
        if !dex.contains(pokemon) {
            return Err(BreedingError::UnknownPokemon(pokemon.to_string()));
        }
        if self.has_free_egg_slot() {
            return self
                .gain_pokemon_egg(pokemon, dex, party, notifier)
                .map(Admission::Incubating);
        }
        if self.has_free_queue_slot() && self.add_to_queue(pokemon, dex, party) {
            return Ok(Admission::Queued(self.queue.len() - 1));
        }
        Err(self.reject_no_capacity(notifier))
    }

    pub fn gain_pokemon_egg(
        &mut self,
        pokemon: &str,
        dex: &impl Pokedex,
        party: &mut impl Party,
        notifier: &mut impl Notifier,
    ) -> Result<usize, BreedingError> {
        if !self.has_free_egg_slot() {
            notifier.notify(Notification::warning("You don't have any free egg slots"));
            return Err(BreedingError::NoFreeEggSlot);
        }
        let egg = self.create_egg(pokemon, EggType::Pokemon, dex)?;
        let slot = self.gain_egg(egg)?;
        party.set_breeding(pokemon, true);
        Ok(slot)
    }

    /// Roll a typed egg and admit it like a party pokemon
    pub fn add_typed_egg<R>(
        &mut self,
        egg_type: EggType,
        highest_region: u32,
        dex: &impl Pokedex,
        notifier: &mut impl Notifier,
        rng: &mut R,
    ) -> Result<Admission, BreedingError>
    where
        R: Rng + ?Sized,
    {
        if !self.can_accept() {
            return Err(self.reject_no_capacity(notifier));
        }
        let egg = self.create_typed_egg(egg_type, highest_region, dex, rng)?;
        self.admit(egg, notifier)
    }

    pub fn add_random_egg<R>(
        &mut self,
        highest_region: u32,
        dex: &impl Pokedex,
        notifier: &mut impl Notifier,
        rng: &mut R,
    ) -> Result<Admission, BreedingError>
    where
        R: Rng + ?Sized,
    {
        if !self.can_accept() {
            return Err(self.reject_no_capacity(notifier));
        }
        let egg = self.create_random_egg(highest_region, dex, rng)?;
        self.admit(egg, notifier)
    }

    pub fn add_fossil_egg(
        &mut self,
        fossil: &str,
        highest_region: u32,
        dex: &impl Pokedex,
        notifier: &mut impl Notifier,
    ) -> Result<Admission, BreedingError> {
        if !self.can_accept() {
            return Err(self.reject_no_capacity(notifier));
        }
        let egg = self.create_fossil_egg(fossil, highest_region, dex, notifier)?;
        self.admit(egg, notifier)
    }

    /// Slot first, queue second. Queued eggs keep only the species name and
    /// come back as plain pokemon eggs when promoted.
    fn admit(
        &mut self,
        egg: Egg,
        notifier: &mut impl Notifier,
    ) -> Result<Admission, BreedingError> {
        if self.has_free_egg_slot() {
            return self.gain_egg(egg).map(Admission::Incubating);
        }
        if self.has_free_queue_slot() {
            if let Some(pokemon) = egg.pokemon() {
                self.queue.push(pokemon.to_string());
                return Ok(Admission::Queued(self.queue.len() - 1));
            }
        }
        Err(self.reject_no_capacity(notifier))
    }

    fn reject_no_capacity(&self, notifier: &mut impl Notifier) -> BreedingError {
        let (message, error) = if self.queue_slots > 0 {
            (
                "You don't have any free egg slots\nYour queue is full",
                BreedingError::NoFreeSlotOrQueue,
            )
        } else {
            (
                "You don't have any free egg slots",
                BreedingError::NoFreeEggSlot,
            )
        };
        notifier.notify(Notification::warning(message));
        error
    }

    // =====================================================
    // Queue
    // =====================================================

    /// Append to the queue; false when it is full or the species is unknown
    pub fn add_to_queue(
        &mut self,
        pokemon: &str,
        dex: &impl Pokedex,
        party: &mut impl Party,
    ) -> bool {
        if self.queue.len() >= self.queue_slots {
            return false;
        }
        if !dex.contains(pokemon) {
            tracing::error!(pokemon, "refusing to queue unknown pokemon");
            return false;
        }
        party.set_breeding(pokemon, true);
        self.queue.push(pokemon.to_string());
        true
    }

    pub fn remove_from_queue(
        &mut self,
        index: usize,
        party: &mut impl Party,
    ) -> Result<String, BreedingError> {
        if index >= self.queue.len() {
            tracing::error!(index, len = self.queue.len(), "remove from queue out of range");
            return Err(BreedingError::QueueIndexOutOfRange {
                index,
                len: self.queue.len(),
            });
        }
        let pokemon = self.queue.remove(index);
        tracing::debug!(index, pokemon = %pokemon, "removed from queue");
        party.set_breeding(&pokemon, false);
        Ok(pokemon)
    }

    // =====================================================
    // Progress & hatching
    // =====================================================

    /// Add steps to every egg, in slot order.
    ///
    /// A ready egg hatches during the tick only while the queue is non-empty.
    /// Hatching compacts the slots, so the egg that slides into the current
    /// index is not visited again this tick.
    pub fn tick(&mut self, amount: u64, dex: &impl Pokedex) -> Vec<HatchEvent> {
        let mut hatched = Vec::new();
        for index in 0..self.eggs.len() {
            if self.eggs[index].is_none() {
                continue;
            }
            self.eggs[index].add_steps(amount);
            if !self.queue.is_empty() && self.eggs[index].can_hatch() {
                if let Ok(event) = self.hatch_pokemon_egg(index, dex) {
                    hatched.push(event);
                }
            }
        }
        hatched
    }

    /// Scale raw progress by an external bonus and round to whole steps
    pub fn progress_eggs(&mut self, amount: f64, bonus: f64, dex: &impl Pokedex) -> Vec<HatchEvent> {
        let steps = (amount * bonus).round();
        let steps = if steps.is_finite() && steps > 0.0 {
            steps as u64
        } else {
            0
        };
        self.tick(steps, dex)
    }

    /// Progress earned by winning a battle on a (normalized) route
    pub fn progress_eggs_battle(
        &mut self,
        route: u32,
        bonus: f64,
        dex: &impl Pokedex,
    ) -> Vec<HatchEvent> {
        let amount = ((route as f64).sqrt() * 100.0).round() / 100.0;
        self.progress_eggs(amount, bonus, dex)
    }

    /// Hatch the egg in `index`, compact the slots and pull the next queued
    /// pokemon into the freed slot. Nothing changes if the egg is not ready.
    pub fn hatch_pokemon_egg(
        &mut self,
        index: usize,
        dex: &impl Pokedex,
    ) -> Result<HatchEvent, BreedingError> {
        let Some(egg) = self.eggs.get(index) else {
            tracing::error!(index, len = self.eggs.len(), "hatch index out of range");
            return Err(BreedingError::EggIndexOutOfRange {
                index,
                len: self.eggs.len(),
            });
        };
        let Some(pokemon) = egg.hatch().map(str::to_string) else {
            return Err(BreedingError::NotReady(index));
        };

        let mut event = HatchEvent {
            slot: index,
            pokemon,
            egg_type: egg.egg_type(),
            steps: egg.steps(),
            promoted: None,
        };
        tracing::info!(slot = index, pokemon = %event.pokemon, egg_type = ?event.egg_type, "egg hatched");

        self.eggs[index] = Egg::none();
        self.move_eggs();

        if !self.queue.is_empty() {
            let next = self.queue.remove(0);
            match self
                .create_egg(&next, EggType::Pokemon, dex)
                .and_then(|egg| self.gain_egg(egg))
            {
                Ok(slot) => {
                    tracing::debug!(slot, pokemon = %next, "promoted from queue");
                    event.promoted = Some(next);
                }
                Err(e) => tracing::error!(pokemon = %next, error = %e, "queue promotion failed"),
            }
        }

        Ok(event)
    }

    /// Slide incubating eggs towards slot 0, keeping their order
    pub fn move_eggs(&mut self) {
        let len = self.eggs.len();
        let mut occupied: Vec<Egg> = std::mem::take(&mut self.eggs)
            .into_iter()
            .filter(|egg| !egg.is_none())
            .collect();
        occupied.resize(len, Egg::none());
        self.eggs = occupied;
    }

    // =====================================================
    // Slots
    // =====================================================

    pub fn get_egg_slot_cost(&self, slot: usize) -> u64 {
        self.config.egg_slot_cost_step * slot as u64
    }

    pub fn next_egg_slot_cost(&self) -> Amount {
        Amount::new(
            self.get_egg_slot_cost(self.egg_slots + 1),
            Currency::QuestPoint,
        )
    }

    pub fn buy_egg_slot(
        &mut self,
        wallet: &mut impl Wallet,
        notifier: &mut impl Notifier,
    ) -> Result<(), BreedingError> {
        if self.egg_slots >= self.eggs.len() {
            tracing::error!(max = self.eggs.len(), "cannot buy another egg slot");
            return Err(BreedingError::EggSlotsMaxed {
                max: self.eggs.len(),
            });
        }
        let cost = self.next_egg_slot_cost();
        if !wallet.has_amount(&cost) {
            notifier.notify(Notification::warning(format!(
                "You don't have enough {} to buy an egg slot",
                cost.currency.plural()
            )));
            return Err(BreedingError::InsufficientFunds { cost: cost.amount });
        }
        wallet.lose_amount(&cost);
        self.gain_egg_slot()
    }

    pub fn gain_egg_slot(&mut self) -> Result<(), BreedingError> {
        if self.egg_slots >= self.eggs.len() {
            tracing::error!(max = self.eggs.len(), "cannot gain another egg slot");
            return Err(BreedingError::EggSlotsMaxed {
                max: self.eggs.len(),
            });
        }
        self.egg_slots += 1;
        Ok(())
    }

    pub fn gain_queue_slot(&mut self) {
        self.queue_slots += 1;
    }

    // =====================================================
    // Collection helpers
    // =====================================================

    /// Worst caught status over the hatchable species of one egg type
    pub fn type_caught_status(
        &self,
        egg_type: EggType,
        highest_region: u32,
        party: &impl Party,
    ) -> CaughtStatus {
        if self.catalog.table(egg_type).is_none() {
            return CaughtStatus::NotCaught;
        }
        self.catalog
            .hatchable_flat(egg_type, highest_region)
            .into_iter()
            .map(|name| party.caught_status(name))
            .fold(CaughtStatus::CaughtShiny, Ord::min)
    }

    /// Worst caught status over every typed egg
    pub fn all_caught_status(&self, highest_region: u32, party: &impl Party) -> CaughtStatus {
        self.catalog
            .egg_types()
            .into_iter()
            .map(|egg_type| self.type_caught_status(egg_type, highest_region, party))
            .fold(CaughtStatus::CaughtShiny, Ord::min)
    }

    /// Earliest pre-evolution native to an unlocked region
    pub fn calculate_base_form(
        &self,
        pokemon: &str,
        dex: &impl Pokedex,
        highest_region: u32,
    ) -> String {
        let mut current = pokemon.to_string();
        let mut seen = vec![current.clone()];
        while let Some(devolution) = dex.devolution(&current) {
            let unlocked = dex
                .native_region(&devolution)
                .is_some_and(|region| region <= highest_region);
            if !unlocked || seen.contains(&devolution) {
                break;
            }
            seen.push(devolution.clone());
            current = devolution;
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{MemoryParty, MemoryWallet, NotificationLog, StaticPokedex};
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn dex() -> StaticPokedex {
        let mut dex = StaticPokedex::new();
        for egg_type in EggType::typed() {
            for name in HatchCatalog::default().hatchable_flat(egg_type, 10) {
                dex = dex.with_species(name, Some(20), 0);
            }
        }
        dex.with_species("Pichu", Some(10), 1)
            .with_species("Pikachu", Some(10), 0)
            .with_species("Raichu", Some(10), 0)
            .with_species("Eevee", Some(35), 0)
            .with_species("Missingno", None, 0)
            .with_species("Omanyte", Some(30), 0)
            .with_species("Lileep", Some(30), 2)
            .with_devolution("Raichu", "Pikachu")
            .with_devolution("Pikachu", "Pichu")
            .with_fossil("Helix Fossil", "Omanyte")
            .with_fossil("Root Fossil", "Lileep")
    }

    fn party() -> MemoryParty {
        let mut party = MemoryParty::new();
        for name in ["Pikachu", "Eevee", "Raichu", "Missingno"] {
            party.catch(name, false);
        }
        party
    }

    fn rng() -> Xoshiro256PlusPlus {
        Xoshiro256PlusPlus::seed_from_u64(1234)
    }

    fn pool(egg_slots: usize, queue_slots: usize) -> Breeding {
        let config = BreedingConfig {
            starting_egg_slots: egg_slots,
            starting_queue_slots: queue_slots,
            ..BreedingConfig::default()
        };
        Breeding::new(config, HatchCatalog::default())
    }

    #[test]
    fn test_default_pool() {
        let breeding = Breeding::default();
        assert_eq!(breeding.eggs().len(), 4);
        assert_eq!(breeding.egg_slots(), 1);
        assert_eq!(breeding.queue_slots(), 0);
        assert!(breeding.has_free_egg_slot());
        assert!(!breeding.has_free_queue_slot());
        assert!(breeding.can_accept());
    }

    #[test]
    fn test_get_steps() {
        let breeding = Breeding::default();
        assert_eq!(breeding.get_steps(Some(10)), 400);
        assert_eq!(breeding.get_steps(None), 500);
    }

    #[test]
    fn test_create_egg_unknown_pokemon() {
        let breeding = Breeding::default();
        assert_eq!(
            breeding.create_egg("Agumon", EggType::Pokemon, &dex()),
            Err(BreedingError::UnknownPokemon("Agumon".into()))
        );
        let egg = breeding
            .create_egg("Missingno", EggType::Pokemon, &dex())
            .unwrap();
        assert_eq!(egg.total_steps(), 500);
    }

    #[test]
    fn test_add_pokemon_goes_to_slot_then_queue() {
        let mut breeding = pool(1, 1);
        let (dex, mut party, mut log) = (dex(), party(), NotificationLog::default());

        let first = breeding.add_pokemon_to_hatchery("Pikachu", &dex, &mut party, &mut log);
        assert_eq!(first, Ok(Admission::Incubating(0)));
        assert!(party.is_breeding("Pikachu"));

        let second = breeding.add_pokemon_to_hatchery("Eevee", &dex, &mut party, &mut log);
        assert_eq!(second, Ok(Admission::Queued(0)));
        assert!(party.is_breeding("Eevee"));
        assert_eq!(breeding.queue(), ["Eevee".to_string()]);

        let third = breeding.add_pokemon_to_hatchery("Raichu", &dex, &mut party, &mut log);
        assert_eq!(third, Err(BreedingError::NoFreeSlotOrQueue));
        assert!(!party.is_breeding("Raichu"));
        assert_eq!(
            log.last().map(|n| n.message.as_str()),
            Some("You don't have any free egg slots\nYour queue is full")
        );
    }

    #[test]
    fn test_no_queue_warning_mentions_slots_only() {
        let mut breeding = pool(1, 0);
        let (dex, mut party, mut log) = (dex(), party(), NotificationLog::default());
        breeding
            .add_pokemon_to_hatchery("Pikachu", &dex, &mut party, &mut log)
            .unwrap();
        let result = breeding.add_pokemon_to_hatchery("Eevee", &dex, &mut party, &mut log);
        assert_eq!(result, Err(BreedingError::NoFreeEggSlot));
        assert_eq!(
            log.last().map(|n| n.message.as_str()),
            Some("You don't have any free egg slots")
        );
    }

    #[test]
    fn test_gain_egg_full_pool_is_rejected() {
        let mut breeding = pool(1, 0);
        let egg = Egg::new(EggType::Fire, 100, "Charmander").unwrap();
        assert_eq!(breeding.gain_egg(egg.clone()), Ok(0));
        assert_eq!(
            breeding.gain_egg(egg),
            Err(BreedingError::EggListFull(EggType::Fire))
        );
        assert_eq!(breeding.occupied_slots(), 1);
        assert_eq!(breeding.gain_egg(Egg::none()), Err(BreedingError::EmptyEgg));
    }

    #[test]
    fn test_gain_egg_respects_unlocked_slots() {
        let mut breeding = pool(2, 0);
        let egg = Egg::new(EggType::Water, 100, "Squirtle").unwrap();
        assert!(breeding.gain_egg(egg.clone()).is_ok());
        assert!(breeding.gain_egg(egg.clone()).is_ok());
        assert!(breeding.gain_egg(egg).is_err());
        assert!(breeding.eggs()[2].is_none());
        assert!(breeding.eggs()[3].is_none());
    }

    #[test]
    fn test_tick_adds_steps_to_every_egg() {
        let mut breeding = pool(3, 0);
        let dex = dex();
        for name in ["Charmander", "Vulpix"] {
            breeding
                .gain_egg(breeding.create_egg(name, EggType::Fire, &dex).unwrap())
                .unwrap();
        }
        let hatched = breeding.tick(150, &dex);
        assert!(hatched.is_empty());
        assert_eq!(breeding.eggs()[0].steps(), 150);
        assert_eq!(breeding.eggs()[1].steps(), 150);
        assert_eq!(breeding.eggs()[2].steps(), 0);
    }

    #[test]
    fn test_tick_does_not_hatch_with_empty_queue() {
        let mut breeding = pool(1, 1);
        let (dex, mut party) = (dex(), party());
        let mut log = NotificationLog::default();
        breeding
            .add_pokemon_to_hatchery("Pikachu", &dex, &mut party, &mut log)
            .unwrap();
        breeding.tick(396, &dex);
        assert!(breeding.tick(10, &dex).is_empty());
        assert!(breeding.eggs()[0].can_hatch());
        assert_eq!(breeding.eggs()[0].progress_ratio(), 1.0);

        // once someone waits, the next tick hatches it
        breeding
            .add_pokemon_to_hatchery("Eevee", &dex, &mut party, &mut log)
            .unwrap();
        let hatched = breeding.tick(1, &dex);
        assert_eq!(hatched.len(), 1);
        assert_eq!(hatched[0].pokemon, "Pikachu");
        assert_eq!(hatched[0].promoted.as_deref(), Some("Eevee"));
        assert_eq!(breeding.eggs()[0].pokemon(), Some("Eevee"));
        assert!(breeding.queue().is_empty());
    }

    #[test]
    fn test_explicit_hatch_without_queue() {
        let mut breeding = pool(1, 0);
        let dex = dex();
        breeding
            .gain_egg(breeding.create_egg("Pikachu", EggType::Pokemon, &dex).unwrap())
            .unwrap();
        assert_eq!(
            breeding.hatch_pokemon_egg(0, &dex),
            Err(BreedingError::NotReady(0))
        );
        breeding.tick(400, &dex);
        let event = breeding.hatch_pokemon_egg(0, &dex).unwrap();
        assert_eq!(event.pokemon, "Pikachu");
        assert_eq!(event.steps, 400);
        assert!(event.promoted.is_none());
        assert_eq!(breeding.occupied_slots(), 0);
    }

    #[test]
    fn test_hatch_out_of_range() {
        let mut breeding = Breeding::default();
        assert_eq!(
            breeding.hatch_pokemon_egg(9, &dex()),
            Err(BreedingError::EggIndexOutOfRange { index: 9, len: 4 })
        );
    }

    #[test]
    fn test_hatch_compacts_and_promotes() {
        let mut breeding = pool(3, 1);
        let dex = dex();
        let a = Egg::new(EggType::Fire, 100, "Charmander").unwrap();
        let b = Egg::new(EggType::Water, 1000, "Squirtle").unwrap();
        let c = Egg::new(EggType::Grass, 1000, "Bulbasaur").unwrap();
        breeding.gain_egg(a).unwrap();
        breeding.gain_egg(b).unwrap();
        breeding.gain_egg(c).unwrap();
        breeding.queue.push("Eevee".into());

        breeding.tick(100, &dex);

        let names: Vec<_> = breeding.eggs().iter().map(|e| e.pokemon()).collect();
        assert_eq!(
            names,
            vec![Some("Squirtle"), Some("Bulbasaur"), Some("Eevee"), None]
        );
        // Squirtle slid into the hatched index and missed this tick
        let steps: Vec<_> = breeding.eggs().iter().map(|e| e.steps()).collect();
        assert_eq!(steps, vec![0, 100, 100, 0]);
    }

    #[test]
    fn test_move_eggs_preserves_order() {
        let mut breeding = pool(4, 0);
        breeding.eggs[1] = Egg::new(EggType::Fire, 10, "Vulpix").unwrap();
        breeding.eggs[3] = Egg::new(EggType::Water, 10, "Psyduck").unwrap();
        breeding.move_eggs();
        let names: Vec<_> = breeding.eggs().iter().map(|e| e.pokemon()).collect();
        assert_eq!(names, vec![Some("Vulpix"), Some("Psyduck"), None, None]);
    }

    #[test]
    fn test_unknown_pokemon_never_queued() {
        let mut breeding = pool(1, 1);
        let (dex, mut party, mut log) = (dex(), party(), NotificationLog::default());
        party.catch("Agumon", false);
        breeding
            .add_pokemon_to_hatchery("Pikachu", &dex, &mut party, &mut log)
            .unwrap();

        let result = breeding.add_pokemon_to_hatchery("Agumon", &dex, &mut party, &mut log);
        assert_eq!(result, Err(BreedingError::UnknownPokemon("Agumon".into())));
        assert!(breeding.queue().is_empty());
        assert!(!party.is_breeding("Agumon"));

        assert!(!breeding.add_to_queue("Agumon", &dex, &mut party));
        assert!(breeding.queue().is_empty());
        assert!(!party.is_breeding("Agumon"));
    }

    #[test]
    fn test_unknown_pokemon_rejected_with_free_slot() {
        let mut breeding = pool(1, 0);
        let (dex, mut party, mut log) = (dex(), party(), NotificationLog::default());
        party.catch("Agumon", false);
        let result = breeding.add_pokemon_to_hatchery("Agumon", &dex, &mut party, &mut log);
        assert_eq!(result, Err(BreedingError::UnknownPokemon("Agumon".into())));
        assert_eq!(breeding.occupied_slots(), 0);
        assert!(!party.is_breeding("Agumon"));
    }

    #[test]
    fn test_failed_promotion_still_hatches() {
        let mut breeding = pool(1, 1);
        let dex = dex();
        breeding
            .gain_egg(Egg::new(EggType::Fire, 100, "Charmander").unwrap())
            .unwrap();
        // an unknown species can only arrive through an imported save
        breeding.queue.push("Agumon".into());

        let hatched = breeding.tick(100, &dex);
        assert_eq!(hatched.len(), 1);
        assert_eq!(hatched[0].pokemon, "Charmander");
        assert!(hatched[0].promoted.is_none());
        assert!(breeding.queue().is_empty());
        assert_eq!(breeding.occupied_slots(), 0);
    }

    #[test]
    fn test_remove_from_queue() {
        let mut breeding = pool(0, 2);
        let (dex, mut party) = (dex(), party());
        assert!(breeding.add_to_queue("Pikachu", &dex, &mut party));
        assert!(breeding.add_to_queue("Eevee", &dex, &mut party));
        assert!(!breeding.add_to_queue("Raichu", &dex, &mut party));

        assert_eq!(breeding.remove_from_queue(0, &mut party), Ok("Pikachu".into()));
        assert!(!party.is_breeding("Pikachu"));
        assert!(party.is_breeding("Eevee"));
        assert_eq!(
            breeding.remove_from_queue(5, &mut party),
            Err(BreedingError::QueueIndexOutOfRange { index: 5, len: 1 })
        );
    }

    #[test]
    fn test_typed_egg_in_unlocked_regions() {
        let breeding = Breeding::default();
        let dex = dex();
        let mut rng = rng();
        let allowed = breeding.catalog().hatchable_flat(EggType::Grass, 1);
        for _ in 0..100 {
            let egg = breeding
                .create_typed_egg(EggType::Grass, 1, &dex, &mut rng)
                .unwrap();
            assert_eq!(egg.egg_type(), EggType::Grass);
            assert!(allowed.contains(&egg.pokemon().unwrap()));
        }
    }

    #[test]
    fn test_random_egg_is_mystery() {
        let breeding = Breeding::default();
        let mut rng = rng();
        let egg = breeding.create_random_egg(0, &dex(), &mut rng).unwrap();
        assert_eq!(egg.egg_type(), EggType::Mystery);
        assert!(egg.pokemon().is_some());
        assert_eq!(egg.total_steps(), 800);
    }

    #[test]
    fn test_add_random_egg_queues_species_when_slots_full() {
        let mut breeding = pool(1, 1);
        let (dex, mut log, mut rng) = (dex(), NotificationLog::default(), rng());
        assert_eq!(
            breeding.add_random_egg(0, &dex, &mut log, &mut rng),
            Ok(Admission::Incubating(0))
        );
        assert_eq!(
            breeding.add_random_egg(0, &dex, &mut log, &mut rng),
            Ok(Admission::Queued(0))
        );
        assert_eq!(
            breeding.add_typed_egg(EggType::Fire, 0, &dex, &mut log, &mut rng),
            Err(BreedingError::NoFreeSlotOrQueue)
        );
        assert_eq!(log.warnings(), 1);
    }

    #[test]
    fn test_fossil_region_lock() {
        let mut breeding = pool(2, 0);
        let (dex, mut log) = (dex(), NotificationLog::default());

        let locked = breeding.add_fossil_egg("Root Fossil", 1, &dex, &mut log);
        assert!(matches!(locked, Err(BreedingError::RegionLocked { required: 2, .. })));
        assert_eq!(breeding.occupied_slots(), 0);
        assert_eq!(log.last().and_then(|n| n.timeout_ms), Some(5_000));

        assert_eq!(
            breeding.add_fossil_egg("Helix Fossil", 0, &dex, &mut log),
            Ok(Admission::Incubating(0))
        );
        assert_eq!(breeding.eggs()[0].egg_type(), EggType::Fossil);
        assert_eq!(
            breeding.create_fossil_egg("Old Amber", 9, &dex, &mut log),
            Err(BreedingError::UnknownFossil("Old Amber".into()))
        );
    }

    #[test]
    fn test_buy_egg_slot() {
        let mut breeding = Breeding::default();
        let mut wallet = MemoryWallet::new();
        let mut log = NotificationLog::default();

        assert_eq!(breeding.next_egg_slot_cost(), Amount::new(1000, Currency::QuestPoint));
        assert_eq!(
            breeding.buy_egg_slot(&mut wallet, &mut log),
            Err(BreedingError::InsufficientFunds { cost: 1000 })
        );
        assert_eq!(breeding.egg_slots(), 1);

        wallet.gain_amount(&Amount::new(10_000, Currency::QuestPoint));
        breeding.buy_egg_slot(&mut wallet, &mut log).unwrap();
        breeding.buy_egg_slot(&mut wallet, &mut log).unwrap();
        breeding.buy_egg_slot(&mut wallet, &mut log).unwrap();
        assert_eq!(breeding.egg_slots(), 4);
        assert_eq!(wallet.balance(Currency::QuestPoint), 10_000 - 1000 - 1500 - 2000);

        assert_eq!(
            breeding.buy_egg_slot(&mut wallet, &mut log),
            Err(BreedingError::EggSlotsMaxed { max: 4 })
        );
        assert_eq!(wallet.balance(Currency::QuestPoint), 5500);
    }

    #[test]
    fn test_gain_queue_slot() {
        let mut breeding = Breeding::default();
        breeding.gain_queue_slot();
        breeding.gain_queue_slot();
        assert_eq!(breeding.queue_slots(), 2);
    }

    #[test]
    fn test_progress_eggs_rounding() {
        let mut breeding = pool(1, 0);
        let dex = dex();
        breeding
            .gain_egg(breeding.create_egg("Eevee", EggType::Pokemon, &dex).unwrap())
            .unwrap();
        breeding.progress_eggs(2.4, 1.0, &dex);
        assert_eq!(breeding.eggs()[0].steps(), 2);
        breeding.progress_eggs(2.0, 1.5, &dex);
        assert_eq!(breeding.eggs()[0].steps(), 5);
        breeding.progress_eggs(-3.0, 1.0, &dex);
        assert_eq!(breeding.eggs()[0].steps(), 5);
        // sqrt(16) = 4
        breeding.progress_eggs_battle(16, 1.0, &dex);
        assert_eq!(breeding.eggs()[0].steps(), 9);
    }

    #[test]
    fn test_caught_status() {
        let breeding = Breeding::default();
        let mut party = MemoryParty::new();
        for name in breeding.catalog().hatchable_flat(EggType::Dragon, 0) {
            party.catch(name, true);
        }
        assert_eq!(
            breeding.type_caught_status(EggType::Dragon, 0, &party),
            CaughtStatus::CaughtShiny
        );
        party.caught.remove("Dratini");
        party.catch("Dratini", false);
        assert_eq!(
            breeding.type_caught_status(EggType::Dragon, 0, &party),
            CaughtStatus::Caught
        );
        assert_eq!(
            breeding.type_caught_status(EggType::Mystery, 0, &party),
            CaughtStatus::NotCaught
        );
        assert_eq!(breeding.all_caught_status(0, &party), CaughtStatus::NotCaught);
    }

    #[test]
    fn test_calculate_base_form() {
        let breeding = Breeding::default();
        let dex = dex();
        // Pichu is native to region 1
        assert_eq!(breeding.calculate_base_form("Raichu", &dex, 0), "Pikachu");
        assert_eq!(breeding.calculate_base_form("Raichu", &dex, 1), "Pichu");
        assert_eq!(breeding.calculate_base_form("Eevee", &dex, 5), "Eevee");
    }
}
