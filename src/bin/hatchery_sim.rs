//! Headless hatchery simulator.
//!
//! Usage:
//!   hatchery-sim                          - default config, 200 ticks
//!   hatchery-sim --config hatchery.ron    - load config from RON or JSON
//!   hatchery-sim --ticks 500 --steps 25   - longer walk, bigger strides
//!   hatchery-sim --region 3 --seed 7      - unlock more tiers, reseed

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use hatchery_core::logging::init_tracing;
use hatchery_core::services::{
    Amount, Currency, MemoryWallet, StaticPokedex, TracingNotifier, Wallet,
};
use hatchery_core::{Breeding, HatchCatalog, HatcheryConfig};

#[derive(Parser)]
#[command(name = "hatchery-sim")]
#[command(about = "Walk a hatchery with random eggs and print the resulting save")]
#[command(version)]
struct Cli {
    /// Config file (.ron or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 200)]
    ticks: u32,

    /// Steps added per tick
    #[arg(short, long, default_value_t = 10)]
    steps: u64,

    /// Highest unlocked region
    #[arg(short, long, default_value_t = 1)]
    region: u32,

    /// Overrides the configured RNG seed
    #[arg(long)]
    seed: Option<u64>,
}

/// Every catalog species, native to the region of its tier
fn pokedex_from_catalog(catalog: &HatchCatalog) -> StaticPokedex {
    let mut dex = StaticPokedex::new();
    for egg_type in catalog.egg_types() {
        let Some(table) = catalog.table(egg_type) else {
            continue;
        };
        for (region, tier) in table.iter().enumerate() {
            for name in tier {
                dex = dex.with_species(name, None, region as u32);
            }
        }
    }
    dex
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => HatcheryConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => HatcheryConfig::default(),
    };
    init_tracing(&config.logging);

    let seed = cli.seed.unwrap_or(config.rng_seed);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let catalog = HatchCatalog::default();
    let dex = pokedex_from_catalog(&catalog);
    let mut breeding = Breeding::new(config.breeding.clone(), catalog);
    let mut notifier = TracingNotifier;
    let mut wallet = MemoryWallet::new();

    tracing::info!(seed, ticks = cli.ticks, steps = cli.steps, region = cli.region, "starting simulation");

    let mut hatched = 0usize;
    for _ in 0..cli.ticks {
        if breeding.can_accept() {
            if let Err(e) = breeding.add_random_egg(cli.region, &dex, &mut notifier, &mut rng) {
                tracing::debug!(error = %e, "random egg rejected");
            }
        }

        hatched += breeding.tick(cli.steps, &dex).len();
        wallet.gain_amount(&Amount::new(cli.steps, Currency::QuestPoint));

        // ready eggs only auto-hatch while something is queued
        while let Some(slot) = breeding.eggs().iter().position(|egg| egg.can_hatch()) {
            match breeding.hatch_pokemon_egg(slot, &dex) {
                Ok(_) => hatched += 1,
                Err(e) => {
                    tracing::warn!(slot, error = %e, "manual hatch failed");
                    break;
                }
            }
        }

        if breeding.egg_slots() < breeding.eggs().len()
            && wallet.has_amount(&breeding.next_egg_slot_cost())
        {
            breeding
                .buy_egg_slot(&mut wallet, &mut notifier)
                .context("buying egg slot")?;
            tracing::info!(egg_slots = breeding.egg_slots(), "bought egg slot");
        }
    }

    tracing::info!(hatched, "simulation finished");

    let save = serde_json::to_string_pretty(&breeding.to_save())
        .context("serializing breeding save")?;
    println!("{save}");
    Ok(())
}
