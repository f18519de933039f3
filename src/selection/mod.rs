//! Weighted tier selection.
//!
//! Hatch tables are ordered by discovery rank: index 0 is the earliest
//! region, the last index is the most recently unlocked one. The selector
//! favours the newest tier and decays geometrically towards older ones:
//!
//! - last tier: `1 / ratio`
//! - second to last: `1 / ratio^2`
//! - ...
//! - tier 0 takes whatever probability is left
//!
//! With `ratio = 2` the two oldest tiers end up with the same chance.

use rand::seq::SliceRandom;
use rand::Rng;

/// Probability of each tier being picked by [`exp_random_element`]
pub fn tier_weights(len: usize, ratio: f64) -> Vec<f64> {
    if len == 0 {
        return Vec::new();
    }

    let mut weights = vec![0.0; len];
    let mut remaining = 1.0;
    for rank in 0..len - 1 {
        let p = ratio.powi(-(rank as i32 + 1));
        weights[len - 1 - rank] = p;
        remaining -= p;
    }
    weights[0] = remaining.max(0.0);
    weights
}

/// Pick one element, newest first with geometrically decaying odds.
///
/// Returns `None` only for an empty slice.
pub fn exp_random_element<'a, T, R>(items: &'a [T], ratio: f64, rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    let len = items.len();
    if len == 0 {
        return None;
    }

    let roll: f64 = rng.gen();
    let mut accumulated = 0.0;
    for rank in 0..len - 1 {
        accumulated += ratio.powi(-(rank as i32 + 1));
        if roll < accumulated {
            return items.get(len - 1 - rank);
        }
    }

    items.first()
}

/// Uniform pick
pub fn random_element<'a, T, R>(items: &'a [T], rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    items.choose(rng)
}

/// Pick a tier with [`exp_random_element`], then an entry of that tier uniformly.
///
/// Empty tiers must already be filtered out by the caller.
pub fn select_from_tiers<'a, T, R>(tiers: &[&'a [T]], ratio: f64, rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    let tier = exp_random_element(tiers, ratio, rng)?;
    random_element(*tier, rng)
}
