//! Sampling helpers over a seeded `StdRng`.

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Pick one item with probability proportional to its weight.
/// `None` when `items` is empty or the weights are unusable.
pub fn weighted_pick<T: Copy>(items: &[T], weights: &[f64], rng: &mut StdRng) -> Option<T> {
    if items.is_empty() || items.len() != weights.len() {
        return None;
    }
    let dist = WeightedIndex::new(weights).ok()?;
    Some(items[dist.sample(rng)])
}

pub fn uniform_pick<T: Copy>(items: &[T], rng: &mut StdRng) -> Option<T> {
    items.choose(rng).copied()
}

/// Bernoulli trial; `p` is clamped into [0, 1].
pub fn chance(p: f64, rng: &mut StdRng) -> bool {
    if p.is_nan() {
        return false;
    }
    rng.gen_bool(p.clamp(0.0, 1.0))
}
