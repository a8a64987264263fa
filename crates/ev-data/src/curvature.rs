//! Where per-row curvature comes from.
//!
//! The measurement tables carry slope and travel time but no curvature.
//! Rather than an unseeded draw per row, curvature is taken from an
//! injectable source.  [`SeededCurvature`] reproduces the uniform `[0, 1)`
//! distribution deterministically: each village gets its own stream derived
//! from `(seed, village name)`, so adding or reordering files does not change
//! any other village's values.

use std::collections::HashMap;

use ev_core::rng::stable_key;
use ev_core::SeededRng;

/// Supplies curvature for rows that lack a curvature column.
pub trait CurvatureSource {
    /// Curvature for the next accepted row of `village`'s table.
    fn next_curvature(&mut self, village: &str) -> f64;
}

/// Uniform `[0, 1)` from a per-village seeded stream.
pub struct SeededCurvature {
    seed:    u64,
    streams: HashMap<String, SeededRng>,
}

impl SeededCurvature {
    pub const DEFAULT_SEED: u64 = 42;

    pub fn new(seed: u64) -> Self {
        Self { seed, streams: HashMap::new() }
    }
}

impl Default for SeededCurvature {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

impl CurvatureSource for SeededCurvature {
    fn next_curvature(&mut self, village: &str) -> f64 {
        let seed = self.seed;
        self.streams
            .entry(village.to_lowercase())
            .or_insert_with_key(|k| SeededRng::child(seed, stable_key(k)))
            .unit()
    }
}

/// The same curvature for every row.
#[derive(Copy, Clone, Debug)]
pub struct FixedCurvature(pub f64);

impl CurvatureSource for FixedCurvature {
    fn next_curvature(&mut self, _village: &str) -> f64 {
        self.0
    }
}
