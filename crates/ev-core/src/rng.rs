//! Deterministic, seedable RNG wrapper.
//!
//! Road-segment curvature is not measured in the source tables, so it is
//! synthesised.  Drawing it from a seeded `SmallRng` keeps every route
//! evaluation reproducible for a given seed; two loads with the same seed and
//! the same files yield bit-identical samples.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded RNG for load-time synthesis (curvature and similar).
///
/// Used only in single-threaded contexts.  Derive children with
/// [`child`](Self::child) when independent streams are needed, e.g. one per
/// village so that adding a file does not shift the others' values.
pub struct SeededRng(SmallRng);

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        SeededRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child stream from a root seed and a stable key.
    ///
    /// Unlike drawing from a shared stream, the child's sequence depends only
    /// on `(seed, key)`.
    pub fn child(seed: u64, key: u64) -> SeededRng {
        SeededRng(SmallRng::seed_from_u64(seed ^ key.wrapping_mul(MIXING_CONSTANT)))
    }

    /// Uniform value in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}

/// Stable 64-bit key for a string (FNV-1a), used to derive per-name streams.
pub fn stable_key(s: &str) -> u64 {
    let mut h: u64 = 0xcbf2_9ce4_8422_2325;
    for b in s.bytes() {
        h ^= b as u64;
        h = h.wrapping_mul(0x0000_0100_0000_01b3);
    }
    h
}
