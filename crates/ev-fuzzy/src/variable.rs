//! Three-set linguistic variables.

use crate::membership::{interp_membership, Triangle, Universe};

/// Membership degrees of one crisp input in LOW / MEDIUM / HIGH.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grades {
    pub low:    f64,
    pub medium: f64,
    pub high:   f64,
}

/// An input variable partitioned into three overlapping triangular sets,
/// pre-sampled on its universe.
///
/// The sets are named LOW/MEDIUM/HIGH generically; travel time reads them as
/// FAST/AVERAGE/SLOW.
#[derive(Clone, Debug)]
pub struct LinguisticVariable {
    name:   &'static str,
    sets:   [Triangle; 3],
    xs:     Vec<f64>,
    low:    Vec<f64>,
    medium: Vec<f64>,
    high:   Vec<f64>,
}

impl LinguisticVariable {
    pub fn new(name: &'static str, universe: &Universe, low: Triangle, medium: Triangle, high: Triangle) -> Self {
        Self {
            name,
            sets:   [low, medium, high],
            xs:     universe.points().collect(),
            low:    universe.sample(&low),
            medium: universe.sample(&medium),
            high:   universe.sample(&high),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The three defining triangles, `[low, medium, high]`.
    pub fn sets(&self) -> &[Triangle; 3] {
        &self.sets
    }

    /// Sample grid shared by the three sets.
    pub fn grid(&self) -> &[f64] {
        &self.xs
    }

    pub fn fuzzify(&self, x: f64) -> Grades {
        Grades {
            low:    interp_membership(&self.xs, &self.low, x),
            medium: interp_membership(&self.xs, &self.medium, x),
            high:   interp_membership(&self.xs, &self.high, x),
        }
    }
}
