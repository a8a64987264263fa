//! Pluggable remaining-cost estimates for [`RouteSearch`](crate::RouteSearch).
//!
//! # Units
//!
//! Edge costs are fuzzy scores (each sample contributes at most 0.9) while
//! [`HaversineHeuristic`] returns kilometres.  Adding the two in `f = g + h`
//! is not dimensionally consistent and can make the estimate overshoot, so
//! the search is best-first rather than provably optimal.  That behaviour is
//! kept as the default for result compatibility; [`ScaledHaversine`] and
//! [`ZeroHeuristic`] are drop-in replacements that do not touch the loop.

use ev_core::VillageId;

use crate::network::EvacNetwork;

/// Estimate of remaining cost from `from` to the nearest of `goals`.
pub trait Heuristic {
    fn estimate(&self, network: &EvacNetwork, from: VillageId, goals: &[VillageId]) -> f64;
}

/// Great-circle kilometres to the nearest goal, used as raw cost units.
#[derive(Copy, Clone, Debug, Default)]
pub struct HaversineHeuristic;

impl Heuristic for HaversineHeuristic {
    fn estimate(&self, network: &EvacNetwork, from: VillageId, goals: &[VillageId]) -> f64 {
        nearest_goal_km(network, from, goals)
    }
}

/// Great-circle kilometres scaled by `cost_per_km`.
///
/// With `cost_per_km` no larger than the cheapest cost per kilometre any edge
/// can have, the estimate never overshoots.
#[derive(Copy, Clone, Debug)]
pub struct ScaledHaversine {
    pub cost_per_km: f64,
}

impl Heuristic for ScaledHaversine {
    fn estimate(&self, network: &EvacNetwork, from: VillageId, goals: &[VillageId]) -> f64 {
        nearest_goal_km(network, from, goals) * self.cost_per_km
    }
}

/// Always `0`; the search degenerates to uniform-cost search.
#[derive(Copy, Clone, Debug, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _: &EvacNetwork, _: VillageId, _: &[VillageId]) -> f64 {
        0.0
    }
}

fn nearest_goal_km(network: &EvacNetwork, from: VillageId, goals: &[VillageId]) -> f64 {
    let here = network.villages().pos(from);
    goals
        .iter()
        .map(|&g| here.distance_km(network.villages().pos(g)))
        .reduce(f64::min)
        .unwrap_or(0.0)
}
