//! Best-first route search over an [`EvacNetwork`].
//!
//! # Algorithm
//!
//! A*-style: the frontier is ordered by `f = g + h`, where `g` is the summed
//! [`edge_cost`](EvacNetwork::edge_cost) from the start and `h` comes from a
//! pluggable [`Heuristic`].  The search does not stop at the first village
//! matching the goal query.  Every time a goal village is popped it is
//! recorded as a candidate (goals are never expanded), and the loop runs
//! until the frontier is empty.  The cheapest candidate wins; among equal
//! costs the one popped first wins.
//!
//! If no candidate is found but a goal village has segment samples, its
//! summed sample cost is returned directly as a [`RouteKind::Direct`] route.
//!
//! # Determinism
//!
//! Frontier ties on `f` are broken by push order, and neighbours are expanded
//! in graph insertion order, so identical inputs give identical outputs.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::{debug, warn};

use ev_core::VillageId;

use crate::heuristic::{HaversineHeuristic, Heuristic};
use crate::network::EvacNetwork;

// ── Config ────────────────────────────────────────────────────────────────────

/// Limits for one search.
#[derive(Copy, Clone, Debug)]
pub struct SearchConfig {
    /// Frontier pops before the search gives up and returns what it has.
    pub max_expansions: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_expansions: 10_000 }
    }
}

// ── Outcome ───────────────────────────────────────────────────────────────────

/// How a [`RouteOutcome`] was obtained.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RouteKind {
    /// Found by graph search.
    Graph,
    /// No graph route; the goal's own samples were summed directly.
    Direct,
}

/// A completed route.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteOutcome {
    /// The village that satisfied the goal query.
    pub village:     VillageId,
    pub cost:        f64,
    pub time_min:    f64,
    /// Shortest recorded path length for `village`, if any.
    pub distance_km: Option<f64>,
    /// Start first, `village` last.
    pub path:        Vec<VillageId>,
    pub kind:        RouteKind,
}

impl RouteOutcome {
    /// `true` for the zero-length route from a start that already matches.
    pub fn is_trivial(&self) -> bool {
        self.path.len() == 1
    }
}

// ── Frontier entry ────────────────────────────────────────────────────────────

struct Entry {
    f:       f64,
    g:       f64,
    time:    f64,
    village: VillageId,
    path:    Vec<VillageId>,
    seq:     u64,
}

// `BinaryHeap` is a max-heap: flip `f` so the lowest estimate pops first, then
// prefer the earlier push.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

// ── RouteSearch ───────────────────────────────────────────────────────────────

/// Stateless search engine bound to a network and a heuristic.
///
/// Each call allocates its own frontier, best-cost map and closed set;
/// nothing is cached between calls.
pub struct RouteSearch<'n, H: Heuristic = HaversineHeuristic> {
    network:   &'n EvacNetwork,
    heuristic: H,
    config:    SearchConfig,
}

impl<'n> RouteSearch<'n, HaversineHeuristic> {
    pub fn new(network: &'n EvacNetwork) -> Self {
        Self::with_heuristic(network, HaversineHeuristic)
    }
}

impl<'n, H: Heuristic> RouteSearch<'n, H> {
    pub fn with_heuristic(network: &'n EvacNetwork, heuristic: H) -> Self {
        Self { network, heuristic, config: SearchConfig::default() }
    }

    pub fn config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Best route from the village named `start` to any village matching
    /// `goal_query`.
    ///
    /// `None` when `start` is not a known village, nothing matches the query,
    /// or no goal is reachable and none has samples to fall back on.
    pub fn best_route(&self, start: &str, goal_query: &str) -> Option<RouteOutcome> {
        let start = self.network.villages().find(start)?;
        self.best_route_from(start, goal_query)
    }

    /// As [`best_route`](Self::best_route) with a resolved start.
    pub fn best_route_from(&self, start: VillageId, goal_query: &str) -> Option<RouteOutcome> {
        if !self.network.villages().contains(start) {
            return None;
        }
        let goals: Vec<VillageId> = self.network.villages().matching(goal_query).collect();
        if goals.is_empty() {
            debug!("no village matches {goal_query:?}");
            return None;
        }

        let candidates = self.search(start, &goals);
        let mut best: Option<RouteOutcome> = None;
        for c in candidates {
            if best.as_ref().is_none_or(|b| c.cost < b.cost) {
                best = Some(c);
            }
        }
        best.or_else(|| self.direct(start, &goals))
    }

    /// Every candidate the graph search recorded, cheapest first (stable on
    /// ties).  Does not include the direct fallback.
    pub fn candidates(&self, start: VillageId, goal_query: &str) -> Vec<RouteOutcome> {
        if !self.network.villages().contains(start) {
            return Vec::new();
        }
        let goals: Vec<VillageId> = self.network.villages().matching(goal_query).collect();
        if goals.is_empty() {
            return Vec::new();
        }
        let mut all = self.search(start, &goals);
        all.sort_by(|a, b| a.cost.total_cmp(&b.cost));
        all
    }

    fn search(&self, start: VillageId, goals: &[VillageId]) -> Vec<RouteOutcome> {
        let net = self.network;
        let n = net.villages().len();

        let mut is_goal = vec![false; n];
        for g in goals {
            is_goal[g.index()] = true;
        }

        // best_g[v] = cheapest known cost to reach v.
        let mut best_g = vec![f64::INFINITY; n];
        let mut closed = vec![false; n];
        let mut heap: BinaryHeap<Entry> = BinaryHeap::new();
        let mut seq = 0u64;
        let mut candidates = Vec::new();

        best_g[start.index()] = 0.0;
        heap.push(Entry { f: 0.0, g: 0.0, time: 0.0, village: start, path: vec![start], seq });

        let mut expansions = 0usize;
        while let Some(entry) = heap.pop() {
            expansions += 1;
            if expansions > self.config.max_expansions {
                warn!(
                    "route search from {} gave up after {} expansions",
                    net.villages().name(start),
                    self.config.max_expansions
                );
                break;
            }

            let v = entry.village;
            if is_goal[v.index()] {
                debug!(
                    "candidate {} cost={:.4} time={:.2}",
                    net.villages().name(v),
                    entry.g,
                    entry.time
                );
                candidates.push(RouteOutcome {
                    village:     v,
                    cost:        entry.g,
                    time_min:    entry.time,
                    distance_km: net.reported_distance_km(v),
                    path:        entry.path,
                    kind:        RouteKind::Graph,
                });
                continue;
            }

            if closed[v.index()] {
                continue;
            }
            closed[v.index()] = true;

            for &next in net.graph().neighbors(v) {
                if closed[next.index()] {
                    continue;
                }
                let edge = net.edge_cost(v, next);
                let g = entry.g + edge.cost;
                if g < best_g[next.index()] {
                    best_g[next.index()] = g;
                    let mut path = entry.path.clone();
                    path.push(next);
                    seq += 1;
                    heap.push(Entry {
                        f: g + self.heuristic.estimate(net, next, goals),
                        g,
                        time: entry.time + edge.time_min,
                        village: next,
                        path,
                        seq,
                    });
                }
            }
        }

        candidates
    }

    /// Cheapest goal by its own summed samples, ignoring the graph.
    fn direct(&self, start: VillageId, goals: &[VillageId]) -> Option<RouteOutcome> {
        let net = self.network;
        let mut best: Option<(VillageId, f64, f64)> = None;
        for &g in goals {
            let Some(agg) = net.aggregate(g) else { continue };
            if best.is_none_or(|(_, cost, _)| agg.cost < cost) {
                best = Some((g, agg.cost, agg.time_min));
            }
        }
        let (village, cost, time_min) = best?;
        debug!("no graph route to {}; using direct samples", net.villages().name(village));

        let path = if village == start { vec![start] } else { vec![start, village] };
        Some(RouteOutcome {
            village,
            cost,
            time_min,
            distance_km: net.reported_distance_km(village),
            path,
            kind: RouteKind::Direct,
        })
    }
}
