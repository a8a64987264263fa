//! The assembled, read-only routing input and per-edge cost resolution.

use ev_core::VillageId;
use ev_fuzzy::FuzzyCostModel;

use crate::graph::{RoadGraph, RoadGraphBuilder};
use crate::segments::{DistanceRecords, RoadSegmentSample, SegmentTable};
use crate::village::VillageTable;
use crate::{NetworkError, NetworkResult};

/// Cost per kilometre when a destination has no segment samples.
pub const FALLBACK_COST_PER_KM: f64 = 0.5;

/// Assumed speed (km/h) when a destination has no segment samples.
pub const FALLBACK_SPEED_KMH: f64 = 30.0;

/// Cost and time of traversing one edge (or one village's approach road).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeCost {
    pub cost:     f64,
    pub time_min: f64,
}

/// Villages, adjacency, measurements, distance records and the cost model.
///
/// Immutable once built; share it behind an `Arc` (see
/// [`NetworkHandle`](crate::NetworkHandle)) if it must be replaced at runtime.
pub struct EvacNetwork {
    villages:  VillageTable,
    graph:     RoadGraph,
    segments:  SegmentTable,
    distances: DistanceRecords,
    model:     FuzzyCostModel,
    centre:    Option<VillageId>,
}

impl EvacNetwork {
    pub fn villages(&self) -> &VillageTable {
        &self.villages
    }

    pub fn graph(&self) -> &RoadGraph {
        &self.graph
    }

    pub fn segments(&self) -> &SegmentTable {
        &self.segments
    }

    pub fn distances(&self) -> &DistanceRecords {
        &self.distances
    }

    pub fn model(&self) -> &FuzzyCostModel {
        &self.model
    }

    /// The evacuation centre, if the input designates one.
    pub fn centre(&self) -> Option<VillageId> {
        self.centre
    }

    /// Villages a user may evacuate from: everything but the centre.
    pub fn selectable(&self) -> impl Iterator<Item = VillageId> + '_ {
        self.villages.ids().filter(move |&id| Some(id) != self.centre)
    }

    /// Fuzzy cost of one sample.
    #[inline]
    pub fn sample_cost(&self, s: &RoadSegmentSample) -> f64 {
        self.model.evaluate(s.slope, s.travel_time, s.curvature)
    }

    /// Sum of sample costs and sample times for `village`'s approach road,
    /// or `None` if it has no samples.
    ///
    /// Summed, not averaged: more measured segments means more cost.
    pub fn aggregate(&self, village: VillageId) -> Option<EdgeCost> {
        let samples = self.segments.samples(village);
        if samples.is_empty() {
            return None;
        }
        Some(samples.iter().fold(EdgeCost::default(), |acc, s| EdgeCost {
            cost:     acc.cost + self.sample_cost(s),
            time_min: acc.time_min + s.travel_time,
        }))
    }

    /// Cost and time of moving from `from` to `to`.
    ///
    /// Uses `to`'s segment samples when present, otherwise the great-circle
    /// distance: `0.5 · km` cost and `km / 30 km/h` time.  Distance records
    /// play no part.
    pub fn edge_cost(&self, from: VillageId, to: VillageId) -> EdgeCost {
        if let Some(agg) = self.aggregate(to) {
            return agg;
        }
        let km = self.villages.pos(from).distance_km(self.villages.pos(to));
        EdgeCost {
            cost:     km * FALLBACK_COST_PER_KM,
            time_min: km / FALLBACK_SPEED_KMH * 60.0,
        }
    }

    /// Shortest recorded path length for `village`, for display.
    pub fn reported_distance_km(&self, village: VillageId) -> Option<f64> {
        self.distances.shortest(village)
    }
}

// ── EvacNetworkBuilder ────────────────────────────────────────────────────────

/// Assemble an [`EvacNetwork`] around a finished [`VillageTable`].
///
/// Every id passed in is checked against the table, so the built network
/// never references a missing village.
///
/// ```
/// use ev_core::GeoPoint;
/// use ev_network::{EvacNetworkBuilder, RoadSegmentSample, VillageTableBuilder};
///
/// let mut v = VillageTableBuilder::new();
/// let a = v.add("A", GeoPoint::new(0.0, 0.0)).unwrap();
/// let b = v.add("B", GeoPoint::new(0.0, 1.0)).unwrap();
///
/// let mut nb = EvacNetworkBuilder::new(v.build());
/// nb.add_road(a, b).unwrap();
/// nb.set_samples(b, vec![RoadSegmentSample::new(0.0, 5.0, 0.1)]).unwrap();
/// let net = nb.build();
/// assert_eq!(net.edge_cost(a, b).time_min, 5.0);
/// ```
pub struct EvacNetworkBuilder {
    villages:  VillageTable,
    graph:     RoadGraphBuilder,
    segments:  SegmentTable,
    distances: DistanceRecords,
    model:     Option<FuzzyCostModel>,
    centre:    Option<VillageId>,
}

impl EvacNetworkBuilder {
    pub fn new(villages: VillageTable) -> Self {
        let n = villages.len();
        Self {
            villages,
            graph:     RoadGraphBuilder::new(n),
            segments:  SegmentTable::new(n),
            distances: DistanceRecords::new(n),
            model:     None,
            centre:    None,
        }
    }

    pub fn villages(&self) -> &VillageTable {
        &self.villages
    }

    fn check(&self, id: VillageId) -> NetworkResult<()> {
        if self.villages.contains(id) {
            Ok(())
        } else {
            Err(NetworkError::UnknownVillage(id))
        }
    }

    pub fn add_directed_edge(&mut self, from: VillageId, to: VillageId) -> NetworkResult<()> {
        self.check(from)?;
        self.check(to)?;
        self.graph.add_directed_edge(from, to);
        Ok(())
    }

    pub fn add_road(&mut self, a: VillageId, b: VillageId) -> NetworkResult<()> {
        self.check(a)?;
        self.check(b)?;
        self.graph.add_road(a, b);
        Ok(())
    }

    /// Connect `hub` to every other village in both directions.
    pub fn add_star(&mut self, hub: VillageId) -> NetworkResult<()> {
        self.check(hub)?;
        let others: Vec<_> = self.villages.ids().filter(|&id| id != hub).collect();
        for id in others {
            self.graph.add_road(hub, id);
        }
        Ok(())
    }

    pub fn set_samples(&mut self, village: VillageId, samples: Vec<RoadSegmentSample>) -> NetworkResult<()> {
        self.check(village)?;
        self.segments.set(village, samples);
        Ok(())
    }

    pub fn add_distance(&mut self, village: VillageId, km: f64) -> NetworkResult<()> {
        self.check(village)?;
        self.distances.push(village, km);
        Ok(())
    }

    pub fn centre(&mut self, village: VillageId) -> NetworkResult<()> {
        self.check(village)?;
        self.centre = Some(village);
        Ok(())
    }

    /// Replace the standard fuzzy model.
    pub fn model(&mut self, model: FuzzyCostModel) {
        self.model = Some(model);
    }

    pub fn build(self) -> EvacNetwork {
        EvacNetwork {
            villages:  self.villages,
            graph:     self.graph.build(),
            segments:  self.segments,
            distances: self.distances,
            model:     self.model.unwrap_or_default(),
            centre:    self.centre,
        }
    }
}
