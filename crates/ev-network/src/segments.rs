//! Per-destination road measurements and recorded path lengths.

use ev_core::VillageId;

/// One measured stretch of a destination's approach road.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadSegmentSample {
    /// Signed degrees, nominally `[-10, 10]`; not clamped.
    pub slope:       f64,
    /// Minutes, nominally `[0, 30]`.
    pub travel_time: f64,
    /// Unitless, `[0, 1]`.
    pub curvature:   f64,
}

impl RoadSegmentSample {
    pub fn new(slope: f64, travel_time: f64, curvature: f64) -> Self {
        Self { slope, travel_time, curvature }
    }
}

/// Samples indexed by destination village.  Empty means "no data".
#[derive(Clone, Debug, Default)]
pub struct SegmentTable {
    by_village: Vec<Vec<RoadSegmentSample>>,
}

impl SegmentTable {
    pub fn new(village_count: usize) -> Self {
        Self { by_village: vec![Vec::new(); village_count] }
    }

    /// Replace the samples recorded for `village`.
    pub fn set(&mut self, village: VillageId, samples: Vec<RoadSegmentSample>) {
        if let Some(slot) = self.by_village.get_mut(village.index()) {
            *slot = samples;
        }
    }

    pub fn samples(&self, village: VillageId) -> &[RoadSegmentSample] {
        self.by_village
            .get(village.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_samples(&self, village: VillageId) -> bool {
        !self.samples(village).is_empty()
    }

    /// Number of villages with at least one sample.
    pub fn villages_with_data(&self) -> usize {
        self.by_village.iter().filter(|s| !s.is_empty()).count()
    }
}

/// Known alternative path lengths (km) per village.  Reporting only; never
/// a search cost.
#[derive(Clone, Debug, Default)]
pub struct DistanceRecords {
    by_village: Vec<Vec<f64>>,
}

impl DistanceRecords {
    pub fn new(village_count: usize) -> Self {
        Self { by_village: vec![Vec::new(); village_count] }
    }

    pub fn push(&mut self, village: VillageId, km: f64) {
        if let Some(slot) = self.by_village.get_mut(village.index()) {
            slot.push(km);
        }
    }

    /// All recorded alternatives, in input order.
    pub fn alternatives(&self, village: VillageId) -> &[f64] {
        self.by_village
            .get(village.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Shortest recorded alternative, or `None` if there is no record.
    pub fn shortest(&self, village: VillageId) -> Option<f64> {
        self.alternatives(village).iter().copied().reduce(f64::min)
    }
}
