//! The fixed village reference set.
//!
//! Names are matched case-insensitively.  An R-tree (via `rstar`) maps a
//! coordinate to the nearest village, for callers that start from a map click
//! rather than a name.

use std::collections::HashMap;

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use ev_core::{EvError, EvResult, GeoPoint, VillageId};

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct VillageEntry {
    point: [f64; 2], // [lat, lon]
    id:    VillageId,
}

impl RTreeObject for VillageEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for VillageEntry {
    /// Squared Euclidean distance in lat/lon space; villages are a few km
    /// apart, so degree-space ordering is adequate.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── Query matching ────────────────────────────────────────────────────────────

/// `true` if `query` names `village`: case-insensitive equality, or either
/// string contains the other.  A blank query matches nothing.
pub fn matches_query(village: &str, query: &str) -> bool {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return false;
    }
    let v = village.to_lowercase();
    v.contains(&q) || q.contains(&v)
}

// ── VillageTable ──────────────────────────────────────────────────────────────

/// A named village with its coordinate.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Village {
    pub name: String,
    pub pos:  GeoPoint,
}

/// Immutable village set.  Construct with [`VillageTableBuilder`].
pub struct VillageTable {
    villages:    Vec<Village>,
    by_lower:    HashMap<String, VillageId>,
    spatial_idx: RTree<VillageEntry>,
}

impl VillageTable {
    pub fn len(&self) -> usize {
        self.villages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.villages.is_empty()
    }

    pub fn contains(&self, id: VillageId) -> bool {
        id.index() < self.villages.len()
    }

    /// Panics if `id` is out of range; ids come from this table.
    pub fn get(&self, id: VillageId) -> &Village {
        &self.villages[id.index()]
    }

    pub fn name(&self, id: VillageId) -> &str {
        &self.villages[id.index()].name
    }

    pub fn pos(&self, id: VillageId) -> GeoPoint {
        self.villages[id.index()].pos
    }

    /// Exact, case-insensitive lookup.
    pub fn find(&self, name: &str) -> Option<VillageId> {
        self.by_lower.get(&name.trim().to_lowercase()).copied()
    }

    /// Villages satisfying [`matches_query`], in id order.
    pub fn matching<'a>(&'a self, query: &'a str) -> impl Iterator<Item = VillageId> + 'a {
        self.ids().filter(move |&id| matches_query(self.name(id), query))
    }

    pub fn ids(&self) -> impl Iterator<Item = VillageId> + '_ {
        (0..self.villages.len() as u32).map(VillageId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (VillageId, &Village)> + '_ {
        self.villages
            .iter()
            .enumerate()
            .map(|(i, v)| (VillageId(i as u32), v))
    }

    /// Village nearest to `pos`, or `None` for an empty table.
    pub fn nearest(&self, pos: GeoPoint) -> Option<VillageId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lon])
            .map(|e| e.id)
    }
}

// ── VillageTableBuilder ───────────────────────────────────────────────────────

/// Collect villages, then [`build`](Self::build) the immutable table.
///
/// ```
/// use ev_core::GeoPoint;
/// use ev_network::VillageTableBuilder;
///
/// let mut b = VillageTableBuilder::new();
/// let centre = b.add("Poblacion", GeoPoint::new(10.7849, 122.3837)).unwrap();
/// let table = b.build();
/// assert_eq!(table.find("poblacion"), Some(centre));
/// ```
#[derive(Default)]
pub struct VillageTableBuilder {
    villages: Vec<Village>,
    by_lower: HashMap<String, VillageId>,
}

impl VillageTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a village; ids are sequential from 0.  Names must be unique
    /// ignoring case.
    pub fn add(&mut self, name: &str, pos: GeoPoint) -> EvResult<VillageId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EvError::Config("village name is empty".into()));
        }
        let key = name.to_lowercase();
        if self.by_lower.contains_key(&key) {
            return Err(EvError::DuplicateVillage(name.to_string()));
        }
        let id = VillageId::try_from(self.villages.len())
            .map_err(|_| EvError::Config("too many villages".into()))?;
        self.by_lower.insert(key, id);
        self.villages.push(Village { name: name.to_string(), pos });
        Ok(id)
    }

    pub fn find(&self, name: &str) -> Option<VillageId> {
        self.by_lower.get(&name.trim().to_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.villages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.villages.is_empty()
    }

    pub fn build(self) -> VillageTable {
        let entries: Vec<VillageEntry> = self
            .villages
            .iter()
            .enumerate()
            .map(|(i, v)| VillageEntry {
                point: [v.pos.lat, v.pos.lon],
                id:    VillageId(i as u32),
            })
            .collect();

        VillageTable {
            villages:    self.villages,
            by_lower:    self.by_lower,
            spatial_idx: RTree::bulk_load(entries),
        }
    }
}
