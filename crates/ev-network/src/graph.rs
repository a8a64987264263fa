//! Village adjacency in CSR form.
//!
//! Given a `VillageId v`, its neighbours occupy
//!
//! ```text
//! edge_to[ out_start[v] .. out_start[v+1] ]
//! ```
//!
//! No weights are stored: edge cost is resolved on demand from segment
//! samples or the distance fallback (see [`EvacNetwork::edge_cost`]).
//! Within one source, neighbours keep insertion order so that search
//! expansion order, and therefore tie-breaking, follows the input data.
//!
//! [`EvacNetwork::edge_cost`]: crate::EvacNetwork::edge_cost

use ev_core::VillageId;

/// Directed village graph.  Build with [`RoadGraphBuilder`].
#[derive(Clone, Debug)]
pub struct RoadGraph {
    /// CSR row pointer.  Length = `village_count + 1`.
    pub out_start: Vec<u32>,
    /// Source of each directed edge, sorted by source.
    pub edge_from: Vec<VillageId>,
    /// Destination of each directed edge.
    pub edge_to:   Vec<VillageId>,
}

impl RoadGraph {
    pub fn empty(village_count: usize) -> Self {
        RoadGraphBuilder::new(village_count).build()
    }

    pub fn village_count(&self) -> usize {
        self.out_start.len() - 1
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    /// Neighbours reachable from `v` by one directed edge.
    ///
    /// Out-of-range ids have no neighbours.
    #[inline]
    pub fn neighbors(&self, v: VillageId) -> &[VillageId] {
        if v.index() >= self.village_count() {
            return &[];
        }
        let start = self.out_start[v.index()] as usize;
        let end   = self.out_start[v.index() + 1] as usize;
        &self.edge_to[start..end]
    }

    #[inline]
    pub fn out_degree(&self, v: VillageId) -> usize {
        self.neighbors(v).len()
    }

    pub fn has_edge(&self, from: VillageId, to: VillageId) -> bool {
        self.neighbors(from).contains(&to)
    }
}

/// Accumulate directed edges, then [`build`](Self::build) the CSR arrays.
pub struct RoadGraphBuilder {
    village_count: usize,
    raw_edges:     Vec<(VillageId, VillageId)>,
}

impl RoadGraphBuilder {
    pub fn new(village_count: usize) -> Self {
        Self { village_count, raw_edges: Vec::new() }
    }

    pub fn village_count(&self) -> usize {
        self.village_count
    }

    /// Add a directed edge.  Duplicates and self-loops are ignored.
    pub fn add_directed_edge(&mut self, from: VillageId, to: VillageId) {
        if from == to || self.raw_edges.contains(&(from, to)) {
            return;
        }
        self.raw_edges.push((from, to));
    }

    /// Add edges in both directions.
    pub fn add_road(&mut self, a: VillageId, b: VillageId) {
        self.add_directed_edge(a, b);
        self.add_directed_edge(b, a);
    }

    pub fn edge_count(&self) -> usize {
        self.raw_edges.len()
    }

    /// Edges naming an id `>= village_count` are dropped; callers validate
    /// ids before adding.
    pub fn build(self) -> RoadGraph {
        let n = self.village_count;

        // Stable sort keeps per-source insertion order.
        let mut raw: Vec<_> = self
            .raw_edges
            .into_iter()
            .filter(|(f, t)| f.index() < n && t.index() < n)
            .collect();
        raw.sort_by_key(|(f, _)| f.0);

        let edge_from: Vec<VillageId> = raw.iter().map(|e| e.0).collect();
        let edge_to:   Vec<VillageId> = raw.iter().map(|e| e.1).collect();

        let mut out_start = vec![0u32; n + 1];
        for (f, _) in &raw {
            out_start[f.index() + 1] += 1;
        }
        for i in 1..=n {
            out_start[i] += out_start[i - 1];
        }
        debug_assert_eq!(out_start[n] as usize, edge_to.len());

        RoadGraph { out_start, edge_from, edge_to }
    }
}
