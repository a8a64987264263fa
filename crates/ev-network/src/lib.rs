//! `ev-network` — villages, road graph, edge costs, and route search.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`village`]   | `VillageTable` (names + R-tree), `VillageTableBuilder`, query matching |
//! | [`graph`]     | `RoadGraph` (CSR adjacency), `RoadGraphBuilder`               |
//! | [`segments`]  | `RoadSegmentSample`, `SegmentTable`, `DistanceRecords`        |
//! | [`network`]   | `EvacNetwork`, `EvacNetworkBuilder`, `EdgeCost`               |
//! | [`heuristic`] | `Heuristic` trait, `HaversineHeuristic`, `ScaledHaversine`, `ZeroHeuristic` |
//! | [`search`]    | `RouteSearch`, `SearchConfig`, `RouteOutcome`                 |
//! | [`handle`]    | `NetworkHandle` (atomic snapshot publishing)                  |
//! | [`error`]     | `NetworkError`, `NetworkResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public value types.     |

pub mod error;
pub mod graph;
pub mod handle;
pub mod heuristic;
pub mod network;
pub mod search;
pub mod segments;
pub mod village;

#[cfg(test)]
mod tests;

pub use error::{NetworkError, NetworkResult};
pub use graph::{RoadGraph, RoadGraphBuilder};
pub use handle::NetworkHandle;
pub use heuristic::{HaversineHeuristic, Heuristic, ScaledHaversine, ZeroHeuristic};
pub use network::{EdgeCost, EvacNetwork, EvacNetworkBuilder};
pub use search::{RouteKind, RouteOutcome, RouteSearch, SearchConfig};
pub use segments::{DistanceRecords, RoadSegmentSample, SegmentTable};
pub use village::{matches_query, Village, VillageTable, VillageTableBuilder};
