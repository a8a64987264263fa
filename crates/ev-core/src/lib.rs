//! `ev-core` — foundational types for the Leon evacuation route planner.
//!
//! This crate is a dependency of every other `ev-*` crate.  It has no `ev-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`ids`]     | `VillageId`                                           |
//! | [`geo`]     | `GeoPoint`, haversine distance in kilometres          |
//! | [`rng`]     | `SeededRng` (deterministic, seedable)                 |
//! | [`error`]   | `EvError`, `EvResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{EvError, EvResult};
pub use geo::{GeoPoint, EARTH_RADIUS_KM};
pub use ids::VillageId;
pub use rng::SeededRng;
