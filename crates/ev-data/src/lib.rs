//! `ev-data` — everything that turns files into an `EvacNetwork`.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`geometry`]  | `RouteGeometry`, `parse_kml`, `load_kml`                     |
//! | [`segments`]  | `SegmentData`, `destination_from_file_name`, CSV/Excel parsing |
//! | [`curvature`] | `CurvatureSource`, `SeededCurvature`, `FixedCurvature`       |
//! | [`topology`]  | `Topology`, villages / roads / distances CSV readers         |
//! | [`leon`]      | Built-in Leon, Iloilo scenario                               |
//! | [`dataset`]   | `Dataset`, `load_dir` (data-folder discovery)                |
//! | [`report`]    | `LoadReport`                                                 |
//! | [`error`]     | `DataError`, `DataResult<T>`                                 |
//!
//! # Error policy
//!
//! Topology files define the village set itself, so a malformed row there is
//! a [`DataError`].  Geometry and measurement input is lenient: bad records
//! are skipped and counted in a [`LoadReport`], and loading continues.

pub mod curvature;
pub mod dataset;
pub mod error;
pub mod geometry;
pub mod leon;
pub mod report;
pub mod segments;
pub mod topology;


pub use curvature::{CurvatureSource, FixedCurvature, SeededCurvature};
pub use dataset::{attach_segments, load_dir, load_dir_with, Dataset, LoadOptions};
pub use error::{DataError, DataResult};
pub use geometry::{load_kml, parse_kml, RouteGeometry};
pub use report::LoadReport;
pub use segments::{
    destination_from_file_name, load_segment_files, parse_segment_sheet, parse_segment_table,
    SegmentData,
};
pub use topology::Topology;
