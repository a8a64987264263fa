//! Data-folder discovery and one-shot loading.
//!
//! A data folder holds:
//!
//! - one `*.kml` file with the route polylines (the first in sorted order is
//!   used);
//! - any number of `*_to_<Village>` measurement tables, as `.csv`, `.xlsx`
//!   or `.xls`;
//! - optionally `villages.csv` + `roads.csv` (+ `distances.csv`), which
//!   replace the built-in Leon topology.
//!
//! ```text
//! data/
//! ├── completeroad.kml
//! ├── Poblacion_to_Bacolod.csv
//! ├── Poblacion_to_Bobon2.xlsx
//! └── …
//! ```

use std::path::{Path, PathBuf};

use log::{info, warn};

use ev_network::{EvacNetwork, EvacNetworkBuilder};

use crate::curvature::{CurvatureSource, SeededCurvature};
use crate::geometry::{load_kml, RouteGeometry};
use crate::report::LoadReport;
use crate::segments::{load_segment_files, SegmentData};
use crate::topology::Topology;
use crate::{leon, DataError, DataResult};

const VILLAGES_FILE:  &str = "villages.csv";
const ROADS_FILE:     &str = "roads.csv";
const DISTANCES_FILE: &str = "distances.csv";

/// Measurement table formats picked up from a data folder.
const TABLE_EXTENSIONS: [&str; 3] = ["csv", "xlsx", "xls"];

/// Knobs for [`load_dir`].
#[derive(Copy, Clone, Debug)]
pub struct LoadOptions {
    /// Seed for synthesised curvature.
    pub curvature_seed: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { curvature_seed: SeededCurvature::DEFAULT_SEED }
    }
}

/// Everything loaded from one data folder.
pub struct Dataset {
    pub network:         EvacNetwork,
    pub geometry:        RouteGeometry,
    pub geometry_report: LoadReport,
    pub segment_report:  LoadReport,
}

/// Attach name-keyed samples to a builder.
///
/// Names are matched case-insensitively against the village table; samples
/// for villages not in the table are dropped with a warning and counted as
/// skipped in the returned report.
pub fn attach_segments(nb: &mut EvacNetworkBuilder, data: SegmentData) -> DataResult<LoadReport> {
    let mut report = LoadReport::default();
    for (name, samples) in data.by_village {
        match nb.villages().find(&name) {
            Some(id) => {
                nb.set_samples(id, samples)?;
                report.loaded += 1;
            }
            None => {
                warn!("segment data for unknown village {name:?} ignored");
                report.skipped += 1;
            }
        }
    }
    Ok(report)
}

/// Load a data folder with the default seeded curvature source.
pub fn load_dir(dir: &Path, options: LoadOptions) -> DataResult<Dataset> {
    let mut curvature = SeededCurvature::new(options.curvature_seed);
    load_dir_with(dir, &mut curvature)
}

/// Load a data folder with a caller-supplied curvature source.
pub fn load_dir_with(dir: &Path, curvature: &mut dyn CurvatureSource) -> DataResult<Dataset> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .collect();
    entries.sort();

    // Open the entry that matched, not `dir.join(..)`: the match ignores case.
    let find = |name: &str| entries.iter().find(|p| file_name_is(p, name));
    let topology = match (find(VILLAGES_FILE), find(ROADS_FILE)) {
        (Some(villages), Some(roads)) => {
            Topology::from_paths(villages, roads, find(DISTANCES_FILE).map(PathBuf::as_path))?
        }
        (Some(_), None) => {
            return Err(DataError::Config(format!(
                "{} has {VILLAGES_FILE} but no {ROADS_FILE}",
                dir.display()
            )));
        }
        (None, _) => leon::topology()?,
    };
    let mut nb = topology.into_builder()?;

    let kml = entries.iter().find(|p| has_extension(p, "kml"));
    let (geometry, geometry_report) = match kml {
        Some(p) => load_kml(p),
        None => {
            warn!("{}: no .kml file", dir.display());
            (RouteGeometry::default(), LoadReport::default())
        }
    };

    let tables: Vec<PathBuf> = entries
        .iter()
        .filter(|p| TABLE_EXTENSIONS.iter().any(|ext| has_extension(p, ext)))
        .filter(|p| ![VILLAGES_FILE, ROADS_FILE, DISTANCES_FILE].iter().any(|n| file_name_is(p, n)))
        .cloned()
        .collect();
    let (data, mut segment_report) = load_segment_files(&tables, curvature);
    let attached = attach_segments(&mut nb, data)?;
    segment_report.loaded = attached.loaded;
    segment_report.skipped += attached.skipped;

    let network = nb.build();
    info!(
        "{}: {} villages, {} roads, {} with segment data, {} route paths",
        dir.display(),
        network.villages().len(),
        network.graph().edge_count(),
        network.segments().villages_with_data(),
        geometry.len()
    );

    Ok(Dataset { network, geometry, geometry_report, segment_report })
}

fn has_extension(p: &Path, ext: &str) -> bool {
    p.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

fn file_name_is(p: &Path, name: &str) -> bool {
    p.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.eq_ignore_ascii_case(name))
}
