//! Village set, adjacency and distance records from CSV.
//!
//! # CSV formats
//!
//! ```csv
//! name,lat,lon,centre
//! Poblacion,10.7848,122.3837,true
//! Bobon,10.8954,122.2974,
//! ```
//!
//! ```csv
//! from,to,one_way
//! Poblacion,Bobon,
//! ```
//!
//! ```csv
//! village,distance_km
//! Bobon,24.4
//! Bobon,29.1
//! ```
//!
//! `centre` and `one_way` are optional columns; `true`, `yes` or `1` set
//! them.  Each road row is two-way unless `one_way` is set.  Any malformed
//! row or unknown village name is an error: these files define the
//! reference set that everything else is checked against.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use ev_core::GeoPoint;
use ev_network::{EvacNetworkBuilder, VillageTableBuilder};

use crate::{DataError, DataResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct VillageRecord {
    name: String,
    lat:  f64,
    lon:  f64,
    #[serde(default)]
    centre: Option<String>,
}

#[derive(Deserialize)]
struct RoadRecord {
    from: String,
    to:   String,
    #[serde(default)]
    one_way: Option<String>,
}

#[derive(Deserialize)]
struct DistanceRecord {
    village:     String,
    distance_km: f64,
}

// ── Topology ──────────────────────────────────────────────────────────────────

/// One village row.
#[derive(Clone, Debug, PartialEq)]
pub struct VillageRow {
    pub name:   String,
    pub pos:    GeoPoint,
    pub centre: bool,
}

/// One road row.
#[derive(Clone, Debug, PartialEq)]
pub struct RoadRow {
    pub from:    String,
    pub to:      String,
    pub one_way: bool,
}

/// Parsed topology configuration, names not yet resolved.
#[derive(Clone, Debug, Default)]
pub struct Topology {
    pub villages:  Vec<VillageRow>,
    pub roads:     Vec<RoadRow>,
    pub distances: Vec<(String, f64)>,
}

impl Topology {
    /// Read the three files.  `distances` is optional.
    pub fn from_paths(villages: &Path, roads: &Path, distances: Option<&Path>) -> DataResult<Self> {
        let open = |p: &Path| std::fs::File::open(p).map_err(DataError::Io);
        Ok(Self {
            villages:  read_villages(open(villages)?, &villages.display().to_string())?,
            roads:     read_roads(open(roads)?, &roads.display().to_string())?,
            distances: match distances {
                Some(p) => read_distances(open(p)?, &p.display().to_string())?,
                None => Vec::new(),
            },
        })
    }

    /// Resolve names and produce a network builder with villages, roads,
    /// distances and the centre filled in.
    pub fn into_builder(self) -> DataResult<EvacNetworkBuilder> {
        let mut vb = VillageTableBuilder::new();
        let mut centre = None;
        for row in &self.villages {
            let id = vb.add(&row.name, row.pos)?;
            if row.centre {
                if centre.is_some() {
                    return Err(DataError::Config(format!(
                        "more than one centre village (second: {:?})",
                        row.name
                    )));
                }
                centre = Some(id);
            }
        }

        let mut nb = EvacNetworkBuilder::new(vb.build());
        let resolve = |nb: &EvacNetworkBuilder, file: &str, name: &str| {
            nb.villages().find(name).ok_or_else(|| DataError::UnknownVillage {
                file: file.to_string(),
                name: name.to_string(),
            })
        };

        for road in &self.roads {
            let from = resolve(&nb, "roads", &road.from)?;
            let to = resolve(&nb, "roads", &road.to)?;
            if road.one_way {
                nb.add_directed_edge(from, to)?;
            } else {
                nb.add_road(from, to)?;
            }
        }
        for (name, km) in &self.distances {
            let id = resolve(&nb, "distances", name)?;
            nb.add_distance(id, *km)?;
        }
        if let Some(c) = centre {
            nb.centre(c)?;
        }
        Ok(nb)
    }
}

// ── Readers ───────────────────────────────────────────────────────────────────

/// `name,lat,lon[,centre]` rows.
pub fn read_villages<R: Read>(reader: R, label: &str) -> DataResult<Vec<VillageRow>> {
    rows::<VillageRecord, _>(reader, label)?
        .into_iter()
        .map(|r| {
            Ok(VillageRow {
                name:   r.name.trim().to_string(),
                pos:    GeoPoint::new(r.lat, r.lon),
                centre: flag(r.centre.as_deref()),
            })
        })
        .collect()
}

/// `from,to[,one_way]` rows.
pub fn read_roads<R: Read>(reader: R, label: &str) -> DataResult<Vec<RoadRow>> {
    Ok(rows::<RoadRecord, _>(reader, label)?
        .into_iter()
        .map(|r| RoadRow {
            from:    r.from.trim().to_string(),
            to:      r.to.trim().to_string(),
            one_way: flag(r.one_way.as_deref()),
        })
        .collect())
}

/// `village,distance_km` rows.  Negative or non-finite lengths are errors.
pub fn read_distances<R: Read>(reader: R, label: &str) -> DataResult<Vec<(String, f64)>> {
    rows::<DistanceRecord, _>(reader, label)?
        .into_iter()
        .map(|r| {
            if !r.distance_km.is_finite() || r.distance_km < 0.0 {
                return Err(DataError::Parse {
                    file:    label.to_string(),
                    message: format!("invalid distance {} for {:?}", r.distance_km, r.village),
                });
            }
            Ok((r.village.trim().to_string(), r.distance_km))
        })
        .collect()
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn rows<T: for<'de> Deserialize<'de>, R: Read>(reader: R, label: &str) -> DataResult<Vec<T>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    csv_reader
        .deserialize::<T>()
        .map(|row| {
            row.map_err(|e| DataError::Parse { file: label.to_string(), message: e.to_string() })
        })
        .collect()
}

fn flag(s: Option<&str>) -> bool {
    matches!(
        s.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("true" | "yes" | "1")
    )
}
