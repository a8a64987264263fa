//! Route polylines from KML placemarks.
//!
//! Only two things are read from each `<Placemark>`: its direct `<name>`
//! child and the first `<coordinates>` element anywhere beneath it.
//! Coordinates are whitespace-separated `lon,lat[,alt]` tuples and are stored
//! as `(lat, lon)`.
//!
//! | Input problem                       | Effect                          |
//! |-------------------------------------|---------------------------------|
//! | tuple with < 2 numbers / non-numeric| point dropped                   |
//! | placemark without name/coordinates  | record skipped                  |
//! | fewer than 2 valid points           | record skipped                  |
//! | not well-formed XML                 | empty geometry, report `failed` |
//!
//! Namespaces are ignored; matching is on local element names.

use std::collections::BTreeMap;
use std::path::Path;

use log::{info, warn};
use quick_xml::events::Event;
use quick_xml::Reader;

use ev_core::GeoPoint;

use crate::report::LoadReport;

/// Named road polylines, keyed by placemark name.  Independent of the graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RouteGeometry {
    paths: BTreeMap<String, Vec<GeoPoint>>,
}

impl RouteGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, points: Vec<GeoPoint>) {
        self.paths.insert(name.into(), points);
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&[GeoPoint]> {
        self.paths.get(name).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[GeoPoint])> + '_ {
        self.paths.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Polyline for `"<source> to <dest>"`, `"<source>-to-<dest>"` or
    /// `"<source>_to_<dest>"`, compared case-insensitively.
    pub fn path_between(&self, source: &str, dest: &str) -> Option<(&str, &[GeoPoint])> {
        let (s, d) = (source.trim().to_lowercase(), dest.trim().to_lowercase());
        let wanted = [format!("{s} to {d}"), format!("{s}-to-{d}"), format!("{s}_to_{d}")];
        self.iter()
            .find(|(name, _)| wanted.contains(&name.trim().to_lowercase()))
    }
}

/// Read and parse a KML file.  I/O failures land in the report.
pub fn load_kml(path: &Path) -> (RouteGeometry, LoadReport) {
    match std::fs::read(path) {
        Ok(bytes) => {
            let (geometry, report) = parse_kml(&bytes);
            info!("{}: {} route paths ({report})", path.display(), geometry.len());
            (geometry, report)
        }
        Err(e) => {
            warn!("{}: {e}", path.display());
            let mut report = LoadReport::default();
            report.fail(path.display().to_string(), e);
            (RouteGeometry::default(), report)
        }
    }
}

/// Parse KML bytes.  Never fails; see the module table for what is dropped.
pub fn parse_kml(xml: &[u8]) -> (RouteGeometry, LoadReport) {
    let mut geometry = RouteGeometry::default();
    let mut report = LoadReport::default();

    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    // Depth below the current <Placemark>; 0 = outside any placemark.
    let mut depth = 0usize;
    let mut cur = Placemark::default();
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let local = e.local_name();
                if depth == 0 {
                    if local.as_ref() == b"Placemark" {
                        depth = 1;
                        cur = Placemark::default();
                    }
                } else {
                    depth += 1;
                    field = match local.as_ref() {
                        b"name" if depth == 2 => Some(Field::Name),
                        b"coordinates" if cur.coords.is_none() => Some(Field::Coordinates),
                        _ => None,
                    };
                }
            }
            Ok(Event::End(_)) if depth > 0 => {
                match field.take() {
                    Some(Field::Coordinates) if cur.coords.is_none() => {
                        cur.coords = Some(std::mem::take(&mut cur.text));
                    }
                    Some(Field::Name) => cur.name = Some(std::mem::take(&mut cur.text)),
                    _ => cur.text.clear(),
                }
                depth -= 1;
                if depth == 0 {
                    finish(std::mem::take(&mut cur), &mut geometry, &mut report);
                }
            }
            Ok(Event::Text(t)) if field.is_some() => match t.unescape() {
                Ok(s) => cur.text.push_str(&s),
                Err(e) => {
                    report.fail("kml", e);
                    return (RouteGeometry::default(), report);
                }
            },
            Ok(Event::CData(c)) if field.is_some() => {
                cur.text.push_str(&String::from_utf8_lossy(&c));
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                warn!("malformed KML at byte {}: {e}", reader.buffer_position());
                report.fail("kml", e);
                return (RouteGeometry::default(), report);
            }
            Ok(_) => {}
        }
        buf.clear();
    }

    report.loaded = geometry.len();
    (geometry, report)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

enum Field {
    Name,
    Coordinates,
}

#[derive(Default)]
struct Placemark {
    name:   Option<String>,
    coords: Option<String>,
    text:   String,
}

fn finish(p: Placemark, geometry: &mut RouteGeometry, report: &mut LoadReport) {
    let (Some(name), Some(coords)) = (p.name, p.coords) else {
        report.skipped += 1;
        return;
    };
    let name = name.trim();
    let points = parse_coordinates(&coords);
    if name.is_empty() || points.len() < 2 {
        report.skipped += 1;
        return;
    }
    geometry.insert(name, points);
}

/// `lon,lat[,alt]` tuples → `(lat, lon)` points, dropping bad tuples.
fn parse_coordinates(text: &str) -> Vec<GeoPoint> {
    text.split_whitespace()
        .filter_map(|tuple| {
            let mut parts = tuple.split(',');
            let lon = parts.next()?.trim().parse::<f64>().ok()?;
            let lat = parts.next()?.trim().parse::<f64>().ok()?;
            Some(GeoPoint::new(lat, lon))
        })
        .collect()
}
