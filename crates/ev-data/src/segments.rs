//! Segment measurement tables, one file per destination village.
//!
//! Tables are CSV or Excel workbooks (`.xlsx` / `.xls`, first sheet only,
//! read with `calamine`).
//!
//! # File naming
//!
//! `<anything>_to_<Village>[digits].<csv|xlsx|xls>`.  The text after the last `_to_`
//! has trailing digits removed and is capitalised (`bobon2` → `Bobon`), so
//! several survey files can target one village.  When two files resolve to
//! the same village, the later file in sorted path order replaces the
//! earlier one.
//!
//! # Columns
//!
//! The first header containing `Slope` and the first containing
//! `Travel_Time_min` are required.  A header containing `Curvature` is used
//! when present; otherwise curvature comes from a [`CurvatureSource`].
//!
//! ```csv
//! Segment,Slope_deg,Travel_Time_min
//! 1,2.5,4.0
//! 2,-1.0,6.5
//! ```
//!
//! Rows whose slope or time is not a finite number are skipped and counted.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};
use log::{info, warn};

use ev_network::RoadSegmentSample;

use crate::curvature::CurvatureSource;
use crate::report::LoadReport;
use crate::{DataError, DataResult};

/// Samples keyed by destination name as derived from file names.
#[derive(Clone, Debug, Default)]
pub struct SegmentData {
    pub by_village: BTreeMap<String, Vec<RoadSegmentSample>>,
}

impl SegmentData {
    pub fn len(&self) -> usize {
        self.by_village.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_village.is_empty()
    }
}

/// Destination village named by a measurement file, or `None` if the name
/// has no `_to_` part.
pub fn destination_from_file_name(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let idx = stem.rfind("_to_")?;
    let raw = stem[idx + 4..]
        .trim_end_matches(|c: char| c.is_ascii_digit())
        .trim();
    let mut chars = raw.chars();
    let first = chars.next()?;
    let name: String = first
        .to_uppercase()
        .chain(chars.flat_map(char::to_lowercase))
        .collect();
    Some(name)
}

/// Parse one CSV table.  Returns the accepted samples and the number of
/// skipped rows; fails only when the required columns are absent or the CSV
/// itself cannot be read.
pub fn parse_segment_table<R: Read>(
    reader: R,
    village: &str,
    curvature: &mut dyn CurvatureSource,
) -> DataResult<(Vec<RoadSegmentSample>, usize)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
    let columns = Columns::locate(&headers)?;

    let mut samples = Vec::new();
    let mut skipped = 0usize;

    for record in csv_reader.records() {
        let sample = record
            .ok()
            .and_then(|r| columns.sample(|i| number(r.get(i)), village, curvature));
        match sample {
            Some(s) => samples.push(s),
            None => skipped += 1,
        }
    }

    Ok((samples, skipped))
}

/// Parse the first worksheet of an `.xlsx` / `.xls` workbook.  The first row
/// holds the headers; columns and row rules are as for
/// [`parse_segment_table`].
pub fn parse_segment_sheet(
    path: &Path,
    village: &str,
    curvature: &mut dyn CurvatureSource,
) -> DataResult<(Vec<RoadSegmentSample>, usize)> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook.worksheet_range_at(0).ok_or_else(|| DataError::Parse {
        file:    path.display().to_string(),
        message: "workbook has no sheets".into(),
    })??;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(cell_text).collect())
        .unwrap_or_default();
    let columns = Columns::locate(&headers)?;

    let mut samples = Vec::new();
    let mut skipped = 0usize;

    for row in rows {
        match columns.sample(|i| row.get(i).and_then(cell_number), village, curvature) {
            Some(s) => samples.push(s),
            None => skipped += 1,
        }
    }

    Ok((samples, skipped))
}

/// Load every measurement file in `paths`.
///
/// `.xlsx` / `.xls` files are read as workbooks, anything else as CSV.
///
/// `report.loaded` counts villages with data; `report.skipped` counts
/// rejected rows plus files without a `_to_` name.  Unreadable files, files
/// missing the required columns and files with no usable rows are recorded
/// in `report.failed`.
pub fn load_segment_files(
    paths: &[PathBuf],
    curvature: &mut dyn CurvatureSource,
) -> (SegmentData, LoadReport) {
    let mut sorted = paths.to_vec();
    sorted.sort();

    let mut data = SegmentData::default();
    let mut report = LoadReport::default();

    for path in &sorted {
        let shown = path.display().to_string();
        let Some(village) = destination_from_file_name(path) else {
            warn!("{shown}: no \"_to_<Village>\" in file name; ignored");
            report.skipped += 1;
            continue;
        };

        let parsed = if is_spreadsheet(path) {
            parse_segment_sheet(path, &village, curvature)
        } else {
            std::fs::File::open(path)
                .map_err(DataError::from)
                .and_then(|f| parse_segment_table(f, &village, curvature))
        };

        match parsed {
            Ok((samples, skipped_rows)) => {
                report.skipped += skipped_rows;
                if skipped_rows > 0 {
                    warn!("{shown}: skipped {skipped_rows} malformed rows");
                }
                if samples.is_empty() {
                    warn!("{shown}: no usable rows");
                    report.fail(shown, "no usable rows");
                    continue;
                }
                if data.by_village.insert(village.clone(), samples).is_some() {
                    warn!("{shown}: replaces earlier data for {village}");
                }
            }
            Err(e) => {
                warn!("{shown}: {e}");
                report.fail(shown, e);
            }
        }
    }

    report.loaded = data.len();
    info!("segment data for {} villages ({report})", data.len());
    (data, report)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Positions of the measurement columns within a header row.
struct Columns {
    slope:     usize,
    time:      usize,
    curvature: Option<usize>,
}

impl Columns {
    fn locate(headers: &[String]) -> DataResult<Self> {
        let find = |needle: &str| headers.iter().position(|h| h.contains(needle));
        Ok(Self {
            slope:     find("Slope").ok_or(DataError::MissingColumn("Slope"))?,
            time:      find("Travel_Time_min").ok_or(DataError::MissingColumn("Travel_Time_min"))?,
            curvature: find("Curvature"),
        })
    }

    /// One sample from a row, or `None` if slope or time is not a finite
    /// number.  A blank or missing curvature cell defers to `source`.
    fn sample(
        &self,
        cell: impl Fn(usize) -> Option<f64>,
        village: &str,
        source: &mut dyn CurvatureSource,
    ) -> Option<RoadSegmentSample> {
        let slope = cell(self.slope)?;
        let travel_time = cell(self.time)?;
        let curvature = match self.curvature.and_then(&cell) {
            Some(c) => c,
            None => source.next_curvature(village),
        };
        Some(RoadSegmentSample { slope, travel_time, curvature })
    }
}

fn number(field: Option<&str>) -> Option<f64> {
    field?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn cell_number(cell: &Data) -> Option<f64> {
    let v = match cell {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    v.is_finite().then_some(v)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx") || e.eq_ignore_ascii_case("xls"))
}
