//! Panel history evaluation.
//!
//! A panel is a patient's result history in long format, one row per
//! measurement:
//!
//! ```text
//! Date,Biomarker,Value
//! 2024-01-15,RBC (X10*12),4.3
//! 2024-01-15,ALT (IU/L),#N/A
//! 2024-06-02,RBC (X10*12),4.9
//! ```
//!
//! Evaluation groups rows into one series per biomarker label, orders each
//! series by draw date, classifies every point, and reports the percentage
//! change between consecutive numeric draws.

use std::collections::{BTreeSet, HashMap};
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use labrange_model::{Band, Classification, RawValue};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::classifier::RangeClassifier;

/// Accepted draw date formats.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PanelError {
    #[error("failed to read panel {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse panel CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: invalid date '{value}' (expected YYYY-MM-DD or DD/MM/YYYY)")]
    InvalidDate { line: u64, value: String },

    #[error("line {line}: biomarker is empty")]
    EmptyBiomarker { line: u64 },
}

/// One measurement row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelRecord {
    pub drawn_on: NaiveDate,
    pub biomarker: String,
    /// Raw cell text; `None` when the cell was blank.
    pub value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PanelCsvRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Biomarker")]
    biomarker: String,
    #[serde(rename = "Value", default)]
    value: Option<String>,
}

/// Read a panel CSV file.
pub fn read_panel_path(path: &Path) -> Result<Vec<PanelRecord>, PanelError> {
    let file = std::fs::File::open(path).map_err(|source| PanelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_panel_reader(file)
}

/// Read panel rows from any reader. Extra columns are ignored.
pub fn read_panel_reader<R: Read>(reader: R) -> Result<Vec<PanelRecord>, PanelError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, csv::Position::line);
        let row: PanelCsvRow = record.deserialize(Some(&headers))?;
        if row.biomarker.is_empty() {
            return Err(PanelError::EmptyBiomarker { line });
        }
        let drawn_on = parse_draw_date(&row.date).ok_or_else(|| PanelError::InvalidDate {
            line,
            value: row.date.clone(),
        })?;
        records.push(PanelRecord {
            drawn_on,
            biomarker: row.biomarker,
            value: row.value.filter(|v| !v.is_empty()),
        });
    }
    debug!(records = records.len(), "read panel");
    Ok(records)
}

/// Parse a draw date in any accepted format.
pub fn parse_draw_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value.trim(), format).ok())
}

/// Count of classifications per band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BandCounts {
    pub low: usize,
    pub normal: usize,
    pub high: usize,
    pub out_of_range: usize,
    pub unknown: usize,
    pub missing: usize,
}

impl BandCounts {
    pub fn add(&mut self, band: Band) {
        *self.slot(band) += 1;
    }

    pub fn get(&self, band: Band) -> usize {
        match band {
            Band::Low => self.low,
            Band::Normal => self.normal,
            Band::High => self.high,
            Band::OutOfRange => self.out_of_range,
            Band::Unknown => self.unknown,
            Band::Missing => self.missing,
        }
    }

    pub fn total(&self) -> usize {
        Band::ALL.iter().map(|&band| self.get(band)).sum()
    }

    fn slot(&mut self, band: Band) -> &mut usize {
        match band {
            Band::Low => &mut self.low,
            Band::Normal => &mut self.normal,
            Band::High => &mut self.high,
            Band::OutOfRange => &mut self.out_of_range,
            Band::Unknown => &mut self.unknown,
            Band::Missing => &mut self.missing,
        }
    }
}

impl FromIterator<Band> for BandCounts {
    fn from_iter<I: IntoIterator<Item = Band>>(iter: I) -> Self {
        let mut counts = BandCounts::default();
        for band in iter {
            counts.add(band);
        }
        counts
    }
}

/// One classified draw of a biomarker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub drawn_on: NaiveDate,
    pub value: RawValue,
    pub classification: Classification,
    /// Percent change against the previous numeric draw of the series.
    pub change_pct: Option<f64>,
}

/// All draws of one biomarker label, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiomarkerSeries {
    pub label: String,
    /// Canonical key the label resolved to.
    pub biomarker: Option<String>,
    pub points: Vec<SeriesPoint>,
}

impl BiomarkerSeries {
    /// The last point drawn on `date`, if any.
    pub fn point_on(&self, date: NaiveDate) -> Option<&SeriesPoint> {
        self.points.iter().rev().find(|point| point.drawn_on == date)
    }

    pub fn latest(&self) -> Option<&SeriesPoint> {
        self.points.last()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelReport {
    /// Distinct draw dates, ascending.
    pub draws: Vec<NaiveDate>,
    /// Series in order of first appearance.
    pub series: Vec<BiomarkerSeries>,
    /// Bands over every point.
    pub counts: BandCounts,
    /// Bands over each series' most recent point.
    pub latest: BandCounts,
}

impl PanelReport {
    /// Number of biomarkers whose most recent value is out of range.
    pub fn out_of_range(&self) -> usize {
        self.latest.out_of_range
    }
}

/// Percent change from `previous` to `current`; `None` when `previous` is zero.
pub fn percent_change(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some((current - previous) / previous.abs() * 100.0)
}

impl RangeClassifier {
    /// Classify a panel history.
    pub fn evaluate_panel(&self, records: &[PanelRecord]) -> PanelReport {
        let mut order: Vec<&str> = Vec::new();
        let mut grouped: HashMap<&str, Vec<&PanelRecord>> = HashMap::new();
        for record in records {
            let label = record.biomarker.as_str();
            grouped
                .entry(label)
                .or_insert_with(|| {
                    order.push(label);
                    Vec::new()
                })
                .push(record);
        }

        let draws: BTreeSet<NaiveDate> = records.iter().map(|record| record.drawn_on).collect();
        let series: Vec<BiomarkerSeries> = order
            .into_iter()
            .map(|label| {
                let mut rows = grouped.remove(label).unwrap_or_default();
                rows.sort_by_key(|record| record.drawn_on);
                self.evaluate_series(label, &rows)
            })
            .collect();

        let counts: BandCounts = series
            .iter()
            .flat_map(|s| s.points.iter())
            .map(|point| point.classification.band)
            .collect();
        let latest: BandCounts = series
            .iter()
            .filter_map(BiomarkerSeries::latest)
            .map(|point| point.classification.band)
            .collect();

        debug!(
            records = records.len(),
            series = series.len(),
            draws = draws.len(),
            "evaluated panel"
        );
        PanelReport {
            draws: draws.into_iter().collect(),
            series,
            counts,
            latest,
        }
    }

    fn evaluate_series(&self, label: &str, rows: &[&PanelRecord]) -> BiomarkerSeries {
        let mut previous: Option<f64> = None;
        let points = rows
            .iter()
            .map(|record| {
                let value = self.resolve_value(record.value.as_ref());
                let classification = self.classify_raw(label, &value);
                let current = value.as_f64();
                let change_pct = match (previous, current) {
                    (Some(prev), Some(curr)) => percent_change(prev, curr),
                    _ => None,
                };
                if current.is_some() {
                    previous = current;
                }
                SeriesPoint {
                    drawn_on: record.drawn_on,
                    value,
                    classification,
                    change_pct,
                }
            })
            .collect();
        BiomarkerSeries {
            label: label.to_string(),
            biomarker: self.resolve_key(label).map(|range| range.key().to_string()),
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9);
        assert_eq!(parse_draw_date("2024-03-09"), expected);
        assert_eq!(parse_draw_date("09/03/2024"), expected);
        assert_eq!(parse_draw_date("March 9"), None);
    }

    #[test]
    fn percent_change_handles_zero_baseline() {
        assert_eq!(percent_change(0.0, 5.0), None);
        assert_eq!(percent_change(4.0, 5.0), Some(25.0));
        assert_eq!(percent_change(-2.0, -1.0), Some(50.0));
    }

    #[test]
    fn band_counts_total() {
        let counts: BandCounts = [Band::Low, Band::Low, Band::Missing].into_iter().collect();
        assert_eq!(counts.get(Band::Low), 2);
        assert_eq!(counts.get(Band::Missing), 1);
        assert_eq!(counts.total(), 3);
    }
}
