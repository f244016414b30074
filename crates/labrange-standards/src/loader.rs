//! Reference-range loaders.
//!
//! Tables come from the embedded default CSV, a CSV file, or a JSON file.
//! Every loader validates each entry and rejects duplicate keys.

use std::io::Cursor;
use std::path::Path;

use labrange_model::{NormalRange, ReferenceRange};
use serde::Deserialize;
use tracing::debug;

use crate::embedded;
use crate::error::{Result, StandardsError};
use crate::table::RangeTable;

/// Row from a reference-range CSV.
#[derive(Debug, Deserialize)]
struct RangeCsvRow {
    #[serde(rename = "Key")]
    key: String,
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "Unit", default)]
    unit: Option<String>,
    #[serde(rename = "Normal Min")]
    normal_min: f64,
    #[serde(rename = "Normal Max")]
    normal_max: f64,
    #[serde(rename = "Low Threshold")]
    low_threshold: f64,
    #[serde(rename = "High Threshold")]
    high_threshold: f64,
}

/// Load the compiled-in default table.
pub fn load_embedded() -> Result<RangeTable> {
    load_csv_str(
        embedded::REFERENCE_RANGES_CSV,
        embedded::REFERENCE_RANGES_SOURCE,
    )
}

/// Load a table from CSV content.
///
/// `source_name` is only used in error messages.
pub fn load_csv_str(content: &str, source_name: &str) -> Result<RangeTable> {
    let cursor = Cursor::new(content.as_bytes());
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(cursor);

    let mut entries = Vec::new();
    for (idx, result) in reader.deserialize::<RangeCsvRow>().enumerate() {
        let row = result.map_err(|e| StandardsError::CsvParse {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })?;
        // Header is line 1.
        let line = idx + 2;
        let range = ReferenceRange::new(
            &row.key,
            NormalRange::new(row.normal_min, row.normal_max),
            row.low_threshold,
            row.high_threshold,
        )
        .map_err(|source| StandardsError::InvalidRange {
            source_name: source_name.to_string(),
            line,
            source,
        })?;
        entries.push(with_labels(range, row.name, row.unit));
    }

    let table = RangeTable::new(entries)?;
    debug!(source = source_name, entries = table.len(), "loaded range table");
    Ok(table)
}

/// Load a table from a JSON array of ranges.
pub fn load_json_str(content: &str, source_name: &str) -> Result<RangeTable> {
    let entries: Vec<ReferenceRange> =
        serde_json::from_str(content).map_err(|source| StandardsError::JsonParse {
            source_name: source_name.to_string(),
            source,
        })?;
    let table = RangeTable::new(entries)?;
    debug!(source = source_name, entries = table.len(), "loaded range table");
    Ok(table)
}

/// Load a table from a `.csv` or `.json` file.
pub fn load_path(path: &Path) -> Result<RangeTable> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let loader: fn(&str, &str) -> Result<RangeTable> = match extension.as_deref() {
        Some("csv") => load_csv_str,
        Some("json") => load_json_str,
        _ => {
            return Err(StandardsError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
    };
    let content = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    loader(&content, &path.display().to_string())
}

fn with_labels(range: ReferenceRange, name: Option<String>, unit: Option<String>) -> ReferenceRange {
    let range = match non_empty(name) {
        Some(name) => range.with_name(name),
        None => range,
    };
    match non_empty(unit) {
        Some(unit) => range.with_unit(unit),
        None => range,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
