//! Clinical-status bands and display colors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of classifying one measurement.
///
/// The first four variants are ordinal clinical bands. `Unknown` and
/// `Missing` are non-clinical sentinels:
/// - `Unknown`: a value was given but could not be classified (not numeric,
///   no matching reference range, or an excluded biomarker).
/// - `Missing`: no measurement was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Low,
    Normal,
    High,
    OutOfRange,
    Unknown,
    Missing,
}

impl Band {
    /// All bands in display order.
    pub const ALL: [Band; 6] = [
        Band::Low,
        Band::Normal,
        Band::High,
        Band::OutOfRange,
        Band::Unknown,
        Band::Missing,
    ];

    /// Fixed display color for this band.
    pub const fn color(self) -> DisplayColor {
        match self {
            Band::Low => DisplayColor("#eab308"),
            Band::Normal => DisplayColor("#059669"),
            Band::High => DisplayColor("#7c3aed"),
            Band::OutOfRange => DisplayColor("#dc2626"),
            Band::Unknown => DisplayColor("#f3f4f6"),
            Band::Missing => DisplayColor("#6b7280"),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Band::Low => "low",
            Band::Normal => "normal",
            Band::High => "high",
            Band::OutOfRange => "out_of_range",
            Band::Unknown => "unknown",
            Band::Missing => "missing",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Band::Low => "Low",
            Band::Normal => "Normal",
            Band::High => "High",
            Band::OutOfRange => "Out of range",
            Band::Unknown => "Unknown",
            Band::Missing => "Missing",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A `#rrggbb` display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DisplayColor(&'static str);

impl DisplayColor {
    pub const fn hex(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for DisplayColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Result of classifying one biomarker measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub band: Band,
    pub color: DisplayColor,
    /// Canonical key of the reference range that was applied, if any.
    pub biomarker: Option<String>,
}

impl Classification {
    pub fn new(band: Band, biomarker: Option<String>) -> Self {
        Self {
            band,
            color: band.color(),
            biomarker,
        }
    }

    pub fn unknown() -> Self {
        Self::new(Band::Unknown, None)
    }

    pub fn missing() -> Self {
        Self::new(Band::Missing, None)
    }
}
