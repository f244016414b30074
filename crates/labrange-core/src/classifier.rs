//! Biomarker range classification.
//!
//! [`RangeClassifier::classify`] maps a free-text biomarker label and a raw
//! value to a [`Classification`]. Resolution runs in a fixed order:
//!
//! 1. absent values and missing tokens are `Missing`
//! 2. values that do not parse as finite numbers are `Unknown`
//! 3. excluded labels are `Unknown`
//! 4. the label is matched against the table keys (first match wins)
//! 5. the matched range assigns the band
//!
//! Classification never fails; every input resolves to some band.

use labrange_model::{Band, Classification, MissingTokens, RawValue, Reading, ReferenceRange};
use labrange_standards::RangeTable;
use regex::Regex;
use tracing::trace;

/// Label that never resolves to a range, even if the table has one.
#[derive(Debug, Clone)]
pub enum Exclusion {
    /// Case-insensitive substring.
    Contains(String),
    /// Regular expression, matched against the label as given.
    Pattern(Regex),
}

impl Exclusion {
    pub fn contains(needle: impl AsRef<str>) -> Self {
        Exclusion::Contains(needle.as_ref().to_uppercase())
    }

    fn matches(&self, label: &str, upper_label: &str) -> bool {
        match self {
            Exclusion::Contains(needle) => upper_label.contains(needle.as_str()),
            Exclusion::Pattern(regex) => regex.is_match(label),
        }
    }
}

/// Tunable inputs of the classifier besides the range table.
#[derive(Debug, Clone)]
pub struct ClassifierOptions {
    pub missing_tokens: MissingTokens,
    pub exclusions: Vec<Exclusion>,
}

impl Default for ClassifierOptions {
    /// `#N/A` / `N/A` are missing; eGFR has no usable range.
    fn default() -> Self {
        Self {
            missing_tokens: MissingTokens::default(),
            exclusions: vec![Exclusion::contains("EGFR")],
        }
    }
}

/// Classifies biomarker measurements against an owned [`RangeTable`].
#[derive(Debug, Clone)]
pub struct RangeClassifier {
    table: RangeTable,
    options: ClassifierOptions,
}

impl RangeClassifier {
    pub fn new(table: RangeTable) -> Self {
        Self::with_options(table, ClassifierOptions::default())
    }

    pub fn with_options(table: RangeTable, options: ClassifierOptions) -> Self {
        Self { table, options }
    }

    pub fn table(&self) -> &RangeTable {
        &self.table
    }

    pub fn options(&self) -> &ClassifierOptions {
        &self.options
    }

    /// Classify a raw reading for the given label.
    pub fn classify<'a>(&self, label: &str, value: impl Into<Reading<'a>>) -> Classification {
        let raw = self.resolve_value(value);
        self.classify_raw(label, &raw)
    }

    /// Classify an already-resolved value.
    pub fn classify_raw(&self, label: &str, value: &RawValue) -> Classification {
        let number = match value {
            RawValue::Missing => return Classification::missing(),
            RawValue::Unparseable(_) => {
                trace!(label, "value is not numeric");
                return Classification::unknown();
            }
            RawValue::Numeric(number) => *number,
        };
        let Some(range) = self.resolve_key(label) else {
            return Classification::unknown();
        };
        let band = range.band_for(number);
        trace!(label, key = range.key(), band = band.as_str(), "classified");
        Classification::new(band, Some(range.key().to_string()))
    }

    /// Tag a reading against this classifier's missing tokens.
    pub fn resolve_value<'a>(&self, value: impl Into<Reading<'a>>) -> RawValue {
        RawValue::resolve(value.into(), &self.options.missing_tokens)
    }

    /// Find the range for a free-text label.
    ///
    /// A key matches when the uppercased label contains it, or it contains
    /// the uppercased label. When several keys match, the first in table
    /// order wins: `"NON-HDL CHOLESTEROL"` hits `NON-HDL` only because it
    /// precedes `HDL` and `CHOLESTEROL`. The label is not trimmed, so
    /// surrounding whitespace takes part in the match: `"MCH "` is not
    /// contained in `MCHC` and falls through to `MCH`. Blank and excluded
    /// labels never resolve.
    pub fn resolve_key(&self, label: &str) -> Option<&ReferenceRange> {
        if label.trim().is_empty() {
            return None;
        }
        let upper = label.to_uppercase();
        if self.is_excluded(label, &upper) {
            trace!(label, "biomarker is excluded");
            return None;
        }
        let found = self
            .table
            .iter()
            .find(|range| upper.contains(range.key()) || range.key().contains(upper.as_str()));
        if found.is_none() {
            trace!(label, "no reference range matches");
        }
        found
    }

    /// Band colors for every band, in display order.
    pub fn legend() -> impl Iterator<Item = (Band, &'static str)> {
        Band::ALL.into_iter().map(|band| (band, band.color().hex()))
    }

    fn is_excluded(&self, label: &str, upper: &str) -> bool {
        self.options
            .exclusions
            .iter()
            .any(|exclusion| exclusion.matches(label, upper))
    }
}
