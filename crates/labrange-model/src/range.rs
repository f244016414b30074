//! Biomarker reference ranges.
//!
//! A reference range is the clinically acceptable span `[min, max]` for one
//! biomarker, subdivided by two interior thresholds:
//!
//! ```text
//!   min        low            high        max
//!    |----------|--------------|-----------|
//!    |   Low    |    Normal    |   High    |
//!  OutOfRange                          OutOfRange
//! ```
//!
//! Every constructed range satisfies `min <= low <= high <= max`. Some ranges
//! collapse `low == high` when only a single split point is known.

use serde::{Deserialize, Serialize};

use crate::band::Band;
use crate::error::{ModelError, Result};

/// Closed interval of clinically acceptable values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalRange {
    pub min: f64,
    pub max: f64,
}

impl NormalRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns true when `value` lies inside the closed interval.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Reference range for a single biomarker.
///
/// Construct with [`ReferenceRange::new`]; the fields are private so that the
/// ordering invariant cannot be broken after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ReferenceRangeDef")]
pub struct ReferenceRange {
    key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<String>,
    normal_range: NormalRange,
    low_threshold: f64,
    high_threshold: f64,
}

impl ReferenceRange {
    /// Build a validated range. The key is trimmed and uppercased.
    pub fn new(
        key: impl AsRef<str>,
        normal_range: NormalRange,
        low_threshold: f64,
        high_threshold: f64,
    ) -> Result<Self> {
        let key = key.as_ref().trim().to_uppercase();
        if key.is_empty() {
            return Err(ModelError::EmptyKey);
        }
        for (field, value) in [
            ("normal range min", normal_range.min),
            ("normal range max", normal_range.max),
            ("low threshold", low_threshold),
            ("high threshold", high_threshold),
        ] {
            if !value.is_finite() {
                return Err(ModelError::NonFinite { key, field });
            }
        }
        let ordered = normal_range.min <= low_threshold
            && low_threshold <= high_threshold
            && high_threshold <= normal_range.max;
        if !ordered {
            return Err(ModelError::UnorderedRange {
                key,
                min: normal_range.min,
                low: low_threshold,
                high: high_threshold,
                max: normal_range.max,
            });
        }
        Ok(Self {
            key,
            name: None,
            unit: None,
            normal_range,
            low_threshold,
            high_threshold,
        })
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Canonical uppercase biomarker key.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    pub fn normal_range(&self) -> NormalRange {
        self.normal_range
    }

    pub fn low_threshold(&self) -> f64 {
        self.low_threshold
    }

    pub fn high_threshold(&self) -> f64 {
        self.high_threshold
    }

    /// True when both thresholds coincide (a single split point).
    pub fn is_collapsed(&self) -> bool {
        self.low_threshold == self.high_threshold
    }

    /// Classify a numeric value against this range.
    ///
    /// The out-of-range check runs first, so the thresholds only subdivide
    /// the interior of the normal range. Values exactly on `min` or `max`
    /// are inside the range.
    pub fn band_for(&self, value: f64) -> Band {
        if !self.normal_range.contains(value) {
            Band::OutOfRange
        } else if value <= self.low_threshold {
            Band::Low
        } else if value >= self.high_threshold {
            Band::High
        } else {
            Band::Normal
        }
    }
}

/// Unvalidated wire form of [`ReferenceRange`].
#[derive(Deserialize)]
struct ReferenceRangeDef {
    key: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    unit: Option<String>,
    normal_range: NormalRange,
    low_threshold: f64,
    high_threshold: f64,
}

impl TryFrom<ReferenceRangeDef> for ReferenceRange {
    type Error = ModelError;

    fn try_from(def: ReferenceRangeDef) -> Result<Self> {
        let mut range = ReferenceRange::new(
            &def.key,
            def.normal_range,
            def.low_threshold,
            def.high_threshold,
        )?;
        range.name = def.name.filter(|name| !name.trim().is_empty());
        range.unit = def.unit.filter(|unit| !unit.trim().is_empty());
        Ok(range)
    }
}
