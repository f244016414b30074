//! Biomarker range classification.
//!
//! - [`classifier`]: maps a biomarker label and raw value to a band and color
//! - [`config`]: TOML configuration for building a classifier
//! - [`panel`]: classification of a patient's result history
//!
//! # Example
//!
//! ```
//! use labrange_core::RangeClassifier;
//! use labrange_model::Band;
//! use labrange_standards::RangeTable;
//!
//! let classifier = RangeClassifier::new(RangeTable::embedded().unwrap());
//! assert_eq!(classifier.classify("RBC (X10*12)", 4.6).band, Band::High);
//! assert_eq!(classifier.classify("RBC (X10*12)", "#N/A").band, Band::Missing);
//! ```

pub mod classifier;
pub mod config;
pub mod panel;

pub use classifier::{ClassifierOptions, Exclusion, RangeClassifier};
pub use config::{ClassifierConfig, ConfigError};
pub use panel::{
    BandCounts, BiomarkerSeries, PanelError, PanelRecord, PanelReport, SeriesPoint,
    parse_draw_date, percent_change, read_panel_path, read_panel_reader,
};
