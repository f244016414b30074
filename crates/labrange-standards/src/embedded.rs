//! Embedded reference-range data.
//!
//! The default table is compiled into the binary with `include_str!()` so
//! classification works without any files on disk.
//!
//! # Columns
//!
//! `Key,Name,Unit,Normal Min,Normal Max,Low Threshold,High Threshold`
//!
//! Row order matters: label resolution takes the first key that matches, so
//! more specific keys (`MCHC`, `NON-HDL`) are listed before the keys they
//! contain (`MCH`, `HDL`).

/// Default adult reference ranges.
pub const REFERENCE_RANGES_CSV: &str = include_str!("../data/reference_ranges.csv");

/// Source name reported in errors for the embedded table.
pub const REFERENCE_RANGES_SOURCE: &str = "embedded reference_ranges.csv";
