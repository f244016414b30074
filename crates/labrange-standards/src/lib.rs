//! Biomarker reference-range tables.
//!
//! This crate provides:
//!
//! - the default adult reference-range table, embedded at compile time
//! - loaders for custom tables in CSV or JSON
//! - [`RangeTable`], an immutable, order-preserving lookup structure
//!
//! # Example
//!
//! ```
//! use labrange_standards::RangeTable;
//!
//! let table = RangeTable::embedded().unwrap();
//! let rbc = table.get("RBC").unwrap();
//! assert_eq!(rbc.low_threshold(), 4.2);
//! ```

#![deny(unsafe_code)]

pub mod embedded;
pub mod error;
pub mod loader;
pub mod table;

pub use error::{Result, StandardsError};
pub use loader::{load_csv_str, load_embedded, load_json_str, load_path};
pub use table::{RangeTable, TableSummary};
