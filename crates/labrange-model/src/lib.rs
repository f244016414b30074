//! Data model for biomarker reference-range classification.
//!
//! - [`range`]: per-biomarker reference ranges and their ordering invariant
//! - [`band`]: clinical-status bands and their display colors
//! - [`value`]: raw measurement values tagged at the input boundary

pub mod band;
pub mod error;
pub mod range;
pub mod value;

pub use band::{Band, Classification, DisplayColor};
pub use error::{ModelError, Result};
pub use range::{NormalRange, ReferenceRange};
pub use value::{DEFAULT_MISSING_TOKENS, MissingTokens, RawValue, Reading};
