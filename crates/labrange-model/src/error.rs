use thiserror::Error;

/// Errors raised while constructing model values.
#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum ModelError {
    #[error("biomarker key is empty")]
    EmptyKey,

    #[error("{key}: {field} is not a finite number")]
    NonFinite { key: String, field: &'static str },

    #[error(
        "{key}: range must satisfy min <= low <= high <= max \
         (got min={min}, low={low}, high={high}, max={max})"
    )]
    UnorderedRange {
        key: String,
        min: f64,
        low: f64,
        high: f64,
        max: f64,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
