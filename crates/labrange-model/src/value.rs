//! Raw measurement values.
//!
//! Measurements arrive as numbers, free text, or nothing at all. A
//! [`Reading`] captures that input as given; resolving it against a
//! [`MissingTokens`] set yields a [`RawValue`], which is what the classifier
//! works with.

use serde::{Deserialize, Serialize};

/// Placeholder tokens that mean "no measurement was taken".
pub const DEFAULT_MISSING_TOKENS: &[&str] = &["#N/A", "N/A"];

/// A measurement as supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading<'a> {
    Number(f64),
    Text(&'a str),
    Absent,
}

impl From<f64> for Reading<'_> {
    fn from(value: f64) -> Self {
        Reading::Number(value)
    }
}

impl From<i64> for Reading<'_> {
    fn from(value: i64) -> Self {
        Reading::Number(value as f64)
    }
}

impl<'a> From<&'a str> for Reading<'a> {
    fn from(value: &'a str) -> Self {
        Reading::Text(value)
    }
}

impl<'a> From<&'a String> for Reading<'a> {
    fn from(value: &'a String) -> Self {
        Reading::Text(value.as_str())
    }
}

impl<'a, T> From<Option<T>> for Reading<'a>
where
    T: Into<Reading<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Reading::Absent, Into::into)
    }
}

/// A measurement after boundary resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RawValue {
    Numeric(f64),
    Missing,
    Unparseable(String),
}

impl RawValue {
    /// Resolve a reading. Only an absent reading or a missing token is
    /// `Missing`. Text is trimmed before matching and parsing; blank text and
    /// non-finite numbers are `Unparseable`.
    pub fn resolve(reading: Reading<'_>, missing: &MissingTokens) -> Self {
        match reading {
            Reading::Absent => RawValue::Missing,
            Reading::Number(value) if value.is_finite() => RawValue::Numeric(value),
            Reading::Number(value) => RawValue::Unparseable(value.to_string()),
            Reading::Text(text) => {
                let trimmed = text.trim();
                if missing.contains(trimmed) {
                    return RawValue::Missing;
                }
                match trimmed.parse::<f64>() {
                    Ok(value) if value.is_finite() => RawValue::Numeric(value),
                    _ => RawValue::Unparseable(trimmed.to_string()),
                }
            }
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Numeric(value) => Some(*value),
            _ => None,
        }
    }
}

/// Case-insensitive set of missing-value placeholder tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTokens {
    tokens: Vec<String>,
}

impl MissingTokens {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for token in tokens {
            let token = token.as_ref().trim().to_uppercase();
            if !token.is_empty() && !normalized.contains(&token) {
                normalized.push(token);
            }
        }
        Self { tokens: normalized }
    }

    pub fn contains(&self, value: &str) -> bool {
        let value = value.trim().to_uppercase();
        self.tokens.iter().any(|token| *token == value)
    }
}

impl Default for MissingTokens {
    fn default() -> Self {
        Self::new(DEFAULT_MISSING_TOKENS)
    }
}
