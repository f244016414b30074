//! Immutable reference-range table.

use std::collections::BTreeMap;

use labrange_model::ReferenceRange;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::{Result, StandardsError};

/// Reference ranges keyed by canonical biomarker key.
///
/// Entries keep their load order. Label resolution walks the table in this
/// order and takes the first match, so the order is part of the table's
/// meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeTable {
    entries: Vec<ReferenceRange>,
    index: BTreeMap<String, usize>,
}

impl RangeTable {
    /// Build a table from validated ranges, rejecting duplicate keys.
    pub fn new(entries: Vec<ReferenceRange>) -> Result<Self> {
        let mut index = BTreeMap::new();
        for (position, entry) in entries.iter().enumerate() {
            if index.insert(entry.key().to_string(), position).is_some() {
                return Err(StandardsError::DuplicateKey {
                    key: entry.key().to_string(),
                });
            }
        }
        Ok(Self { entries, index })
    }

    /// Load the compiled-in default table.
    pub fn embedded() -> Result<Self> {
        crate::loader::load_embedded()
    }

    /// Look up a range by exact key (case-insensitive).
    pub fn get(&self, key: &str) -> Option<&ReferenceRange> {
        self.index
            .get(&key.trim().to_uppercase())
            .map(|&position| &self.entries[position])
    }

    /// Iterate entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = &ReferenceRange> {
        self.entries.iter()
    }

    /// Canonical keys in table order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(ReferenceRange::key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// SHA-256 hex digest of the table's canonical JSON form.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for entry in &self.entries {
            // ReferenceRange only holds strings and finite floats.
            let bytes = serde_json::to_vec(entry).unwrap_or_default();
            hasher.update(&bytes);
            hasher.update(b"\n");
        }
        hex::encode(hasher.finalize())
    }

    pub fn summary(&self) -> TableSummary {
        TableSummary {
            entries: self.len(),
            keys: self.keys().map(str::to_string).collect(),
            collapsed: self
                .iter()
                .filter(|entry| entry.is_collapsed())
                .map(|entry| entry.key().to_string())
                .collect(),
            fingerprint: self.fingerprint(),
        }
    }
}

impl<'a> IntoIterator for &'a RangeTable {
    type Item = &'a ReferenceRange;
    type IntoIter = std::slice::Iter<'a, ReferenceRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Serializable overview of a table.
#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub entries: usize,
    pub keys: Vec<String>,
    /// Keys whose low and high thresholds coincide.
    pub collapsed: Vec<String>,
    pub fingerprint: String,
}

#[cfg(test)]
mod tests {
    use labrange_model::NormalRange;

    use super::*;

    fn range(key: &str) -> ReferenceRange {
        ReferenceRange::new(key, NormalRange::new(0.0, 10.0), 3.0, 7.0).unwrap()
    }

    #[test]
    fn rejects_duplicate_keys() {
        let err = RangeTable::new(vec![range("ALT"), range("alt")]).unwrap_err();
        assert!(matches!(err, StandardsError::DuplicateKey { key } if key == "ALT"));
    }

    #[test]
    fn get_is_case_insensitive() {
        let table = RangeTable::new(vec![range("ALT"), range("AST")]).unwrap();
        assert_eq!(table.get(" ast ").map(ReferenceRange::key), Some("AST"));
        assert!(table.get("GGT").is_none());
    }

    #[test]
    fn keeps_insertion_order() {
        let table = RangeTable::new(vec![range("ZINC"), range("ALT"), range("MCV")]).unwrap();
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["ZINC", "ALT", "MCV"]);
    }

    #[test]
    fn fingerprint_tracks_content() {
        let a = RangeTable::new(vec![range("ALT")]).unwrap();
        let b = RangeTable::new(vec![range("ALT")]).unwrap();
        let c = RangeTable::new(vec![range("AST")]).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }
}
