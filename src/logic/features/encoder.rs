//! Categorical Encoder
//!
//! Dense integer codes in first-seen order. Codes are batch-local: the same
//! category gets the same code within one batch, nothing more.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::logic::event::{EventField, ValidatedEventRecord};

/// Sentinel category for missing values
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Fields encoded to integer codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalField {
    SourceIp,
    DestIp,
    FileHash,
    Domain,
    EventType,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 5] = [
        CategoricalField::SourceIp,
        CategoricalField::DestIp,
        CategoricalField::FileHash,
        CategoricalField::Domain,
        CategoricalField::EventType,
    ];

    pub fn event_field(&self) -> EventField {
        match self {
            CategoricalField::SourceIp => EventField::SourceIp,
            CategoricalField::DestIp => EventField::DestIp,
            CategoricalField::FileHash => EventField::FileHash,
            CategoricalField::Domain => EventField::Domain,
            CategoricalField::EventType => EventField::EventType,
        }
    }

    /// Raw value, `None` when missing
    pub fn value_of<'a>(&self, record: &'a ValidatedEventRecord) -> Option<&'a str> {
        Some(record.raw.get(self.event_field())).filter(|v| !v.is_empty())
    }
}

// ============================================================================
// CATEGORY TABLE
// ============================================================================

/// Category → code table for one field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryTable {
    /// Categories indexed by code
    categories: Vec<String>,
    #[serde(skip)]
    codes: HashMap<String, u32>,
}

impl CategoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Code for a value, assigning the next code on first sight
    pub fn encode(&mut self, value: Option<&str>) -> u32 {
        let key = value.unwrap_or(UNKNOWN_CATEGORY);
        if let Some(code) = self.codes.get(key) {
            return *code;
        }
        let code = self.categories.len() as u32;
        self.categories.push(key.to_string());
        self.codes.insert(key.to_string(), code);
        code
    }

    pub fn code_of(&self, value: &str) -> Option<u32> {
        self.codes.get(value).copied()
    }

    pub fn category(&self, code: u32) -> Option<&str> {
        self.categories.get(code as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

// ============================================================================
// ENCODINGS
// ============================================================================

/// Per-field code tables for one batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryEncodings {
    tables: BTreeMap<CategoricalField, CategoryTable>,
}

impl CategoryEncodings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encode(&mut self, field: CategoricalField, value: Option<&str>) -> u32 {
        self.tables.entry(field).or_default().encode(value)
    }

    pub fn table(&self, field: CategoricalField) -> Option<&CategoryTable> {
        self.tables.get(&field)
    }

    pub fn code_of(&self, field: CategoricalField, value: &str) -> Option<u32> {
        self.table(field).and_then(|t| t.code_of(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order() {
        let mut table = CategoryTable::new();
        assert_eq!(table.encode(Some("zeta.com")), 0);
        assert_eq!(table.encode(Some("alpha.com")), 1);
        assert_eq!(table.encode(Some("zeta.com")), 0);
        assert_eq!(table.category(1), Some("alpha.com"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_missing_maps_to_unknown() {
        let mut table = CategoryTable::new();
        let a = table.encode(None);
        let b = table.encode(Some("abc"));
        let c = table.encode(None);
        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(table.code_of(UNKNOWN_CATEGORY), Some(a));
    }

    #[test]
    fn test_fields_are_independent() {
        let mut enc = CategoryEncodings::new();
        assert_eq!(enc.encode(CategoricalField::Domain, Some("x.com")), 0);
        assert_eq!(enc.encode(CategoricalField::SourceIp, Some("8.8.8.8")), 0);
        assert_eq!(enc.encode(CategoricalField::Domain, Some("y.com")), 1);
        assert_eq!(enc.code_of(CategoricalField::Domain, "y.com"), Some(1));
        assert_eq!(enc.code_of(CategoricalField::DestIp, "y.com"), None);
    }
}
