//! Column Map - Header resolution for tabular input
//!
//! Maps header positions onto known event fields. Unrecognized columns are
//! dropped; a missing required column is fatal.

use serde::{Deserialize, Serialize};

use crate::error::{TriageError, TriageResult};
use crate::logic::event::{EventField, RawEventRecord};

/// Resolved header layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    /// (field, position in source row), in canonical field order
    positions: Vec<(EventField, usize)>,
    /// Source columns that were not recognized
    dropped: Vec<String>,
}

impl ColumnMap {
    /// Resolve a header row. Fails with `MissingColumn` listing every absent
    /// required column.
    pub fn from_headers<I, S>(headers: I) -> TriageResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut found: Vec<(EventField, usize)> = Vec::new();
        let mut dropped = Vec::new();

        for (idx, name) in headers.into_iter().enumerate() {
            let name = name.as_ref().trim().trim_start_matches('\u{feff}');
            match EventField::from_column(name) {
                Some(field) if !found.iter().any(|(f, _)| *f == field) => found.push((field, idx)),
                _ => dropped.push(name.to_string()),
            }
        }

        let missing: Vec<String> = EventField::ALL
            .iter()
            .filter(|f| f.is_required_column() && !found.iter().any(|(g, _)| g == *f))
            .map(|f| f.column().to_string())
            .collect();

        if !missing.is_empty() {
            return Err(TriageError::MissingColumn { columns: missing });
        }

        if !dropped.is_empty() {
            log::debug!("Dropping unrecognized column(s): {}", dropped.join(", "));
        }

        found.sort_by_key(|(f, _)| *f);
        Ok(Self { positions: found, dropped })
    }

    /// Layout containing every known field (used for typed in-memory batches)
    pub fn full() -> Self {
        Self {
            positions: EventField::ALL.iter().copied().enumerate().map(|(i, f)| (f, i)).collect(),
            dropped: Vec::new(),
        }
    }

    /// Fields present, in canonical order
    pub fn fields(&self) -> impl Iterator<Item = EventField> + '_ {
        self.positions.iter().map(|(f, _)| *f)
    }

    pub fn has(&self, field: EventField) -> bool {
        self.positions.iter().any(|(f, _)| *f == field)
    }

    pub fn dropped(&self) -> &[String] {
        &self.dropped
    }

    /// Build a raw record from one source row. Short rows read as blank.
    pub fn record_from<'a, I>(&self, row: usize, values: I) -> RawEventRecord
    where
        I: IntoIterator<Item = &'a str>,
    {
        let values: Vec<&str> = values.into_iter().collect();
        let mut record = RawEventRecord { row, ..Default::default() };
        for (field, idx) in &self.positions {
            record.set(*field, values.get(*idx).copied().unwrap_or(""));
        }
        record
    }

    /// Same as `record_from` over raw bytes. Fields that are not valid UTF-8
    /// are decoded lossily and listed in `undecodable`.
    pub fn record_from_bytes<'a, I>(&self, row: usize, values: I) -> RawEventRecord
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let values: Vec<&[u8]> = values.into_iter().collect();
        let mut record = RawEventRecord { row, ..Default::default() };
        for (field, idx) in &self.positions {
            let bytes = values.get(*idx).copied().unwrap_or_default();
            match std::str::from_utf8(bytes) {
                Ok(text) => record.set(*field, text),
                Err(_) => {
                    record.set(*field, &String::from_utf8_lossy(bytes));
                    record.undecodable.push(*field);
                }
            }
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: [&str; 7] = [
        "timestamp", "origen_IP", "destino_IP", "hash_archivo", "dominio", "evento", "descripcion",
    ];

    #[test]
    fn test_resolves_required_columns() {
        let map = ColumnMap::from_headers(HEADER).unwrap();
        assert!(map.has(EventField::Domain));
        assert!(!map.has(EventField::Md5));
        assert_eq!(map.fields().count(), 7);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let err = ColumnMap::from_headers(["timestamp", "origen_IP", "evento"]).unwrap_err();
        match err {
            TriageError::MissingColumn { columns } => {
                assert!(columns.contains(&"dominio".to_string()));
                assert!(columns.contains(&"destino_IP".to_string()));
                assert!(!columns.contains(&"timestamp".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unrecognized_columns_dropped_and_order_free() {
        let mut header: Vec<&str> = HEADER.iter().rev().copied().collect();
        header.insert(2, "extra");
        header.push("MD5");
        let map = ColumnMap::from_headers(&header).unwrap();
        assert_eq!(map.dropped(), &["extra".to_string()]);
        assert!(map.has(EventField::Md5));

        let mut values: Vec<&str> = vec![""; header.len()];
        let dominio_idx = header.iter().position(|h| *h == "dominio").unwrap();
        values[dominio_idx] = "example.com";
        let record = map.record_from(1, values);
        assert_eq!(record.domain, "example.com");
        assert_eq!(record.md5, None);
    }
}
