//! Event Records - Raw and validated telemetry rows
//!
//! `RawEventRecord` is what the record source hands over (may be malformed).
//! `ValidatedEventRecord` only exists once every present field passed its rule.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

// ============================================================================
// FIELDS / COLUMNS
// ============================================================================

/// Known event fields, keyed by their column name in the tabular input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventField {
    #[serde(rename = "timestamp")]
    Timestamp,
    #[serde(rename = "origen_IP")]
    SourceIp,
    #[serde(rename = "destino_IP")]
    DestIp,
    #[serde(rename = "hash_archivo")]
    FileHash,
    #[serde(rename = "dominio")]
    Domain,
    #[serde(rename = "evento")]
    EventType,
    #[serde(rename = "descripcion")]
    Description,
    #[serde(rename = "File")]
    FileName,
    #[serde(rename = "MD5")]
    Md5,
}

impl EventField {
    /// Column order used for both input filtering and output
    pub const ALL: [EventField; 9] = [
        EventField::Timestamp,
        EventField::SourceIp,
        EventField::DestIp,
        EventField::FileHash,
        EventField::Domain,
        EventField::EventType,
        EventField::Description,
        EventField::FileName,
        EventField::Md5,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            EventField::Timestamp => "timestamp",
            EventField::SourceIp => "origen_IP",
            EventField::DestIp => "destino_IP",
            EventField::FileHash => "hash_archivo",
            EventField::Domain => "dominio",
            EventField::EventType => "evento",
            EventField::Description => "descripcion",
            EventField::FileName => "File",
            EventField::Md5 => "MD5",
        }
    }

    pub fn from_column(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.column() == name)
    }

    /// Column must exist in the header
    pub fn is_required_column(&self) -> bool {
        !matches!(self, EventField::FileName | EventField::Md5)
    }

    /// Value must be non-blank for the row to be accepted
    pub fn is_required_value(&self) -> bool {
        !matches!(self, EventField::FileHash | EventField::FileName | EventField::Md5)
    }
}

impl fmt::Display for EventField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

// ============================================================================
// RAW RECORD
// ============================================================================

/// One input row, unvalidated
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawEventRecord {
    /// 1-based row sequence number in the source
    pub row: usize,
    pub timestamp: String,
    pub source_ip: String,
    pub dest_ip: String,
    pub file_hash: Option<String>,
    pub domain: String,
    pub event_type: String,
    pub description: String,
    pub file_name: Option<String>,
    pub md5: Option<String>,
    /// Fields whose source bytes were not valid UTF-8 (decoded lossily)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub undecodable: Vec<EventField>,
}

impl RawEventRecord {
    /// Field value as text; absent optionals read as ""
    pub fn get(&self, field: EventField) -> &str {
        match field {
            EventField::Timestamp => &self.timestamp,
            EventField::SourceIp => &self.source_ip,
            EventField::DestIp => &self.dest_ip,
            EventField::FileHash => self.file_hash.as_deref().unwrap_or(""),
            EventField::Domain => &self.domain,
            EventField::EventType => &self.event_type,
            EventField::Description => &self.description,
            EventField::FileName => self.file_name.as_deref().unwrap_or(""),
            EventField::Md5 => self.md5.as_deref().unwrap_or(""),
        }
    }

    /// Set a field from text; blank optionals become `None`
    pub fn set(&mut self, field: EventField, value: &str) {
        let optional = |v: &str| if v.is_empty() { None } else { Some(v.to_string()) };
        match field {
            EventField::Timestamp => self.timestamp = value.to_string(),
            EventField::SourceIp => self.source_ip = value.to_string(),
            EventField::DestIp => self.dest_ip = value.to_string(),
            EventField::FileHash => self.file_hash = optional(value),
            EventField::Domain => self.domain = value.to_string(),
            EventField::EventType => self.event_type = value.to_string(),
            EventField::Description => self.description = value.to_string(),
            EventField::FileName => self.file_name = optional(value),
            EventField::Md5 => self.md5 = optional(value),
        }
    }

    /// Copy with surrounding whitespace removed from every field
    pub fn normalized(&self) -> Self {
        let mut out = Self {
            row: self.row,
            undecodable: self.undecodable.clone(),
            ..Default::default()
        };
        for field in EventField::ALL {
            out.set(field, self.get(field).trim());
        }
        out
    }
}

// ============================================================================
// VALIDATED RECORD
// ============================================================================

/// A row whose present fields all passed validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedEventRecord {
    /// Normalized source row
    pub raw: RawEventRecord,
    /// Parsed timestamp (wall clock, interpreted as local time)
    pub timestamp: NaiveDateTime,
    pub source_ip: Ipv4Addr,
    pub dest_ip: Ipv4Addr,
}

impl ValidatedEventRecord {
    pub fn row(&self) -> usize {
        self.raw.row
    }

    pub fn domain(&self) -> &str {
        &self.raw.domain
    }

    pub fn event_type(&self) -> &str {
        &self.raw.event_type
    }

    pub fn file_hash(&self) -> Option<&str> {
        self.raw.file_hash.as_deref().filter(|h| !h.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_roundtrip() {
        for field in EventField::ALL {
            assert_eq!(EventField::from_column(field.column()), Some(field));
        }
        assert_eq!(EventField::from_column("unknown_col"), None);
    }

    #[test]
    fn test_normalized_trims_and_clears_blank_optionals() {
        let raw = RawEventRecord {
            row: 3,
            timestamp: " 15/01/2025 02:10 ".into(),
            domain: "example.com\t".into(),
            file_hash: Some("   ".into()),
            ..Default::default()
        };
        let norm = raw.normalized();
        assert_eq!(norm.row, 3);
        assert_eq!(norm.timestamp, "15/01/2025 02:10");
        assert_eq!(norm.domain, "example.com");
        assert_eq!(norm.file_hash, None);
    }
}
