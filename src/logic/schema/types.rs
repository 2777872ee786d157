//! Schema Types
//!
//! Data structures only - no validation logic here.

use serde::Serialize;

use crate::error::SchemaError;
use crate::logic::event::{RawEventRecord, ValidatedEventRecord};

/// A row excluded from the batch, kept for audit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    /// Original row, untouched
    pub record: RawEventRecord,
    /// Every field that failed, in column order
    pub errors: Vec<SchemaError>,
}

impl Rejection {
    pub fn row(&self) -> usize {
        self.record.row
    }

    /// One-line reason, e.g. "origen_IP: '999.1.1.1' is not a valid IPv4 address"
    pub fn reason(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Whether validation changed anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    /// Rows were dropped or normalized
    Changed,
    /// Batch was already valid and normalized
    NoOp,
}

/// Accepted / rejected partition of a batch
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    pub accepted: Vec<ValidatedEventRecord>,
    pub rejected: Vec<Rejection>,
    pub status: ValidationStatus,
    /// SHA-256 (hex) of the input batch
    pub input_fingerprint: String,
    /// SHA-256 (hex) of the accepted batch
    pub accepted_fingerprint: String,
}

impl ValidationOutcome {
    pub fn is_noop(&self) -> bool {
        self.status == ValidationStatus::NoOp
    }

    pub fn total(&self) -> usize {
        self.accepted.len() + self.rejected.len()
    }
}
