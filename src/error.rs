//! Error handling
//!
//! Two layers:
//! - `SchemaError`: per-row validation failure. Recoverable, collected with the
//!   rejected row and never aborts the batch.
//! - `TriageError`: stage-fatal failure. Aborts the stage it occurs in only.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::logic::event::EventField;

pub type TriageResult<T> = Result<T, TriageError>;

// ============================================================================
// ROW-LEVEL ERRORS
// ============================================================================

/// A single field that failed its syntactic rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaError {
    /// Required field is blank
    #[error("{field}: required value is missing")]
    MissingField { field: EventField },

    /// Field present but malformed
    #[error("{field}: '{value}' is not a valid {expected}")]
    InvalidField {
        field: EventField,
        value: String,
        expected: &'static str,
    },

    /// No configured timestamp format matches
    #[error("{field}: '{value}' matches no accepted timestamp format")]
    UnparseableTimestamp { field: EventField, value: String },

    /// Source bytes are not valid UTF-8
    #[error("{field}: value is not valid UTF-8")]
    InvalidEncoding { field: EventField },
}

impl SchemaError {
    pub fn field(&self) -> EventField {
        match self {
            SchemaError::MissingField { field }
            | SchemaError::InvalidField { field, .. }
            | SchemaError::UnparseableTimestamp { field, .. }
            | SchemaError::InvalidEncoding { field } => *field,
        }
    }

    /// Short error-kind label used in audit output
    pub fn kind(&self) -> &'static str {
        match self {
            SchemaError::MissingField { .. } => "SchemaError",
            SchemaError::InvalidField { .. } => "SchemaError",
            SchemaError::InvalidEncoding { .. } => "EncodingError",
            SchemaError::UnparseableTimestamp { .. } => "UnparseableTimestampError",
        }
    }
}

// ============================================================================
// STAGE-LEVEL ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum TriageError {
    /// Required column wholly absent from the header
    #[error("missing required column(s): {}", .columns.join(", "))]
    MissingColumn { columns: Vec<String> },

    /// Batch too small to build the isolation ensemble
    #[error("insufficient data for anomaly scoring: {actual} record(s), at least {required} required")]
    InsufficientData { required: usize, actual: usize },

    /// Sink target exists and overwrite was not confirmed
    #[error("output path already exists: {}", .path.display())]
    DuplicateOutputPath { path: PathBuf },

    /// Header line has neither ';' nor ','
    #[error("could not detect delimiter from header line '{header}'")]
    UnknownDelimiter { header: String },

    #[error("input contains no header line")]
    EmptyInput,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TriageError {
    /// Whether this error must abort the whole pipeline rather than one stage
    pub fn is_fatal_for_pipeline(&self) -> bool {
        !matches!(self, TriageError::InsufficientData { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_kind_labels() {
        let err = SchemaError::UnparseableTimestamp {
            field: EventField::Timestamp,
            value: "not-a-date".to_string(),
        };
        assert_eq!(err.kind(), "UnparseableTimestampError");
        assert_eq!(err.field(), EventField::Timestamp);
        assert!(err.to_string().contains("not-a-date"));

        let missing = SchemaError::MissingField { field: EventField::Domain };
        assert_eq!(missing.kind(), "SchemaError");
        assert_eq!(missing.to_string(), "dominio: required value is missing");
    }

    #[test]
    fn test_insufficient_data_is_stage_local() {
        let err = TriageError::InsufficientData { required: 10, actual: 3 };
        assert!(!err.is_fatal_for_pipeline());

        let err = TriageError::MissingColumn { columns: vec!["dominio".into()] };
        assert!(err.is_fatal_for_pipeline());
        assert_eq!(err.to_string(), "missing required column(s): dominio");
    }
}
