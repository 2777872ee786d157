//! Schema Validator
//!
//! Validation logic only - types live in `types.rs`, field rules in `rules.rs`.
//! Input: raw rows. Output: accepted / rejected partition.

use sha2::{Digest, Sha256};

use super::rules;
use super::types::{Rejection, ValidationOutcome, ValidationStatus};
use crate::error::SchemaError;
use crate::logic::event::{EventField, RawEventRecord, ValidatedEventRecord};

// ============================================================================
// BATCH VALIDATION
// ============================================================================

/// Validate a batch. Row failures are collected, never fatal.
pub fn validate<I>(rows: I) -> ValidationOutcome
where
    I: IntoIterator<Item = RawEventRecord>,
{
    let mut input_hasher = Sha256::new();
    let mut accepted_hasher = Sha256::new();
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();

    for raw in rows {
        hash_record(&mut input_hasher, &raw);

        match validate_record(&raw) {
            Ok(record) => {
                hash_record(&mut accepted_hasher, &record.raw);
                accepted.push(record);
            }
            Err(errors) => {
                let rejection = Rejection { record: raw, errors };
                log::warn!("Row {} rejected: {}", rejection.row(), rejection.reason());
                rejected.push(rejection);
            }
        }
    }

    let input_fingerprint = hex::encode(input_hasher.finalize());
    let accepted_fingerprint = hex::encode(accepted_hasher.finalize());

    let status = if rejected.is_empty() && input_fingerprint == accepted_fingerprint {
        ValidationStatus::NoOp
    } else {
        ValidationStatus::Changed
    };

    log::info!(
        "Schema validation: {} accepted, {} rejected ({:?})",
        accepted.len(),
        rejected.len(),
        status
    );

    ValidationOutcome {
        accepted,
        rejected,
        status,
        input_fingerprint,
        accepted_fingerprint,
    }
}

// ============================================================================
// RECORD VALIDATION
// ============================================================================

/// Validate one row. Either every present field passes or all failures are
/// returned - a record is never partially validated.
pub fn validate_record(raw: &RawEventRecord) -> Result<ValidatedEventRecord, Vec<SchemaError>> {
    let norm = raw.normalized();
    let mut errors = Vec::new();

    for field in EventField::ALL {
        if norm.undecodable.contains(&field) {
            errors.push(SchemaError::InvalidEncoding { field });
            continue;
        }
        let value = norm.get(field);
        if value.is_empty() {
            if field.is_required_value() {
                errors.push(SchemaError::MissingField { field });
            }
            continue;
        }
        if let Some(err) = check_field(field, value) {
            errors.push(err);
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    // Rules passed, parses below cannot fail
    let timestamp = rules::parse_timestamp(&norm.timestamp).ok_or_else(|| {
        vec![SchemaError::UnparseableTimestamp {
            field: EventField::Timestamp,
            value: norm.timestamp.clone(),
        }]
    })?;
    let source_ip = rules::parse_ip(&norm.source_ip).ok_or_else(|| vec![invalid_ip(EventField::SourceIp, &norm.source_ip)])?;
    let dest_ip = rules::parse_ip(&norm.dest_ip).ok_or_else(|| vec![invalid_ip(EventField::DestIp, &norm.dest_ip)])?;

    Ok(ValidatedEventRecord {
        raw: norm,
        timestamp,
        source_ip,
        dest_ip,
    })
}

fn check_field(field: EventField, value: &str) -> Option<SchemaError> {
    let invalid = |expected: &'static str| SchemaError::InvalidField {
        field,
        value: value.to_string(),
        expected,
    };

    match field {
        EventField::SourceIp | EventField::DestIp if !rules::validate_ip(value) => Some(invalid_ip(field, value)),
        EventField::Domain if !rules::validate_domain(value) => Some(invalid("domain name")),
        EventField::Timestamp if !rules::validate_timestamp(value) => Some(SchemaError::UnparseableTimestamp {
            field,
            value: value.to_string(),
        }),
        EventField::FileName if !rules::validate_file_name(value) => Some(invalid("file name")),
        EventField::Md5 if !rules::validate_md5(value) => Some(invalid("MD5 hash")),
        _ => None,
    }
}

fn invalid_ip(field: EventField, value: &str) -> SchemaError {
    SchemaError::InvalidField {
        field,
        value: value.to_string(),
        expected: "IPv4 address",
    }
}

/// Feed one record's content into a batch fingerprint
fn hash_record(hasher: &mut Sha256, record: &RawEventRecord) {
    for field in EventField::ALL {
        hasher.update(record.get(field).as_bytes());
        hasher.update([0x1f]);
    }
    hasher.update([0x1e]);
}
