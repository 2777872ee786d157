use super::validator::{validate, validate_record};
use super::types::ValidationStatus;
use crate::error::SchemaError;
use crate::logic::event::{EventField, RawEventRecord};

fn row(n: usize, timestamp: &str, source_ip: &str, domain: &str) -> RawEventRecord {
    RawEventRecord {
        row: n,
        timestamp: timestamp.to_string(),
        source_ip: source_ip.to_string(),
        dest_ip: "192.168.1.5".to_string(),
        file_hash: None,
        domain: domain.to_string(),
        event_type: "Acceso autorizado".to_string(),
        description: "Operación esperada dentro de red segura".to_string(),
        file_name: None,
        md5: None,
        undecodable: Vec::new(),
    }
}

#[test]
fn test_partition_accepted_and_rejected() {
    let rows = vec![
        row(1, "15/01/2025 02:10", "8.8.8.8", "malware.example.com"),
        row(2, "15/01/2025 02:10", "256.0.0.1", "example.com"),
        row(3, "2025-01-15 09:00:00", "10.0.0.4", "trusted.source.org"),
    ];

    let outcome = validate(rows);
    assert_eq!(outcome.accepted.len(), 2);
    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.status, ValidationStatus::Changed);

    let rejected = &outcome.rejected[0];
    assert_eq!(rejected.row(), 2);
    assert_eq!(rejected.errors.len(), 1);
    assert_eq!(rejected.errors[0].field(), EventField::SourceIp);
    // Original row preserved for audit
    assert_eq!(rejected.record.source_ip, "256.0.0.1");
}

#[test]
fn test_unparseable_timestamp_is_rejected_not_coerced() {
    let outcome = validate(vec![row(1, "not-a-date", "8.8.8.8", "example.com")]);
    assert!(outcome.accepted.is_empty());
    let errors = &outcome.rejected[0].errors;
    assert!(matches!(
        &errors[0],
        SchemaError::UnparseableTimestamp { field: EventField::Timestamp, value } if value == "not-a-date"
    ));
    assert_eq!(errors[0].kind(), "UnparseableTimestampError");
}

#[test]
fn test_all_failing_fields_reported() {
    let mut bad = row(7, "yesterday", "1.2.3", "nodot");
    bad.description = "  ".to_string();
    bad.md5 = Some("xyz".to_string());

    let errors = validate_record(&bad).unwrap_err();
    let fields: Vec<EventField> = errors.iter().map(|e| e.field()).collect();
    assert_eq!(
        fields,
        vec![
            EventField::Timestamp,
            EventField::SourceIp,
            EventField::Domain,
            EventField::Description,
            EventField::Md5,
        ]
    );
    assert!(matches!(errors[3], SchemaError::MissingField { .. }));
}

#[test]
fn test_empty_hash_is_absent_not_failure() {
    let mut r = row(1, "15/01/2025 12:00", "8.8.8.8", "example.com");
    r.file_hash = Some(String::new());
    let record = validate_record(&r).unwrap();
    assert_eq!(record.file_hash(), None);
}

#[test]
fn test_optional_file_fields_validated_when_present() {
    let mut r = row(1, "15/01/2025 12:00", "8.8.8.8", "example.com");
    r.file_name = Some("payload.exe".to_string());
    r.md5 = Some("D41D8CD98F00B204E9800998ECF8427E".to_string());
    assert!(validate_record(&r).is_ok());

    r.file_name = Some("payload".to_string());
    let errors = validate_record(&r).unwrap_err();
    assert_eq!(errors[0].field(), EventField::FileName);
}

#[test]
fn test_revalidation_is_noop() {
    let rows = vec![
        row(1, " 15/01/2025 02:10", "8.8.8.8", "malware.example.com "),
        row(2, "15/01/2025 07:45", "10.1.2.3", "safe.domain.net"),
    ];

    // First pass normalizes whitespace, so something changed
    let first = validate(rows);
    assert_eq!(first.status, ValidationStatus::Changed);
    assert!(first.rejected.is_empty());

    // Second pass over the normalized rows changes nothing
    let again: Vec<RawEventRecord> = first.accepted.iter().map(|r| r.raw.clone()).collect();
    let second = validate(again);
    assert!(second.is_noop());
    assert_eq!(second.input_fingerprint, second.accepted_fingerprint);
    assert_eq!(second.accepted, first.accepted);
}

#[test]
fn test_empty_batch_is_noop() {
    let outcome = validate(Vec::new());
    assert!(outcome.is_noop());
    assert_eq!(outcome.total(), 0);
}
