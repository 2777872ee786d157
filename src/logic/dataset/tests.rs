use super::*;
use crate::error::TriageError;
use crate::logic::event::EventField;
use crate::logic::indicators::{tag, RuleTable};
use crate::logic::response::map_tagged;
use crate::logic::schema::validate;
use std::fs;
use tempfile::tempdir;

const HEADER: &str = "timestamp,origen_IP,destino_IP,hash_archivo,dominio,evento,descripcion";

fn write_source(dir: &std::path::Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path
}

// ============================================================================
// READER
// ============================================================================

#[test]
fn test_delimiter_detection() {
    assert_eq!(detect_delimiter("a;b,c").unwrap(), b';');
    assert_eq!(detect_delimiter("a,b,c").unwrap(), b',');
    assert!(matches!(
        detect_delimiter("timestamp\torigen_IP"),
        Err(TriageError::UnknownDelimiter { .. })
    ));
}

#[test]
fn test_read_comma_source() {
    let dir = tempdir().unwrap();
    let path = write_source(
        dir.path(),
        "eventos.csv",
        &format!(
            "{HEADER},extra\n15/01/2025 02:10,8.8.8.8,192.168.1.5,,malware.example.com,Acceso no autorizado,Intento,x\n"
        ),
    );

    let batch = read_source(&path).unwrap();
    assert_eq!(batch.delimiter, b',');
    assert_eq!(batch.columns.dropped(), &["extra".to_string()]);
    assert_eq!(batch.records.len(), 1);
    assert_eq!(batch.records[0].row, 1);
    assert_eq!(batch.records[0].source_ip, "8.8.8.8");
    assert_eq!(batch.records[0].file_hash, None);
    assert_eq!(batch.source_name(), "eventos.csv");
}

#[test]
fn test_read_semicolon_source_with_short_row() {
    let dir = tempdir().unwrap();
    let body = format!(
        "{}\n2025-01-15 14:30:00;10.0.0.1;10.0.0.2;abc;example.com;Inicio de sesión;ok\n2025-01-15 14:31:00;10.0.0.1\n",
        HEADER.replace(',', ";")
    );
    let path = write_source(dir.path(), "eventos.csv", &body);

    let batch = read_source(&path).unwrap();
    assert_eq!(batch.delimiter, b';');
    assert_eq!(batch.records.len(), 2);
    assert_eq!(batch.records[1].row, 2);
    assert_eq!(batch.records[1].domain, "");
}

#[test]
fn test_undecodable_row_is_rejected_not_dropped() {
    let dir = tempdir().unwrap();
    let mut body = format!("{HEADER}\n15/01/2025 02:10,8.8.8.8,192.168.1.5,,example.com,Acceso autorizado,ok\n").into_bytes();
    body.extend_from_slice(b"15/01/2025 03:10,8.8.8.8,192.168.1.5,,bad\xff\xfe.com,Acceso autorizado,ok\n");
    let path = dir.path().join("eventos.csv");
    fs::write(&path, &body).unwrap();

    let batch = read_source(&path).unwrap();
    assert_eq!(batch.records.len(), 2);
    assert!(batch.records[0].undecodable.is_empty());
    assert_eq!(batch.records[1].undecodable, vec![EventField::Domain]);

    let outcome = validate(batch.records);
    assert_eq!(outcome.accepted.len(), 1);
    assert_eq!(outcome.rejected.len(), 1);
    assert!(!outcome.is_noop());
    assert_eq!(outcome.rejected[0].row(), 2);
    assert!(outcome.rejected[0].reason().contains("not valid UTF-8"));

    let out = dir.path().join("rejected.jsonl");
    write_rejections(&out, &outcome.rejected, false).unwrap();
    let line = fs::read_to_string(&out).unwrap();
    let value: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
    assert_eq!(value["row"], serde_json::json!(2));
    assert_eq!(value["errors"][0]["kind"], serde_json::json!("invalid_encoding"));
}

#[test]
fn test_missing_column_is_fatal_on_read() {
    let dir = tempdir().unwrap();
    let path = write_source(dir.path(), "bad.csv", "timestamp,origen_IP\n15/01/2025 02:10,8.8.8.8\n");
    assert!(matches!(read_source(&path), Err(TriageError::MissingColumn { .. })));
}

#[test]
fn test_empty_file_and_unknown_delimiter() {
    let dir = tempdir().unwrap();
    let empty = write_source(dir.path(), "empty.csv", "");
    assert!(matches!(read_source(&empty), Err(TriageError::EmptyInput)));

    let tabbed = write_source(dir.path(), "tabbed.csv", "timestamp\torigen_IP\n");
    assert!(matches!(read_source(&tabbed), Err(TriageError::UnknownDelimiter { .. })));
}

// ============================================================================
// WRITER
// ============================================================================

fn tagged_records(batch: &SourceBatch) -> Vec<TriageRecord> {
    let outcome = validate(batch.records.clone());
    tag(&RuleTable::default(), &outcome.accepted)
        .into_iter()
        .map(|t| {
            let remediation = map_tagged(&t);
            TriageRecord {
                indicators: Some(IndicatorCells {
                    indicators: t.indicators,
                    hash_kind: t.hash_kind,
                    remediation,
                }),
                ..TriageRecord::new(t.record)
            }
        })
        .collect()
}

#[test]
fn test_output_delimiter_rule() {
    assert_eq!(output_delimiter(b','), b';');
    assert_eq!(output_delimiter(b';'), b';');
}

#[test]
fn test_write_indicator_stage_csv() {
    let dir = tempdir().unwrap();
    let src = write_source(
        dir.path(),
        "in.csv",
        &format!(
            "{HEADER}\n15/01/2025 02:10,8.8.8.8,192.168.1.5,d41d8cd98f00b204e9800998ecf8427e,malware.example.com,Acceso no autorizado,Intento\n"
        ),
    );
    let batch = read_source(&src).unwrap();
    let records = tagged_records(&batch);
    let layout = OutputLayout::new(&batch.columns, true, false);

    let out = dir.path().join("out.csv");
    write_records(&out, &layout, &records, OutputFormat::Csv, batch.delimiter, false).unwrap();

    let text = fs::read_to_string(&out).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "timestamp;origen_IP;destino_IP;hash_archivo;dominio;evento;descripcion;\
         ip_externa;tipo_hash;dominio_sospechoso;evento_riesgo;fuera_horario;indicador;medidas_remediacion"
    );
    let row = lines.next().unwrap();
    assert!(row.contains(";True;MD5;True;True;True;True;"));
    assert!(row.ends_with(
        "Block IP in firewall, Add domain to blacklist, Review access and auth policies, \
         Raise off-hours alert, Update antivirus signatures and blacklist hash"
    ));
}

#[test]
fn test_existing_target_is_never_touched() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("report.txt");
    fs::write(&out, "original").unwrap();

    let err = write_text(&out, "new", false).unwrap_err();
    assert!(matches!(err, TriageError::DuplicateOutputPath { .. }));
    assert_eq!(fs::read_to_string(&out).unwrap(), "original");

    write_text(&out, "new", true).unwrap();
    assert_eq!(fs::read_to_string(&out).unwrap(), "new");

    // No temp files left behind
    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_jsonl_output_is_typed() {
    let dir = tempdir().unwrap();
    let src = write_source(
        dir.path(),
        "in.csv",
        &format!("{HEADER}\n15/01/2025 12:00,10.0.0.1,10.0.0.2,,example.com,Inicio de sesión,ok\n"),
    );
    let batch = read_source(&src).unwrap();
    let records = tagged_records(&batch);
    let layout = OutputLayout::new(&batch.columns, true, true);

    let out = dir.path().join("out.jsonl");
    write_records(&out, &layout, &records, OutputFormat::Jsonl, batch.delimiter, false).unwrap();

    let line = fs::read_to_string(&out).unwrap();
    let value: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
    assert_eq!(value["ip_externa"], serde_json::json!(false));
    assert_eq!(value["indicador"], serde_json::json!(false));
    assert_eq!(value["hash_archivo"], serde_json::Value::Null);
    assert_eq!(value["tipo_hash"], serde_json::Value::Null);
    assert_eq!(value["medidas_remediacion"], serde_json::json!([]));
    assert_eq!(value["anomaly_score"], serde_json::Value::Null);
}

#[test]
fn test_rejection_audit() {
    let dir = tempdir().unwrap();
    let src = write_source(
        dir.path(),
        "in.csv",
        &format!("{HEADER}\nnot-a-date,999.1.1.1,10.0.0.2,,example.com,Inicio de sesión,ok\n"),
    );
    let batch = read_source(&src).unwrap();
    let outcome = validate(batch.records.clone());
    assert_eq!(outcome.rejected.len(), 1);

    let out = dir.path().join("rejected.jsonl");
    write_rejections(&out, &outcome.rejected, false).unwrap();

    let line = fs::read_to_string(&out).unwrap();
    let value: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
    assert_eq!(value["row"], serde_json::json!(1));
    assert_eq!(value["errors"].as_array().unwrap().len(), 2);
    assert_eq!(value["record"]["source_ip"], serde_json::json!("999.1.1.1"));
}

#[test]
fn test_missing_stage_cells_are_blank() {
    let layout = OutputLayout {
        base: vec![EventField::Domain],
        indicator_stage: true,
        anomaly_stage: true,
    };
    let batch_dir = tempdir().unwrap();
    let src = write_source(
        batch_dir.path(),
        "in.csv",
        &format!("{HEADER}\n15/01/2025 12:00,10.0.0.1,10.0.0.2,,example.com,Inicio de sesión,ok\n"),
    );
    let batch = read_source(&src).unwrap();
    let accepted = validate(batch.records.clone()).accepted;
    let record = TriageRecord::new(accepted[0].clone());

    let cells = record.cells(&layout);
    assert_eq!(cells.len(), layout.header().len());
    assert_eq!(cells[0], "example.com");
    assert!(cells[1..].iter().all(|c| c.is_empty()));
}
