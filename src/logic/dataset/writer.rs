//! Output Sinks
//!
//! Every write goes to a temp file in the target directory and is persisted
//! by rename. Without overwrite permission an existing target is left
//! untouched and the write fails with `DuplicateOutputPath`.

use serde::{Deserialize, Serialize};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::record::{OutputLayout, TriageRecord};
use crate::error::{TriageError, TriageResult};
use crate::logic::schema::Rejection;

/// Serialization of the augmented record file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Jsonl,
}

/// `;` when the source used `,`, otherwise the source delimiter
pub fn output_delimiter(source: u8) -> u8 {
    if source == b',' {
        b';'
    } else {
        source
    }
}

// ============================================================================
// ATOMIC WRITE
// ============================================================================

/// Write through a same-directory temp file, then rename into place
pub fn atomic_write<F>(path: &Path, overwrite: bool, write: F) -> TriageResult<()>
where
    F: FnOnce(&mut dyn Write) -> TriageResult<()>,
{
    if !overwrite && path.exists() {
        return Err(TriageError::DuplicateOutputPath { path: path.to_path_buf() });
    }

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = tempfile::Builder::new()
        .prefix(".triage-")
        .suffix(".tmp")
        .tempfile_in(dir)?;

    {
        let mut out = BufWriter::new(tmp.as_file_mut());
        write(&mut out)?;
        out.flush()?;
    }
    tmp.as_file().sync_all()?;

    if overwrite {
        tmp.persist(path).map_err(|e| TriageError::Io(e.error))?;
    } else {
        tmp.persist_noclobber(path).map_err(|e| {
            if e.error.kind() == io::ErrorKind::AlreadyExists {
                TriageError::DuplicateOutputPath { path: path.to_path_buf() }
            } else {
                TriageError::Io(e.error)
            }
        })?;
    }

    log::debug!("Persisted {}", path.display());
    Ok(())
}

// ============================================================================
// SINKS
// ============================================================================

/// Augmented record file
pub fn write_records(
    path: &Path,
    layout: &OutputLayout,
    records: &[TriageRecord],
    format: OutputFormat,
    source_delimiter: u8,
    overwrite: bool,
) -> TriageResult<()> {
    atomic_write(path, overwrite, |out| {
        match format {
            OutputFormat::Csv => {
                let mut writer = csv::WriterBuilder::new()
                    .delimiter(output_delimiter(source_delimiter))
                    .from_writer(out);
                writer.write_record(layout.header())?;
                for record in records {
                    writer.write_record(record.cells(layout))?;
                }
                writer.flush()?;
            }
            OutputFormat::Jsonl => {
                for record in records {
                    serde_json::to_writer(&mut *out, &record.to_json(layout))?;
                    out.write_all(b"\n")?;
                }
            }
        }
        Ok(())
    })?;

    log::info!("Wrote {} record(s) to {} ({:?})", records.len(), path.display(), format);
    Ok(())
}

/// One line of the rejected-row audit
#[derive(Debug, Serialize)]
struct RejectionLine<'a> {
    row: usize,
    reason: String,
    #[serde(flatten)]
    rejection: &'a Rejection,
}

/// Rejected-row audit as JSON Lines
pub fn write_rejections(path: &Path, rejected: &[Rejection], overwrite: bool) -> TriageResult<()> {
    atomic_write(path, overwrite, |out| {
        for rejection in rejected {
            let line = RejectionLine {
                row: rejection.row(),
                reason: rejection.reason(),
                rejection,
            };
            serde_json::to_writer(&mut *out, &line)?;
            out.write_all(b"\n")?;
        }
        Ok(())
    })?;

    log::info!("Wrote {} rejection(s) to {}", rejected.len(), path.display());
    Ok(())
}

/// Plain text document (resolution report, anomaly summary)
pub fn write_text(path: &Path, text: &str, overwrite: bool) -> TriageResult<()> {
    atomic_write(path, overwrite, |out| {
        out.write_all(text.as_bytes())?;
        Ok(())
    })
}

/// First `n` rows rendered as delimited text, header included
pub fn preview(layout: &OutputLayout, records: &[TriageRecord], n: usize) -> String {
    let mut lines = vec![layout.header().join(";")];
    lines.extend(records.iter().take(n).map(|r| r.cells(layout).join(";")));
    lines.join("\n")
}
