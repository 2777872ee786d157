//! Source Reader
//!
//! Opens a delimited event file, detects its delimiter from the header line
//! and yields raw records lazily. Fields are read as bytes; a value that is
//! not valid UTF-8 is decoded lossily and flagged on the record so the
//! validator rejects the row instead of losing it.

use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::{Path, PathBuf};

use crate::error::{TriageError, TriageResult};
use crate::logic::event::RawEventRecord;
use crate::logic::schema::ColumnMap;

/// `;` if the header has one, else `,`
pub fn detect_delimiter(header_line: &str) -> TriageResult<u8> {
    if header_line.contains(';') {
        Ok(b';')
    } else if header_line.contains(',') {
        Ok(b',')
    } else {
        Err(TriageError::UnknownDelimiter {
            header: header_line.trim_end().to_string(),
        })
    }
}

/// Open source file with a resolved header
pub struct CsvSource {
    path: PathBuf,
    delimiter: u8,
    columns: ColumnMap,
    reader: csv::Reader<File>,
}

impl CsvSource {
    pub fn open(path: impl AsRef<Path>) -> TriageResult<Self> {
        let path = path.as_ref().to_path_buf();
        let mut file = File::open(&path)?;

        let mut header_line = String::new();
        BufReader::new(&file).read_line(&mut header_line)?;
        if header_line.trim().is_empty() {
            return Err(TriageError::EmptyInput);
        }
        let delimiter = detect_delimiter(&header_line)?;
        file.rewind()?;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(file);
        let columns = ColumnMap::from_headers(reader.headers()?.iter())?;

        log::info!(
            "Source {}: delimiter '{}', {} known column(s)",
            path.display(),
            delimiter as char,
            columns.fields().count()
        );

        Ok(Self {
            path,
            delimiter,
            columns,
            reader,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    /// Raw records, row numbers starting at 1
    pub fn records(&mut self) -> impl Iterator<Item = TriageResult<RawEventRecord>> + '_ {
        let columns = &self.columns;
        let path = &self.path;
        self.reader.byte_records().enumerate().map(move |(idx, result)| -> TriageResult<RawEventRecord> {
            let row = result?;
            let record = columns.record_from_bytes(idx + 1, row.iter());
            if !record.undecodable.is_empty() {
                log::warn!(
                    "{}: row {} has undecodable bytes in {} field(s)",
                    path.display(),
                    idx + 1,
                    record.undecodable.len()
                );
            }
            Ok(record)
        })
    }

    /// Read everything into memory
    pub fn into_batch(mut self) -> TriageResult<SourceBatch> {
        let records = self.records().collect::<TriageResult<Vec<_>>>()?;
        Ok(SourceBatch {
            path: self.path,
            delimiter: self.delimiter,
            columns: self.columns,
            records,
        })
    }
}

/// Fully read source
#[derive(Debug, Clone)]
pub struct SourceBatch {
    pub path: PathBuf,
    pub delimiter: u8,
    pub columns: ColumnMap,
    pub records: Vec<RawEventRecord>,
}

impl SourceBatch {
    /// File name used in report headers
    pub fn source_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

pub fn read_source(path: impl AsRef<Path>) -> TriageResult<SourceBatch> {
    CsvSource::open(path)?.into_batch()
}
