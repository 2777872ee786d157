//! Dataset Module - Tabular input and output
//!
//! Reads delimited event files and writes the augmented record file, the
//! rejected-row audit and text documents. All I/O of the crate lives here.

pub mod reader;
pub mod record;
pub mod writer;

#[cfg(test)]
mod tests;

pub use reader::{detect_delimiter, read_source, CsvSource, SourceBatch};
pub use record::{bool_cell, indicator_columns, AnomalyCells, IndicatorCells, OutputLayout, TriageRecord, ANOMALY_COLUMNS};
pub use writer::{atomic_write, output_delimiter, preview, write_records, write_rejections, write_text, OutputFormat};
