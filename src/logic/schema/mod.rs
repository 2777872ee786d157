//! Schema Module
//!
//! First pipeline stage: per-field syntactic validation and normalization.
//!
//! ## Structure
//! - `columns`: header resolution (required / optional / dropped columns)
//! - `rules`: per-field validators (IP, domain, timestamp, file name, MD5)
//! - `types`: Rejection, ValidationOutcome
//! - `validator`: batch partitioning into accepted / rejected

pub mod columns;
pub mod rules;
pub mod types;
pub mod validator;

#[cfg(test)]
mod tests;

pub use columns::ColumnMap;
pub use rules::{HashKind, TIMESTAMP_FORMATS};
pub use types::{Rejection, ValidationOutcome, ValidationStatus};
pub use validator::{validate, validate_record};
