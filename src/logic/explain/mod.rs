//! Explain Module - Resolution reporting
//!
//! ## Structure
//! - `types`: ResolutionSummary and its classifications
//! - `engine`: per-record resolution (pure)
//! - `report`: plain-text resolution document
//! - `summary`: anomaly tier summary with weekday × hour grids

pub mod engine;
pub mod report;
pub mod summary;
pub mod types;


pub use engine::{is_suspicious, resolve, resolve_batch};
pub use report::{document_header, render_paragraph, render_report};
pub use summary::{AnomalySummary, TierGrid, WeekBucket};
pub use types::{Classification, ResolutionSummary, Schedule};
