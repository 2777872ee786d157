//! One-Shield Triage
//!
//! Batch triage of security event logs: schema validation, IOC / IOA tagging,
//! remediation mapping, isolation-forest anomaly scoring and a plain-text
//! resolution report.

pub mod api;
pub mod constants;
pub mod error;
pub mod logic;

pub use error::{SchemaError, TriageError, TriageResult};
pub use logic::config::TriageConfig;
pub use logic::pipeline::{run, PipelineReport, StageSelection};
