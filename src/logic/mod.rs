//! Logic Module - Triage engines
//!
//! ## Architecture
//! - `event` - Raw / validated record types
//! - `schema/` - Column resolution and row validation
//! - `indicators/` - IOC + IOA predicate table
//! - `features/` - Temporal decomposition and categorical encoding
//! - `model/` - Isolation forest anomaly scoring
//! - `response/` - Remediation mapping
//! - `explain/` - Resolution report and anomaly summary
//! - `dataset/` - Delimited input, output sinks
//! - `pipeline/` - Stage orchestration
//! - `config` - TriageConfig

pub mod config;
pub mod event;

pub mod dataset;
pub mod explain;
pub mod features;
pub mod indicators;
pub mod model;
pub mod pipeline;
pub mod response;
pub mod schema;
