//! Indicators Module
//!
//! IOC / IOA tagging of validated records.
//!
//! ## Structure
//! - `types`: IndicatorKind, IndicatorVector, TaggedRecord
//! - `config`: rule parameters (CIDR ranges, keywords, risk events, window)
//! - `rules`: predicate table (`IndicatorRule` + built-ins)
//! - `engine`: batch tagging
//!
//! ## Usage
//! ```ignore
//! let table = RuleTable::from_config(&IndicatorConfig::default());
//! let tagged = tag(&table, &outcome.accepted);
//! if tagged[0].compromised() { ... }
//! ```

pub mod config;
pub mod engine;
pub mod rules;
pub mod types;


pub use config::{IndicatorConfig, Ipv4Cidr, OffHoursWindow};
pub use engine::{evaluate, tag};
pub use rules::{IndicatorRule, RuleTable};
pub use types::{IndicatorKind, IndicatorVector, TaggedRecord};
