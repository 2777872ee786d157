//! Response Module - Remediation recommendations
//!
//! Maps indicator vectors to an ordered list of recommended actions. The
//! crate never executes actions; it only writes them to the output.
//!
//! # Components
//! - `types.rs`: RemediationAction, RemediationSet
//! - `mapper.rs`: indicator → action mapping

pub mod mapper;
pub mod types;

pub use mapper::{map, map_batch, map_tagged};
pub use types::{RemediationAction, RemediationSet};
