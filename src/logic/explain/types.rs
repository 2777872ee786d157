//! Explain Types - Resolution summaries
//!
//! Data structures only - logic lives in `engine.rs`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::logic::model::AnomalyTier;

/// Risky / normal verdict for one aspect of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Risky,
    Normal,
}

impl Classification {
    pub fn from_flag(risky: bool) -> Self {
        if risky {
            Classification::Risky
        } else {
            Classification::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Risky => "RISKY",
            Classification::Normal => "Normal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schedule {
    OffHours,
    Normal,
}

impl Schedule {
    pub fn from_flag(off_hours: bool) -> Self {
        if off_hours {
            Schedule::OffHours
        } else {
            Schedule::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Schedule::OffHours => "Off working hours",
            Schedule::Normal => "Normal hours",
        }
    }
}

/// Structured resolution for one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionSummary {
    pub row: usize,
    pub event_type: String,
    pub event_class: Classification,
    pub timestamp: NaiveDateTime,
    pub schedule: Schedule,
    pub domain: String,
    pub domain_class: Classification,
    pub file_hash: Option<String>,
    pub hash_present: bool,
    /// risk_event OR off_hours_access OR suspicious_domain
    pub suspicious: bool,
    /// Informational only; never feeds `suspicious`
    pub anomaly_tier: Option<AnomalyTier>,
    pub anomaly_score: Option<f64>,
}

impl ResolutionSummary {
    pub fn verdict(&self) -> &'static str {
        if self.suspicious {
            "Suspicious"
        } else {
            "Not suspicious"
        }
    }
}
