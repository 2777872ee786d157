//! Indicator Types
//!
//! Core types for IOC / IOA tagging. No logic beyond derived flags.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::logic::event::ValidatedEventRecord;
use crate::logic::schema::HashKind;

// ============================================================================
// INDICATOR KIND
// ============================================================================

/// Named indicator predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    /// IOC: source address outside the private ranges
    ExternalSourceIp,
    /// IOC: domain contains a denylisted keyword
    SuspiciousDomain,
    /// IOA: event type is in the risk-event set
    RiskEvent,
    /// IOA: event happened inside the off-hours window
    OffHoursAccess,
    /// A file hash is attached to the event
    HashPresent,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 5] = [
        IndicatorKind::ExternalSourceIp,
        IndicatorKind::SuspiciousDomain,
        IndicatorKind::RiskEvent,
        IndicatorKind::OffHoursAccess,
        IndicatorKind::HashPresent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorKind::ExternalSourceIp => "external_source_ip",
            IndicatorKind::SuspiciousDomain => "suspicious_domain",
            IndicatorKind::RiskEvent => "risk_event",
            IndicatorKind::OffHoursAccess => "off_hours_access",
            IndicatorKind::HashPresent => "hash_present",
        }
    }

    /// Output column written by the indicator stage
    pub fn column(&self) -> Option<&'static str> {
        match self {
            IndicatorKind::ExternalSourceIp => Some("ip_externa"),
            IndicatorKind::SuspiciousDomain => Some("dominio_sospechoso"),
            IndicatorKind::RiskEvent => Some("evento_riesgo"),
            IndicatorKind::OffHoursAccess => Some("fuera_horario"),
            IndicatorKind::HashPresent => None,
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// INDICATOR VECTOR
// ============================================================================

/// Per-record boolean indicator set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorVector {
    pub external_source_ip: bool,
    pub suspicious_domain: bool,
    pub risk_event: bool,
    pub off_hours_access: bool,
    pub hash_present: bool,
}

impl IndicatorVector {
    pub fn get(&self, kind: IndicatorKind) -> bool {
        match kind {
            IndicatorKind::ExternalSourceIp => self.external_source_ip,
            IndicatorKind::SuspiciousDomain => self.suspicious_domain,
            IndicatorKind::RiskEvent => self.risk_event,
            IndicatorKind::OffHoursAccess => self.off_hours_access,
            IndicatorKind::HashPresent => self.hash_present,
        }
    }

    pub fn set(&mut self, kind: IndicatorKind, value: bool) {
        match kind {
            IndicatorKind::ExternalSourceIp => self.external_source_ip = value,
            IndicatorKind::SuspiciousDomain => self.suspicious_domain = value,
            IndicatorKind::RiskEvent => self.risk_event = value,
            IndicatorKind::OffHoursAccess => self.off_hours_access = value,
            IndicatorKind::HashPresent => self.hash_present = value,
        }
    }

    /// Consolidated compromise flag. Hash presence alone never sets it.
    pub fn compromised(&self) -> bool {
        self.external_source_ip || self.suspicious_domain || self.risk_event || self.off_hours_access
    }

    /// Kinds that evaluated true, in canonical order
    pub fn triggered(&self) -> Vec<IndicatorKind> {
        IndicatorKind::ALL.iter().copied().filter(|k| self.get(*k)).collect()
    }
}

// ============================================================================
// TAGGED RECORD
// ============================================================================

/// Validated record plus its indicator vector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaggedRecord {
    pub record: ValidatedEventRecord,
    pub indicators: IndicatorVector,
    /// Kind of the attached hash, `None` when absent
    pub hash_kind: Option<HashKind>,
}

impl TaggedRecord {
    pub fn compromised(&self) -> bool {
        self.indicators.compromised()
    }
}
