//! Indicator Rules (Extensible)
//!
//! Predicate table: each indicator is a named pure function plus its own
//! configuration. Add a rule by implementing `IndicatorRule`, no engine edit.

use chrono::Timelike;
use std::collections::HashSet;

use super::config::{IndicatorConfig, Ipv4Cidr, OffHoursWindow};
use super::types::IndicatorKind;
use crate::logic::event::ValidatedEventRecord;

// ============================================================================
// INDICATOR RULE TRAIT
// ============================================================================

/// Pure per-record predicate
pub trait IndicatorRule: Send + Sync {
    fn kind(&self) -> IndicatorKind;
    fn evaluate(&self, record: &ValidatedEventRecord) -> bool;
}

// ============================================================================
// BUILT-IN RULES
// ============================================================================

/// Source IP not inside any private range
pub struct ExternalSourceRule {
    private_ranges: Vec<Ipv4Cidr>,
}

impl ExternalSourceRule {
    pub fn new(private_ranges: Vec<Ipv4Cidr>) -> Self {
        Self { private_ranges }
    }
}

impl IndicatorRule for ExternalSourceRule {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::ExternalSourceIp
    }

    fn evaluate(&self, record: &ValidatedEventRecord) -> bool {
        !self.private_ranges.iter().any(|net| net.contains(record.source_ip))
    }
}

/// Domain contains a denylisted keyword
pub struct DomainKeywordRule {
    keywords: Vec<String>,
}

impl DomainKeywordRule {
    pub fn new<I: IntoIterator<Item = String>>(keywords: I) -> Self {
        Self {
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
        }
    }
}

impl IndicatorRule for DomainKeywordRule {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::SuspiciousDomain
    }

    fn evaluate(&self, record: &ValidatedEventRecord) -> bool {
        let domain = record.domain().to_lowercase();
        self.keywords.iter().any(|k| domain.contains(k.as_str()))
    }
}

/// Event type is a member of the risk-event set
pub struct RiskEventRule {
    events: HashSet<String>,
}

impl RiskEventRule {
    pub fn new<I: IntoIterator<Item = String>>(events: I) -> Self {
        Self {
            events: events.into_iter().map(|e| e.trim().to_lowercase()).collect(),
        }
    }
}

impl IndicatorRule for RiskEventRule {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::RiskEvent
    }

    fn evaluate(&self, record: &ValidatedEventRecord) -> bool {
        self.events.contains(&record.event_type().trim().to_lowercase())
    }
}

/// Local hour of the timestamp falls inside the off-hours window
pub struct OffHoursRule {
    window: OffHoursWindow,
}

impl OffHoursRule {
    pub fn new(window: OffHoursWindow) -> Self {
        Self { window }
    }
}

impl IndicatorRule for OffHoursRule {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::OffHoursAccess
    }

    fn evaluate(&self, record: &ValidatedEventRecord) -> bool {
        self.window.contains(record.timestamp.hour())
    }
}

/// A file hash is attached
pub struct HashPresenceRule;

impl IndicatorRule for HashPresenceRule {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::HashPresent
    }

    fn evaluate(&self, record: &ValidatedEventRecord) -> bool {
        record.file_hash().is_some()
    }
}

// ============================================================================
// RULE TABLE
// ============================================================================

/// Ordered set of indicator predicates
pub struct RuleTable {
    rules: Vec<Box<dyn IndicatorRule>>,
}

impl RuleTable {
    /// Built-in rules, one per indicator kind
    pub fn from_config(config: &IndicatorConfig) -> Self {
        let rules: Vec<Box<dyn IndicatorRule>> = vec![
            Box::new(ExternalSourceRule::new(config.private_ranges.clone())),
            Box::new(DomainKeywordRule::new(config.domain_keywords.clone())),
            Box::new(RiskEventRule::new(config.risk_events.clone())),
            Box::new(OffHoursRule::new(config.off_hours)),
            Box::new(HashPresenceRule),
        ];
        Self { rules }
    }

    /// Add a rule. A later rule for the same kind replaces the earlier one.
    pub fn with_rule(mut self, rule: Box<dyn IndicatorRule>) -> Self {
        self.rules.retain(|r| r.kind() != rule.kind());
        self.rules.push(rule);
        self
    }

    pub fn kinds(&self) -> Vec<IndicatorKind> {
        self.rules.iter().map(|r| r.kind()).collect()
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn IndicatorRule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::from_config(&IndicatorConfig::default())
    }
}
