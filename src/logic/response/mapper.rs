//! Remediation Mapper
//!
//! Pure mapping from indicators to recommended actions. Nothing is executed.

use super::types::{RemediationAction, RemediationSet};
use crate::logic::indicators::{IndicatorKind, IndicatorVector, TaggedRecord};

/// Indicator that triggers each action
const ACTION_TRIGGERS: [(IndicatorKind, RemediationAction); 4] = [
    (IndicatorKind::ExternalSourceIp, RemediationAction::BlockIp),
    (IndicatorKind::SuspiciousDomain, RemediationAction::BlacklistDomain),
    (IndicatorKind::RiskEvent, RemediationAction::ReviewAuthPolicy),
    (IndicatorKind::OffHoursAccess, RemediationAction::RaiseOffHoursAlert),
];

/// Actions for one indicator vector
pub fn map(indicators: &IndicatorVector, hash_present: bool) -> RemediationSet {
    let mut set: RemediationSet = ACTION_TRIGGERS
        .iter()
        .filter(|(kind, _)| indicators.get(*kind))
        .map(|(_, action)| *action)
        .collect();

    if hash_present {
        set.insert(RemediationAction::UpdateAvSignatures);
    }
    set
}

/// Actions for a tagged record
pub fn map_tagged(tagged: &TaggedRecord) -> RemediationSet {
    map(&tagged.indicators, tagged.indicators.hash_present)
}

/// Actions for a batch, same order
pub fn map_batch(tagged: &[TaggedRecord]) -> Vec<RemediationSet> {
    let sets: Vec<RemediationSet> = tagged.iter().map(map_tagged).collect();
    let with_actions = sets.iter().filter(|s| !s.is_empty()).count();
    log::info!(
        "Remediation mapper: {}/{} record(s) with recommended actions",
        with_actions,
        sets.len()
    );
    sets
}
