//! Resolution Engine - per-record classification and schedule

use super::types::{Classification, ResolutionSummary, Schedule};
use crate::logic::event::ValidatedEventRecord;
use crate::logic::indicators::{IndicatorVector, TaggedRecord};
use crate::logic::model::AnomalyResult;

/// Resolution-level suspicion. Unlike `IndicatorVector::compromised`, an
/// external source IP alone does not make a record suspicious.
pub fn is_suspicious(indicators: &IndicatorVector) -> bool {
    indicators.risk_event || indicators.off_hours_access || indicators.suspicious_domain
}

pub fn resolve(
    record: &ValidatedEventRecord,
    indicators: &IndicatorVector,
    anomaly: Option<&AnomalyResult>,
) -> ResolutionSummary {
    ResolutionSummary {
        row: record.row(),
        event_type: record.event_type().to_string(),
        event_class: Classification::from_flag(indicators.risk_event),
        timestamp: record.timestamp,
        schedule: Schedule::from_flag(indicators.off_hours_access),
        domain: record.domain().to_string(),
        domain_class: Classification::from_flag(indicators.suspicious_domain),
        file_hash: record.file_hash().map(str::to_string),
        hash_present: indicators.hash_present,
        suspicious: is_suspicious(indicators),
        anomaly_tier: anomaly.map(|a| a.tier()),
        anomaly_score: anomaly.map(|a| a.anomaly_score),
    }
}

/// Resolve a tagged batch. `anomalies` is either empty or one per record.
pub fn resolve_batch(tagged: &[TaggedRecord], anomalies: &[AnomalyResult]) -> Vec<ResolutionSummary> {
    let anomalies = if anomalies.len() == tagged.len() {
        anomalies
    } else {
        if !anomalies.is_empty() {
            log::warn!(
                "Resolution: {} anomaly result(s) for {} record(s), ignoring tiers",
                anomalies.len(),
                tagged.len()
            );
        }
        &[]
    };

    let summaries: Vec<ResolutionSummary> = tagged
        .iter()
        .enumerate()
        .map(|(i, t)| resolve(&t.record, &t.indicators, anomalies.get(i)))
        .collect();

    let suspicious = summaries.iter().filter(|s| s.suspicious).count();
    log::info!("Resolution: {}/{} record(s) suspicious", suspicious, summaries.len());
    summaries
}
