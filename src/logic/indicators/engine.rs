//! Indicator Engine
//!
//! Input: validated records. Output: tagged records, same order.
//! Deterministic, no cross-record state.

use super::rules::RuleTable;
use super::types::{IndicatorVector, TaggedRecord};
use crate::logic::event::ValidatedEventRecord;
use crate::logic::schema::HashKind;

/// Evaluate every rule in the table against one record
pub fn evaluate(table: &RuleTable, record: &ValidatedEventRecord) -> IndicatorVector {
    let mut vector = IndicatorVector::default();
    for rule in table.rules() {
        vector.set(rule.kind(), rule.evaluate(record));
    }
    vector
}

/// Tag a batch. Output order matches input order.
pub fn tag(table: &RuleTable, records: &[ValidatedEventRecord]) -> Vec<TaggedRecord> {
    let tagged: Vec<TaggedRecord> = records
        .iter()
        .map(|record| TaggedRecord {
            indicators: evaluate(table, record),
            hash_kind: HashKind::classify(record.file_hash()),
            record: record.clone(),
        })
        .collect();

    let compromised = tagged.iter().filter(|t| t.compromised()).count();
    log::info!(
        "Indicator engine: {} record(s) tagged with {} rule(s), {} compromised",
        tagged.len(),
        table.len(),
        compromised
    );

    tagged
}
