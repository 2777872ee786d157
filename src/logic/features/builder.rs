//! Feature Builder
//!
//! Temporal decomposition + categorical encoding. One vector per input
//! record, same order; records are never dropped here.

use chrono::{Datelike, NaiveDateTime, Timelike};

use super::encoder::{CategoricalField, CategoryEncodings};
use super::layout::LayoutInfo;
use super::vector::FeatureVector;
use crate::logic::event::ValidatedEventRecord;

/// Output of one build pass
#[derive(Debug, Clone)]
pub struct FeatureSet {
    pub features: Vec<FeatureVector>,
    pub encodings: CategoryEncodings,
    pub layout: LayoutInfo,
}

impl FeatureSet {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Temporal part: (hour, weekday, week_of_month, month, year)
pub fn temporal(ts: &NaiveDateTime) -> (u32, u32, u32, u32, i32) {
    (
        ts.hour(),
        ts.weekday().num_days_from_monday(),
        (ts.day() - 1) / 7 + 1,
        ts.month(),
        ts.year(),
    )
}

/// Build features for a batch
pub fn build<'a, I>(records: I) -> FeatureSet
where
    I: IntoIterator<Item = &'a ValidatedEventRecord>,
{
    let mut encodings = CategoryEncodings::new();
    let mut features = Vec::new();

    for record in records {
        let (hour_of_day, weekday, week_of_month, month, year) = temporal(&record.timestamp);
        let mut code = |field: CategoricalField| encodings.encode(field, field.value_of(record));

        features.push(FeatureVector {
            hour_of_day,
            weekday,
            week_of_month,
            month,
            year,
            encoded_source_ip: code(CategoricalField::SourceIp),
            encoded_dest_ip: code(CategoricalField::DestIp),
            encoded_hash: code(CategoricalField::FileHash),
            encoded_domain: code(CategoricalField::Domain),
            encoded_event: code(CategoricalField::EventType),
        });
    }

    log::info!("Feature builder: {} vector(s) built", features.len());
    for field in CategoricalField::ALL {
        if let Some(table) = encodings.table(field) {
            log::debug!("  {:?}: {} categories", field, table.len());
        }
    }

    FeatureSet {
        features,
        encodings,
        layout: LayoutInfo::current(),
    }
}
