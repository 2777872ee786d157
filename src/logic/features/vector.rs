//! Feature Vector - Per-record model input
//!
//! Named fields for readability; `values()` yields them in `FEATURE_LAYOUT`
//! order for the model.

use serde::{Deserialize, Serialize};

use super::layout::{feature_index, FEATURE_COUNT};

/// Engineered features for one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// 0-23
    pub hour_of_day: u32,
    /// Monday = 0
    pub weekday: u32,
    /// 1-5
    pub week_of_month: u32,
    pub month: u32,
    pub year: i32,
    pub encoded_source_ip: u32,
    pub encoded_dest_ip: u32,
    pub encoded_hash: u32,
    pub encoded_domain: u32,
    pub encoded_event: u32,
}

impl FeatureVector {
    /// Values in layout order
    pub fn values(&self) -> [f64; FEATURE_COUNT] {
        [
            f64::from(self.hour_of_day),
            f64::from(self.weekday),
            f64::from(self.week_of_month),
            f64::from(self.month),
            f64::from(self.year),
            f64::from(self.encoded_source_ip),
            f64::from(self.encoded_dest_ip),
            f64::from(self.encoded_hash),
            f64::from(self.encoded_domain),
            f64::from(self.encoded_event),
        ]
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values().get(index).copied()
    }

    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        feature_index(name).and_then(|i| self.get(i))
    }

    /// (week_of_month, month, year) bucket used by the anomaly summary
    pub fn week_key(&self) -> (u32, u32, i32) {
        (self.week_of_month, self.month, self.year)
    }
}
