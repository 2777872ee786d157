//! Anomaly Types
//!
//! Per-record scoring output and the three-tier presentation contract.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-record output of the anomaly scorer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyResult {
    /// Decision function: higher = more normal, negative = anomalous side
    pub anomaly_score: f64,
    /// Falls inside the configured contamination fraction
    pub is_outlier: bool,
}

impl AnomalyResult {
    /// Conventional label: 1 = inlier, -1 = outlier
    pub fn label(&self) -> i8 {
        if self.is_outlier {
            -1
        } else {
            1
        }
    }

    pub fn tier(&self) -> AnomalyTier {
        AnomalyTier::from_result(self)
    }
}

/// Presentation tier downstream reporting keys off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyTier {
    Normal,
    Borderline,
    Strong,
}

impl AnomalyTier {
    pub const ALL: [AnomalyTier; 3] = [AnomalyTier::Normal, AnomalyTier::Borderline, AnomalyTier::Strong];

    /// not outlier → normal; outlier & score > 0 → borderline; otherwise strong
    pub fn from_result(result: &AnomalyResult) -> Self {
        if !result.is_outlier {
            AnomalyTier::Normal
        } else if result.anomaly_score > 0.0 {
            AnomalyTier::Borderline
        } else {
            AnomalyTier::Strong
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyTier::Normal => "normal",
            AnomalyTier::Borderline => "borderline anomaly",
            AnomalyTier::Strong => "strong anomaly",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            AnomalyTier::Normal => "green",
            AnomalyTier::Borderline => "orange",
            AnomalyTier::Strong => "red",
        }
    }
}

impl fmt::Display for AnomalyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_buckets() {
        let normal = AnomalyResult { anomaly_score: -0.2, is_outlier: false };
        let borderline = AnomalyResult { anomaly_score: 0.01, is_outlier: true };
        let strong = AnomalyResult { anomaly_score: 0.0, is_outlier: true };
        let stronger = AnomalyResult { anomaly_score: -0.15, is_outlier: true };

        assert_eq!(normal.tier(), AnomalyTier::Normal);
        assert_eq!(borderline.tier(), AnomalyTier::Borderline);
        assert_eq!(strong.tier(), AnomalyTier::Strong);
        assert_eq!(stronger.tier(), AnomalyTier::Strong);
    }

    #[test]
    fn test_labels_and_colors() {
        assert_eq!(AnomalyResult { anomaly_score: 0.1, is_outlier: false }.label(), 1);
        assert_eq!(AnomalyResult { anomaly_score: -0.1, is_outlier: true }.label(), -1);
        assert_eq!(AnomalyTier::Strong.color(), "red");
        assert_eq!(AnomalyTier::Borderline.to_string(), "borderline anomaly");
    }
}
