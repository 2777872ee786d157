//! Scorer Configuration
//!
//! Isolation forest parameters. Loaded from the config file, environment or
//! CLI flags.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{TriageError, TriageResult};
use crate::logic::features::{feature_index, DEFAULT_MODEL_FEATURES};

/// Scorer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    /// Expected fraction of anomalous records, (0, 0.5]
    pub contamination: f64,
    /// Seed for ensemble randomization
    pub seed: u64,
    /// Number of isolation trees
    pub n_trees: usize,
    /// Subsample size per tree (capped at batch size)
    pub max_samples: usize,
    /// Smallest batch the scorer accepts
    pub min_samples: usize,
    /// Model input columns, by feature name
    pub features: Vec<String>,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            contamination: constants::DEFAULT_CONTAMINATION,
            seed: constants::DEFAULT_SEED,
            n_trees: constants::DEFAULT_TREES,
            max_samples: constants::DEFAULT_MAX_SAMPLES,
            min_samples: constants::DEFAULT_MIN_SAMPLES,
            features: DEFAULT_MODEL_FEATURES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ScorerConfig {
    pub fn new(contamination: f64, seed: u64) -> Self {
        Self {
            contamination,
            seed,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> TriageResult<()> {
        if !(self.contamination > 0.0 && self.contamination <= 0.5) {
            return Err(TriageError::InvalidConfig(format!(
                "contamination {} outside (0, 0.5]",
                self.contamination
            )));
        }
        if self.n_trees == 0 {
            return Err(TriageError::InvalidConfig("n_trees must be at least 1".to_string()));
        }
        if self.max_samples < 2 {
            return Err(TriageError::InvalidConfig("max_samples must be at least 2".to_string()));
        }
        if self.min_samples < 2 {
            return Err(TriageError::InvalidConfig("min_samples must be at least 2".to_string()));
        }
        if self.features.is_empty() {
            return Err(TriageError::InvalidConfig("no model features configured".to_string()));
        }
        self.feature_columns().map(|_| ())
    }

    /// Layout indices of the configured model features
    pub fn feature_columns(&self) -> TriageResult<Vec<usize>> {
        self.features
            .iter()
            .map(|name| {
                feature_index(name)
                    .ok_or_else(|| TriageError::InvalidConfig(format!("unknown model feature '{}'", name)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScorerConfig::default();
        assert_eq!(config.contamination, 0.1);
        assert_eq!(config.n_trees, 100);
        assert_eq!(config.min_samples, 10);
        assert!(config.validate().is_ok());
        assert_eq!(config.feature_columns().unwrap(), vec![5, 6, 7, 8, 0, 1]);
    }

    #[test]
    fn test_rejects_bad_contamination() {
        assert!(ScorerConfig::new(0.0, 1).validate().is_err());
        assert!(ScorerConfig::new(0.6, 1).validate().is_err());
        assert!(ScorerConfig::new(f64::NAN, 1).validate().is_err());
        assert!(ScorerConfig::new(0.5, 1).validate().is_ok());
    }

    #[test]
    fn test_rejects_unknown_feature() {
        let config = ScorerConfig {
            features: vec!["hour_of_day".into(), "cpu_percent".into()],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(TriageError::InvalidConfig(_))));
    }

    #[test]
    fn test_min_samples_floor() {
        let config = ScorerConfig { min_samples: 1, ..Default::default() };
        assert!(config.validate().is_err());
    }
}
