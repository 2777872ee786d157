//! Anomaly Scorer
//!
//! Fits an isolation forest on the batch's model features and scores the same
//! batch. Output is one `AnomalyResult` per input vector, same order.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::ScorerConfig;
use super::isolation_forest::IsolationForest;
use super::threshold::contamination_offset;
use super::types::{AnomalyResult, AnomalyTier};
use crate::error::{TriageError, TriageResult};
use crate::logic::features::FeatureVector;

/// Scored batch plus the fitted offset
#[derive(Debug, Clone)]
pub struct ScoredBatch {
    pub results: Vec<AnomalyResult>,
    /// Raw-score quantile subtracted to form the decision function
    pub offset: f64,
    pub outliers: usize,
}

impl ScoredBatch {
    pub fn count_tier(&self, tier: AnomalyTier) -> usize {
        self.results.iter().filter(|r| r.tier() == tier).count()
    }
}

/// Model input matrix: one row per vector, configured columns only
pub fn feature_matrix(features: &[FeatureVector], columns: &[usize]) -> Array2<f64> {
    Array2::from_shape_fn((features.len(), columns.len()), |(i, j)| features[i].values()[columns[j]])
}

/// Fit and score one batch
pub fn score_batch(features: &[FeatureVector], config: &ScorerConfig) -> TriageResult<ScoredBatch> {
    config.validate()?;

    if features.len() < config.min_samples {
        return Err(TriageError::InsufficientData {
            required: config.min_samples,
            actual: features.len(),
        });
    }

    let columns = config.feature_columns()?;
    let data = feature_matrix(features, &columns);

    let mut rng = StdRng::seed_from_u64(config.seed);
    let forest = IsolationForest::fit(data.view(), config.n_trees, config.max_samples, &mut rng);
    let raw = forest.score_samples(data.view()).to_vec();

    let offset = contamination_offset(&raw, config.contamination).ok_or(TriageError::EmptyInput)?;

    let results: Vec<AnomalyResult> = raw
        .iter()
        .map(|&s| {
            let anomaly_score = s - offset;
            AnomalyResult {
                anomaly_score,
                is_outlier: anomaly_score < 0.0,
            }
        })
        .collect();
    let outliers = results.iter().filter(|r| r.is_outlier).count();

    log::info!(
        "Anomaly scorer: {} record(s), {} outlier(s), contamination {}, seed {}",
        results.len(),
        outliers,
        config.contamination,
        config.seed
    );

    Ok(ScoredBatch { results, offset, outliers })
}

/// Fit and score one batch, results only
pub fn fit_score(features: &[FeatureVector], config: &ScorerConfig) -> TriageResult<Vec<AnomalyResult>> {
    score_batch(features, config).map(|batch| batch.results)
}
