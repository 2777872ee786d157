//! Model Module - Unsupervised anomaly scoring
//!
//! ## Structure
//! - `isolation_forest`: seeded tree ensemble over ndarray matrices
//! - `threshold`: contamination offset (raw score quantile)
//! - `scorer`: batch fit + score
//! - `config`: ScorerConfig
//! - `types`: AnomalyResult, AnomalyTier

pub mod config;
pub mod isolation_forest;
pub mod scorer;
pub mod threshold;
pub mod types;


pub use config::ScorerConfig;
pub use isolation_forest::{average_path_length, IsolationForest, IsolationTree};
pub use scorer::{feature_matrix, fit_score, score_batch, ScoredBatch};
pub use threshold::{contamination_offset, percentile};
pub use types::{AnomalyResult, AnomalyTier};
