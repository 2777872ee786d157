//! Pipeline Module - Stage orchestration
//!
//! Validate → indicators + remediation → features + anomaly → resolution.
//! Each stage takes the full accepted batch. An anomaly-stage failure is
//! recorded on the report and the remaining outputs stay valid.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{TriageError, TriageResult};
use crate::logic::config::TriageConfig;
use crate::logic::dataset::{AnomalyCells, IndicatorCells, OutputLayout, TriageRecord};
use crate::logic::event::{RawEventRecord, ValidatedEventRecord};
use crate::logic::explain::{resolve_batch, AnomalySummary, ResolutionSummary};
use crate::logic::features::{self, FeatureSet};
use crate::logic::indicators::{self, RuleTable, TaggedRecord};
use crate::logic::model::{score_batch, ScoredBatch, ScorerConfig};
use crate::logic::response::{map_batch, RemediationSet};
use crate::logic::schema::{self, ColumnMap, ValidationOutcome};


// ============================================================================
// STAGE SELECTION
// ============================================================================

/// Which stages run after validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageSelection {
    pub indicators: bool,
    pub anomaly: bool,
    pub resolution: bool,
}

impl StageSelection {
    pub fn validate_only() -> Self {
        Self {
            indicators: false,
            anomaly: false,
            resolution: false,
        }
    }

    /// IOC + IOA tagging with remediation
    pub fn tag() -> Self {
        Self {
            indicators: true,
            ..Self::validate_only()
        }
    }

    pub fn score() -> Self {
        Self {
            anomaly: true,
            ..Self::validate_only()
        }
    }

    /// Resolution needs the indicator vectors
    pub fn resolve() -> Self {
        Self {
            indicators: true,
            resolution: true,
            ..Self::validate_only()
        }
    }

    pub fn all() -> Self {
        Self {
            indicators: true,
            anomaly: true,
            resolution: true,
        }
    }
}

// ============================================================================
// STAGES
// ============================================================================

pub fn validate_stage(rows: Vec<RawEventRecord>) -> ValidationOutcome {
    schema::validate(rows)
}

/// Tag and map remediation, same order as input
pub fn indicator_stage(table: &RuleTable, records: &[ValidatedEventRecord]) -> (Vec<TaggedRecord>, Vec<RemediationSet>) {
    let tagged = indicators::tag(table, records);
    let remediation = map_batch(&tagged);
    (tagged, remediation)
}

/// Build features, then fit and score. Features come back even when scoring fails.
pub fn anomaly_stage(
    records: &[ValidatedEventRecord],
    config: &ScorerConfig,
) -> (FeatureSet, TriageResult<ScoredBatch>) {
    let feature_set = features::build(records);
    let scored = score_batch(&feature_set.features, config);
    (feature_set, scored)
}

// ============================================================================
// REPORT
// ============================================================================

/// Everything one run produced
#[derive(Debug)]
pub struct PipelineReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub stages: StageSelection,
    pub validation: ValidationOutcome,
    pub tagged: Vec<TaggedRecord>,
    pub remediation: Vec<RemediationSet>,
    pub features: Option<FeatureSet>,
    pub anomalies: Option<ScoredBatch>,
    /// Anomaly-stage failure, kept instead of aborting the run
    pub anomaly_error: Option<TriageError>,
    pub resolutions: Vec<ResolutionSummary>,
}

impl PipelineReport {
    pub fn accepted(&self) -> &[ValidatedEventRecord] {
        &self.validation.accepted
    }

    /// Output layout for the stages that actually produced columns
    pub fn layout(&self, columns: &ColumnMap) -> OutputLayout {
        OutputLayout::new(columns, self.stages.indicators, self.anomalies.is_some())
    }

    /// Augmented output rows, one per accepted record
    pub fn triage_records(&self) -> Vec<TriageRecord> {
        self.validation
            .accepted
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let indicators = self.tagged.get(i).map(|t| IndicatorCells {
                    indicators: t.indicators,
                    hash_kind: t.hash_kind,
                    remediation: self.remediation.get(i).cloned().unwrap_or_default(),
                });
                let anomaly = match (&self.anomalies, &self.features) {
                    (Some(scored), Some(fs)) => scored
                        .results
                        .get(i)
                        .zip(fs.features.get(i))
                        .map(|(result, features)| AnomalyCells {
                            result: *result,
                            features: *features,
                        }),
                    _ => None,
                };
                TriageRecord {
                    record: record.clone(),
                    indicators,
                    anomaly,
                }
            })
            .collect()
    }

    /// Tier summary, when scoring succeeded
    pub fn anomaly_summary(&self) -> Option<AnomalySummary> {
        match (&self.anomalies, &self.features) {
            (Some(scored), Some(fs)) => Some(AnomalySummary::build(&fs.features, &scored.results)),
            _ => None,
        }
    }

    pub fn compromised_count(&self) -> usize {
        self.tagged.iter().filter(|t| t.compromised()).count()
    }
}

// ============================================================================
// RUN
// ============================================================================

/// Run the selected stages over one batch. Only configuration errors abort.
pub fn run(rows: Vec<RawEventRecord>, config: &TriageConfig, stages: StageSelection) -> TriageResult<PipelineReport> {
    config.validate()?;

    let run_id = Uuid::new_v4();
    let started_at = Utc::now();
    log::info!("[run {}] Starting triage of {} row(s)", run_id, rows.len());

    let validation = validate_stage(rows);
    log::info!(
        "[run {}] Validation: {} accepted, {} rejected, status {:?}",
        run_id,
        validation.accepted.len(),
        validation.rejected.len(),
        validation.status
    );

    let (tagged, remediation) = if stages.indicators || stages.resolution {
        let table = RuleTable::from_config(&config.indicators);
        log::debug!("[run {}] Rule table: {:?}", run_id, table.kinds());
        indicator_stage(&table, &validation.accepted)
    } else {
        (Vec::new(), Vec::new())
    };

    let (features, anomalies, anomaly_error) = if stages.anomaly {
        let (feature_set, scored) = anomaly_stage(&validation.accepted, &config.scorer);
        match scored {
            Ok(batch) => (Some(feature_set), Some(batch), None),
            Err(e) if e.is_fatal_for_pipeline() => return Err(e),
            Err(e) => {
                log::warn!("[run {}] Anomaly stage skipped: {}", run_id, e);
                (Some(feature_set), None, Some(e))
            }
        }
    } else {
        (None, None, None)
    };

    let resolutions = if stages.resolution {
        let scores = anomalies.as_ref().map(|b| b.results.as_slice()).unwrap_or(&[]);
        resolve_batch(&tagged, scores)
    } else {
        Vec::new()
    };

    let report = PipelineReport {
        run_id,
        started_at,
        stages: StageSelection {
            indicators: stages.indicators || stages.resolution,
            ..stages
        },
        validation,
        tagged,
        remediation,
        features,
        anomalies,
        anomaly_error,
        resolutions,
    };

    log::info!(
        "[run {}] Done: {} compromised, {} outlier(s)",
        run_id,
        report.compromised_count(),
        report.anomalies.as_ref().map(|b| b.outliers).unwrap_or(0)
    );
    Ok(report)
}
