//! Triage Record - augmented output row
//!
//! Original columns plus whatever engine columns the executed stages
//! produced. `OutputLayout` fixes the column set for one output file.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::logic::event::{EventField, ValidatedEventRecord};
use crate::logic::features::FeatureVector;
use crate::logic::indicators::{IndicatorKind, IndicatorVector};
use crate::logic::model::AnomalyResult;
use crate::logic::response::RemediationSet;
use crate::logic::schema::{ColumnMap, HashKind};

// ============================================================================
// COLUMNS
// ============================================================================

pub const COL_HASH_KIND: &str = "tipo_hash";
pub const COL_INDICATOR: &str = "indicador";
pub const COL_REMEDIATION: &str = "medidas_remediacion";

pub const ANOMALY_COLUMNS: [&str; 7] = ["anomaly_score", "anomaly", "hora", "dia_semana", "semana_mes", "mes", "año"];

/// Indicator stage columns, in output order
pub fn indicator_columns() -> Vec<&'static str> {
    let column = |k: IndicatorKind| k.column().unwrap_or_default();
    vec![
        column(IndicatorKind::ExternalSourceIp),
        COL_HASH_KIND,
        column(IndicatorKind::SuspiciousDomain),
        column(IndicatorKind::RiskEvent),
        column(IndicatorKind::OffHoursAccess),
        COL_INDICATOR,
        COL_REMEDIATION,
    ]
}

/// Booleans the way the downstream spreadsheets expect them
pub fn bool_cell(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Column set of one output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub base: Vec<EventField>,
    pub indicator_stage: bool,
    pub anomaly_stage: bool,
}

impl OutputLayout {
    pub fn new(columns: &ColumnMap, indicator_stage: bool, anomaly_stage: bool) -> Self {
        Self {
            base: columns.fields().collect(),
            indicator_stage,
            anomaly_stage,
        }
    }

    pub fn header(&self) -> Vec<String> {
        let mut header: Vec<String> = self.base.iter().map(|f| f.column().to_string()).collect();
        if self.indicator_stage {
            header.extend(indicator_columns().into_iter().map(String::from));
        }
        if self.anomaly_stage {
            header.extend(ANOMALY_COLUMNS.iter().map(|c| c.to_string()));
        }
        header
    }
}

// ============================================================================
// RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorCells {
    pub indicators: IndicatorVector,
    pub hash_kind: Option<HashKind>,
    pub remediation: RemediationSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnomalyCells {
    pub result: AnomalyResult,
    pub features: FeatureVector,
}

/// One accepted record with its engine outputs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriageRecord {
    pub record: ValidatedEventRecord,
    pub indicators: Option<IndicatorCells>,
    pub anomaly: Option<AnomalyCells>,
}

impl TriageRecord {
    pub fn new(record: ValidatedEventRecord) -> Self {
        Self {
            record,
            indicators: None,
            anomaly: None,
        }
    }

    /// Text cells for delimited output. Missing stage data reads as blank.
    pub fn cells(&self, layout: &OutputLayout) -> Vec<String> {
        let mut cells: Vec<String> = layout.base.iter().map(|f| self.record.raw.get(*f).to_string()).collect();

        if layout.indicator_stage {
            match &self.indicators {
                Some(ic) => {
                    let v = &ic.indicators;
                    cells.push(bool_cell(v.external_source_ip).to_string());
                    cells.push(ic.hash_kind.map(|k| k.as_str().to_string()).unwrap_or_default());
                    cells.push(bool_cell(v.suspicious_domain).to_string());
                    cells.push(bool_cell(v.risk_event).to_string());
                    cells.push(bool_cell(v.off_hours_access).to_string());
                    cells.push(bool_cell(v.compromised()).to_string());
                    cells.push(ic.remediation.joined());
                }
                None => cells.extend(std::iter::repeat(String::new()).take(indicator_columns().len())),
            }
        }

        if layout.anomaly_stage {
            match &self.anomaly {
                Some(ac) => {
                    let f = &ac.features;
                    cells.push(ac.result.anomaly_score.to_string());
                    cells.push(ac.result.label().to_string());
                    cells.push(f.hour_of_day.to_string());
                    cells.push(f.weekday.to_string());
                    cells.push(f.week_of_month.to_string());
                    cells.push(f.month.to_string());
                    cells.push(f.year.to_string());
                }
                None => cells.extend(std::iter::repeat(String::new()).take(ANOMALY_COLUMNS.len())),
            }
        }

        cells
    }

    /// Typed JSON object for JSON Lines output
    pub fn to_json(&self, layout: &OutputLayout) -> Value {
        let mut obj = Map::new();
        for field in &layout.base {
            let value = self.record.raw.get(*field);
            let value = if value.is_empty() { Value::Null } else { json!(value) };
            obj.insert(field.column().to_string(), value);
        }

        if layout.indicator_stage {
            let names = indicator_columns();
            let values: Vec<Value> = match &self.indicators {
                Some(ic) => {
                    let v = &ic.indicators;
                    vec![
                        json!(v.external_source_ip),
                        json!(ic.hash_kind.map(|k| k.as_str())),
                        json!(v.suspicious_domain),
                        json!(v.risk_event),
                        json!(v.off_hours_access),
                        json!(v.compromised()),
                        json!(ic.remediation.labels()),
                    ]
                }
                None => vec![Value::Null; names.len()],
            };
            for (name, value) in names.into_iter().zip(values) {
                obj.insert(name.to_string(), value);
            }
        }

        if layout.anomaly_stage {
            let values: Vec<Value> = match &self.anomaly {
                Some(ac) => {
                    let f = &ac.features;
                    vec![
                        json!(ac.result.anomaly_score),
                        json!(ac.result.label()),
                        json!(f.hour_of_day),
                        json!(f.weekday),
                        json!(f.week_of_month),
                        json!(f.month),
                        json!(f.year),
                    ]
                }
                None => vec![Value::Null; ANOMALY_COLUMNS.len()],
            };
            for (name, value) in ANOMALY_COLUMNS.iter().zip(values) {
                obj.insert(name.to_string(), value);
            }
        }

        Value::Object(obj)
    }
}
