//! Triage Configuration
//!
//! Load order: defaults → JSON file → environment → CLI flags. Every layer
//! is optional; the result is validated before any stage runs.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants;
use crate::error::{TriageError, TriageResult};
use crate::logic::dataset::OutputFormat;
use crate::logic::indicators::IndicatorConfig;
use crate::logic::model::ScorerConfig;

/// Output preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub overwrite: bool,
    /// Rows logged when no output path is given
    pub preview_rows: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Csv,
            overwrite: false,
            preview_rows: constants::PREVIEW_ROWS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    pub indicators: IndicatorConfig,
    pub scorer: ScorerConfig,
    pub output: OutputConfig,
}

/// Scorer values that may come from the environment or the command line
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScorerOverrides {
    pub contamination: Option<f64>,
    pub seed: Option<u64>,
    pub n_trees: Option<usize>,
    pub min_samples: Option<usize>,
}

impl ScorerOverrides {
    pub fn from_env() -> Self {
        Self {
            contamination: constants::get_contamination(),
            seed: constants::get_seed(),
            n_trees: constants::get_trees(),
            min_samples: constants::get_min_samples(),
        }
    }
}

impl TriageConfig {
    pub fn from_json_str(text: &str) -> TriageResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> TriageResult<Self> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Defaults, then the config file (explicit path or `TRIAGE_CONFIG`),
    /// then environment overrides. Not yet validated.
    pub fn load(path: Option<&Path>) -> TriageResult<Self> {
        let path: Option<PathBuf> = path
            .map(Path::to_path_buf)
            .or_else(|| constants::get_config_path().map(PathBuf::from));

        let mut config = match path {
            Some(p) => Self::from_file(&p)?,
            None => Self::default(),
        };
        config.apply_overrides(&ScorerOverrides::from_env());
        Ok(config)
    }

    pub fn apply_overrides(&mut self, overrides: &ScorerOverrides) {
        if let Some(v) = overrides.contamination {
            self.scorer.contamination = v;
        }
        if let Some(v) = overrides.seed {
            self.scorer.seed = v;
        }
        if let Some(v) = overrides.n_trees {
            self.scorer.n_trees = v;
        }
        if let Some(v) = overrides.min_samples {
            self.scorer.min_samples = v;
        }
    }

    pub fn validate(&self) -> TriageResult<()> {
        self.indicators.validate()?;
        self.scorer.validate()?;
        if self.output.preview_rows == 0 {
            return Err(TriageError::InvalidConfig("preview_rows must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = TriageConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.output.format, OutputFormat::Csv);
        assert_eq!(config.scorer.seed, 42);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = TriageConfig::from_json_str(
            r#"{
                "scorer": { "contamination": 0.05 },
                "output": { "format": "jsonl" },
                "indicators": { "domain_keywords": ["phish"] }
            }"#,
        )
        .unwrap();

        assert_eq!(config.scorer.contamination, 0.05);
        assert_eq!(config.scorer.n_trees, 100);
        assert_eq!(config.output.format, OutputFormat::Jsonl);
        assert_eq!(config.indicators.domain_keywords, vec!["phish".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides_win() {
        let mut config = TriageConfig::default();
        config.apply_overrides(&ScorerOverrides {
            contamination: Some(0.2),
            seed: Some(7),
            n_trees: None,
            min_samples: Some(3),
        });
        assert_eq!(config.scorer.contamination, 0.2);
        assert_eq!(config.scorer.seed, 7);
        assert_eq!(config.scorer.n_trees, 100);
        assert_eq!(config.scorer.min_samples, 3);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = TriageConfig::default();
        config.scorer.contamination = 0.75;
        assert!(matches!(config.validate(), Err(TriageError::InvalidConfig(_))));

        assert!(TriageConfig::from_json_str("{ not json").is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triage.json");
        fs::write(&path, r#"{ "scorer": { "seed": 99 } }"#).unwrap();

        let config = TriageConfig::from_file(&path).unwrap();
        assert_eq!(config.scorer.seed, 99);
    }
}
