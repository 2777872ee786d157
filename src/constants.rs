//! Central Configuration Constants
//!
//! Single source of truth for scorer defaults and the environment variables
//! that override them.

/// Default expected fraction of anomalous records
pub const DEFAULT_CONTAMINATION: f64 = 0.1;

/// Default ensemble seed
pub const DEFAULT_SEED: u64 = 42;

/// Default number of isolation trees
pub const DEFAULT_TREES: usize = 100;

/// Default per-tree subsample cap
pub const DEFAULT_MAX_SAMPLES: usize = 256;

/// Smallest batch the scorer accepts by default
pub const DEFAULT_MIN_SAMPLES: usize = 10;

/// Rows shown when no output path is given
pub const PREVIEW_ROWS: usize = 5;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "One-Shield Triage";

// ============================================
// Environment variables
// ============================================

pub const ENV_CONFIG: &str = "TRIAGE_CONFIG";
pub const ENV_CONTAMINATION: &str = "TRIAGE_CONTAMINATION";
pub const ENV_SEED: &str = "TRIAGE_SEED";
pub const ENV_TREES: &str = "TRIAGE_TREES";
pub const ENV_MIN_SAMPLES: &str = "TRIAGE_MIN_SAMPLES";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Parsed env value, `None` when unset or unparseable
pub fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring {}={:?}: not a valid value", name, raw);
            None
        }
    }
}

/// Config file path from environment
pub fn get_config_path() -> Option<String> {
    std::env::var(ENV_CONFIG).ok().filter(|s| !s.trim().is_empty())
}

pub fn get_contamination() -> Option<f64> {
    env_parse(ENV_CONTAMINATION)
}

pub fn get_seed() -> Option<u64> {
    env_parse(ENV_SEED)
}

pub fn get_trees() -> Option<usize> {
    env_parse(ENV_TREES)
}

pub fn get_min_samples() -> Option<usize> {
    env_parse(ENV_MIN_SAMPLES)
}
