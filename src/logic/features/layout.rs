//! Feature Layout - Centralized Feature Definition
//!
//! **This file controls the feature schema**
//!
//! ## Rules:
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the vector
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Temporal (0-4) ===
    "hour_of_day",       // 0: 0-23
    "weekday",           // 1: Monday = 0
    "week_of_month",     // 2: ((day - 1) / 7) + 1
    "month",             // 3: 1-12
    "year",              // 4

    // === Categorical codes (5-9), batch-local ===
    "encoded_source_ip", // 5
    "encoded_dest_ip",   // 6
    "encoded_hash",      // 7
    "encoded_domain",    // 8
    "encoded_event",     // 9
];

/// Total number of features
pub const FEATURE_COUNT: usize = 10;

/// Features fed to the anomaly model unless configured otherwise
pub const DEFAULT_MODEL_FEATURES: &[&str] = &[
    "encoded_source_ip",
    "encoded_dest_ip",
    "encoded_hash",
    "encoded_domain",
    "hour_of_day",
    "weekday",
];

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 of version + ordered feature names
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Layout information for serialization/logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: compute_layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}
