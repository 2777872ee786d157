//! Features Module - Feature Engineering for the anomaly model
//!
//! ## Structure
//! - `layout`: authoritative feature order, version and layout hash
//! - `encoder`: batch-local categorical codes
//! - `vector`: per-record FeatureVector
//! - `builder`: batch build (temporal decomposition + encoding)

pub mod builder;
pub mod encoder;
pub mod layout;
pub mod vector;


pub use builder::{build, temporal, FeatureSet};
pub use encoder::{CategoricalField, CategoryEncodings, CategoryTable, UNKNOWN_CATEGORY};
pub use layout::{feature_index, feature_name, LayoutInfo, DEFAULT_MODEL_FEATURES, FEATURE_COUNT, FEATURE_LAYOUT};
pub use vector::FeatureVector;
