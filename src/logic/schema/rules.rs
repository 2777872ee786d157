//! Field Rules - Per-field syntactic validators
//!
//! Pure functions, no record context. Patterns are compiled once.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use std::net::Ipv4Addr;

// ============================================================================
// PATTERNS
// ============================================================================

static IPV4_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(25[0-5]|2[0-4][0-9]|1?[0-9][0-9]?)\.(25[0-5]|2[0-4][0-9]|1?[0-9][0-9]?)\.(25[0-5]|2[0-4][0-9]|1?[0-9][0-9]?)\.(25[0-5]|2[0-4][0-9]|1?[0-9][0-9]?)$",
    )
    .expect("static IPv4 pattern")
});

static DOMAIN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(www\.)?[a-zA-Z0-9-]+(\.[a-zA-Z0-9-]+)*\.[a-zA-Z]{2,}$")
        .expect("static domain pattern")
});

static FILE_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.+\.[a-zA-Z0-9]{1,5}$").expect("static file name pattern"));

static MD5_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-fA-F0-9]{32}$").expect("static md5 pattern"));

static SHA256_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-fA-F0-9]{64}$").expect("static sha256 pattern"));

/// Accepted timestamp formats, tried in order; first match wins
pub const TIMESTAMP_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
];

// ============================================================================
// VALIDATORS
// ============================================================================

/// Four dot-separated octets, each in [0, 255]
pub fn validate_ip(value: &str) -> bool {
    IPV4_PATTERN.is_match(value)
}

/// Parse an address that passed `validate_ip`.
///
/// Octets like "01" are accepted by the rule, which `Ipv4Addr::from_str`
/// refuses, so octets are parsed one by one.
pub fn parse_ip(value: &str) -> Option<Ipv4Addr> {
    if !validate_ip(value) {
        return None;
    }
    let mut octets = [0u8; 4];
    for (slot, part) in octets.iter_mut().zip(value.split('.')) {
        *slot = part.parse().ok()?;
    }
    Some(Ipv4Addr::from(octets))
}

/// Optional `www.`, at least one label, alphabetic TLD of 2+ chars
pub fn validate_domain(value: &str) -> bool {
    DOMAIN_PATTERN.is_match(value)
}

pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

pub fn validate_timestamp(value: &str) -> bool {
    parse_timestamp(value).is_some()
}

/// Nonempty base plus a 1-5 character extension
pub fn validate_file_name(value: &str) -> bool {
    FILE_NAME_PATTERN.is_match(value)
}

/// Exactly 32 hex characters, any case
pub fn validate_md5(value: &str) -> bool {
    MD5_PATTERN.is_match(value)
}

// ============================================================================
// HASH KIND
// ============================================================================

/// Kind of digest found in the `hash_archivo` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum HashKind {
    Md5,
    Sha256,
    Unknown,
}

impl HashKind {
    /// `None` when the hash is absent or blank
    pub fn classify(value: Option<&str>) -> Option<Self> {
        let value = value.map(str::trim).filter(|v| !v.is_empty())?;
        if MD5_PATTERN.is_match(value) {
            Some(HashKind::Md5)
        } else if SHA256_PATTERN.is_match(value) {
            Some(HashKind::Sha256)
        } else {
            Some(HashKind::Unknown)
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HashKind::Md5 => "MD5",
            HashKind::Sha256 => "SHA256",
            HashKind::Unknown => "Desconocido",
        }
    }
}
