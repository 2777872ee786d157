//! Indicator Configuration
//!
//! Rule parameters. Can be loaded from the config file or set at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::error::{TriageError, TriageResult};

// ============================================================================
// DEFAULTS
// ============================================================================

pub const DEFAULT_PRIVATE_RANGES: &[&str] = &["10.0.0.0/8", "172.16.0.0/12", "192.168.0.0/16"];

pub const DEFAULT_DOMAIN_KEYWORDS: &[&str] = &["malware", "suspicious"];

pub const DEFAULT_RISK_EVENTS: &[&str] = &[
    "unauthorized access",
    "failed authentication",
    "suspicious data transfer",
    "acceso no autorizado",
    "autenticación fallida",
    "transferencia de datos sospechosa",
    "transferencia de datos",
];

/// Off-hours window start (inclusive)
pub const DEFAULT_OFF_HOURS_START: u32 = 0;

/// Off-hours window end (exclusive)
pub const DEFAULT_OFF_HOURS_END: u32 = 6;

// ============================================================================
// CIDR
// ============================================================================

/// IPv4 network in CIDR notation, e.g. `172.16.0.0/12`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Cidr {
    network: Ipv4Addr,
    prefix: u8,
}

impl Ipv4Cidr {
    pub fn new(network: Ipv4Addr, prefix: u8) -> TriageResult<Self> {
        if prefix > 32 {
            return Err(TriageError::InvalidConfig(format!("CIDR prefix /{} out of range", prefix)));
        }
        let mask = Self::mask(prefix);
        Ok(Self {
            network: Ipv4Addr::from(u32::from(network) & mask),
            prefix,
        })
    }

    fn mask(prefix: u8) -> u32 {
        if prefix == 0 {
            0
        } else {
            u32::MAX << (32 - u32::from(prefix))
        }
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        let mask = Self::mask(self.prefix);
        u32::from(addr) & mask == u32::from(self.network)
    }
}

impl FromStr for Ipv4Cidr {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || TriageError::InvalidConfig(format!("invalid CIDR '{}'", s));
        let (addr, prefix) = s.trim().split_once('/').ok_or_else(bad)?;
        let addr: Ipv4Addr = addr.parse().map_err(|_| bad())?;
        let prefix: u8 = prefix.parse().map_err(|_| bad())?;
        Self::new(addr, prefix)
    }
}

impl fmt::Display for Ipv4Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix)
    }
}

impl Serialize for Ipv4Cidr {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ipv4Cidr {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// OFF-HOURS WINDOW
// ============================================================================

/// Hour window `[start_hour, end_hour)`; wraps midnight when start > end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffHoursWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for OffHoursWindow {
    fn default() -> Self {
        Self {
            start_hour: DEFAULT_OFF_HOURS_START,
            end_hour: DEFAULT_OFF_HOURS_END,
        }
    }
}

impl OffHoursWindow {
    pub fn contains(&self, hour: u32) -> bool {
        if self.start_hour <= self.end_hour {
            hour >= self.start_hour && hour < self.end_hour
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }
}

// ============================================================================
// INDICATOR CONFIG
// ============================================================================

/// Parameters for the indicator predicate table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Source addresses in these ranges are internal
    pub private_ranges: Vec<Ipv4Cidr>,
    /// Case-insensitive substrings marking a domain as suspicious
    pub domain_keywords: Vec<String>,
    /// Case-insensitive event types considered high risk
    pub risk_events: Vec<String>,
    pub off_hours: OffHoursWindow,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            private_ranges: DEFAULT_PRIVATE_RANGES
                .iter()
                .filter_map(|c| c.parse().ok())
                .collect(),
            domain_keywords: DEFAULT_DOMAIN_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            risk_events: DEFAULT_RISK_EVENTS.iter().map(|s| s.to_string()).collect(),
            off_hours: OffHoursWindow::default(),
        }
    }
}

impl IndicatorConfig {
    pub fn validate(&self) -> TriageResult<()> {
        if self.off_hours.start_hour > 23 || self.off_hours.end_hour > 24 {
            return Err(TriageError::InvalidConfig(format!(
                "off-hours window [{}, {}) outside 0-24",
                self.off_hours.start_hour, self.off_hours.end_hour
            )));
        }
        if self.domain_keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(TriageError::InvalidConfig("empty domain keyword".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ranges_parse() {
        let config = IndicatorConfig::default();
        assert_eq!(config.private_ranges.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cidr_contains() {
        let net: Ipv4Cidr = "172.16.0.0/12".parse().unwrap();
        assert!(net.contains(Ipv4Addr::new(172, 16, 0, 1)));
        assert!(net.contains(Ipv4Addr::new(172, 31, 255, 255)));
        assert!(!net.contains(Ipv4Addr::new(172, 32, 0, 0)));
        assert!(!net.contains(Ipv4Addr::new(172, 15, 255, 255)));

        let all: Ipv4Cidr = "0.0.0.0/0".parse().unwrap();
        assert!(all.contains(Ipv4Addr::new(8, 8, 8, 8)));
    }

    #[test]
    fn test_cidr_normalizes_host_bits() {
        let net: Ipv4Cidr = "192.168.10.7/16".parse().unwrap();
        assert_eq!(net.to_string(), "192.168.0.0/16");
    }

    #[test]
    fn test_cidr_rejects_garbage() {
        assert!("10.0.0.0".parse::<Ipv4Cidr>().is_err());
        assert!("10.0.0.0/33".parse::<Ipv4Cidr>().is_err());
        assert!("ten/8".parse::<Ipv4Cidr>().is_err());
    }

    #[test]
    fn test_off_hours_window() {
        let window = OffHoursWindow::default();
        assert!(window.contains(0));
        assert!(window.contains(5));
        assert!(!window.contains(6));
        assert!(!window.contains(23));

        let night = OffHoursWindow { start_hour: 22, end_hour: 6 };
        assert!(night.contains(23));
        assert!(night.contains(2));
        assert!(!night.contains(12));
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = IndicatorConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"10.0.0.0/8\""));
        let back: IndicatorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: IndicatorConfig = serde_json::from_str(r#"{"domain_keywords": ["phishing"]}"#).unwrap();
        assert_eq!(config.domain_keywords, vec!["phishing".to_string()]);
        assert_eq!(config.private_ranges.len(), 3);
        assert_eq!(config.off_hours, OffHoursWindow::default());
    }
}
