//! Remediation Types

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// REMEDIATION ACTION
// ============================================================================

/// Recommended remediation. Variant order is the output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemediationAction {
    /// External source IP
    BlockIp,
    /// Suspicious domain
    BlacklistDomain,
    /// Risk event
    ReviewAuthPolicy,
    /// Off-hours access
    RaiseOffHoursAlert,
    /// File hash present
    UpdateAvSignatures,
}

impl RemediationAction {
    pub const ALL: [RemediationAction; 5] = [
        RemediationAction::BlockIp,
        RemediationAction::BlacklistDomain,
        RemediationAction::ReviewAuthPolicy,
        RemediationAction::RaiseOffHoursAlert,
        RemediationAction::UpdateAvSignatures,
    ];

    pub fn action_type(&self) -> &'static str {
        match self {
            RemediationAction::BlockIp => "block_ip",
            RemediationAction::BlacklistDomain => "blacklist_domain",
            RemediationAction::ReviewAuthPolicy => "review_auth_policy",
            RemediationAction::RaiseOffHoursAlert => "raise_off_hours_alert",
            RemediationAction::UpdateAvSignatures => "update_av_signatures",
        }
    }

    /// Human-readable label written to the output
    pub fn label(&self) -> &'static str {
        match self {
            RemediationAction::BlockIp => "Block IP in firewall",
            RemediationAction::BlacklistDomain => "Add domain to blacklist",
            RemediationAction::ReviewAuthPolicy => "Review access and auth policies",
            RemediationAction::RaiseOffHoursAlert => "Raise off-hours alert",
            RemediationAction::UpdateAvSignatures => "Update antivirus signatures and blacklist hash",
        }
    }
}

impl fmt::Display for RemediationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// REMEDIATION SET
// ============================================================================

/// Ordered, duplicate-free list of actions for one record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemediationSet {
    actions: Vec<RemediationAction>,
}

impl RemediationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert keeping canonical order
    pub fn insert(&mut self, action: RemediationAction) {
        if let Err(pos) = self.actions.binary_search(&action) {
            self.actions.insert(pos, action);
        }
    }

    pub fn contains(&self, action: RemediationAction) -> bool {
        self.actions.contains(&action)
    }

    pub fn actions(&self) -> &[RemediationAction] {
        &self.actions
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.actions.iter().map(|a| a.label()).collect()
    }

    /// Labels joined for the `medidas_remediacion` column
    pub fn joined(&self) -> String {
        self.labels().join(", ")
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl FromIterator<RemediationAction> for RemediationSet {
    fn from_iter<T: IntoIterator<Item = RemediationAction>>(iter: T) -> Self {
        let mut set = RemediationSet::new();
        for action in iter {
            set.insert(action);
        }
        set
    }
}
