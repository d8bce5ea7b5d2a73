use std::collections::BTreeMap;

use serde::Serialize;

/// Detected configuration vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorKind {
    /// Cisco IOS-style keyword/indent syntax.
    Cisco,
    /// Juniper `set` or curly-brace syntax.
    Juniper,
    /// Unrecognized syntax; generic extraction only.
    Unknown,
}

impl VendorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cisco => "cisco",
            Self::Juniper => "juniper",
            Self::Unknown => "unknown",
        }
    }
}

/// Structured view of one device configuration. Built fresh per parse call;
/// read-only to downstream stages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceConfig {
    pub vendor: VendorKind,
    pub hostname: Option<String>,
    pub interfaces: Vec<InterfaceConfig>,
    pub routing_protocols: Vec<RoutingProtocolBlock>,
    pub acls: Vec<AclBlock>,
    pub vlans: Vec<VlanEntry>,
    pub global_settings: BTreeMap<String, String>,
}

impl DeviceConfig {
    pub fn empty(vendor: VendorKind) -> Self {
        Self {
            vendor,
            hostname: None,
            interfaces: Vec::new(),
            routing_protocols: Vec::new(),
            acls: Vec::new(),
            vlans: Vec::new(),
            global_settings: BTreeMap::new(),
        }
    }
}

/// One interface block with the raw sub-lines preserved for pattern
/// matching in later stages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceConfig {
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub shutdown: bool,
    pub ospf_auth: bool,
    pub raw_lines: Vec<String>,
}

/// Routing protocol family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolKind {
    Ospf,
    Bgp,
    Eigrp,
    Isis,
}

impl ProtocolKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ospf => "ospf",
            Self::Bgp => "bgp",
            Self::Eigrp => "eigrp",
            Self::Isis => "isis",
        }
    }
}

/// One routing protocol block (process or AS).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutingProtocolBlock {
    pub kind: ProtocolKind,
    pub process_id: String,
    pub neighbors: Vec<String>,
    pub authentication: bool,
    pub raw_lines: Vec<String>,
}

/// Access-list rule action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AclAction {
    Permit,
    Deny,
}

/// One parsed access-list rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AclRule {
    pub action: AclAction,
    pub protocol: String,
    pub source: String,
    pub destination: String,
    pub port: Option<String>,
}

impl AclRule {
    /// True for the fully open `permit ip any any` shape.
    pub fn is_permit_any(&self) -> bool {
        self.action == AclAction::Permit
            && self.protocol == "ip"
            && self.source == "any"
            && self.destination == "any"
    }
}

/// A named access list with its rules in match order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AclBlock {
    pub name: String,
    pub rules: Vec<AclRule>,
}

/// One VLAN definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VlanEntry {
    pub id: String,
    pub name: Option<String>,
}

/// Issue severity, ordered most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Risk weight contributed by one finding of this severity.
    pub fn weight(self) -> u32 {
        match self {
            Self::Critical => 40,
            Self::Warning => 15,
            Self::Info => 5,
        }
    }
}

/// Validator issue category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    Security,
    Reliability,
    Performance,
}

impl IssueCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Security => "security",
            Self::Reliability => "reliability",
            Self::Performance => "performance",
        }
    }
}

/// One best-practice violation found by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub severity: Severity,
    pub category: IssueCategory,
    pub message: String,
    /// Line or section the issue points at, when known.
    pub reference: Option<String>,
}

/// Diff finding category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    Security,
    Availability,
    Performance,
    /// No operational impact; excluded from risk scoring.
    Cosmetic,
}

impl RiskCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Security => "security",
            Self::Availability => "availability",
            Self::Performance => "performance",
            Self::Cosmetic => "cosmetic",
        }
    }
}

/// One semantic difference between two configuration snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffFinding {
    pub category: RiskCategory,
    pub severity: Severity,
    pub description: String,
    pub before: Option<String>,
    pub after: Option<String>,
    /// Why this change is (or is not) semantically significant.
    pub rationale: String,
}

/// Per-category risk scores, each 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskScore {
    pub security: u32,
    pub availability: u32,
    pub performance: u32,
    pub overall: u32,
}

impl RiskScore {
    pub fn zero() -> Self {
        Self {
            security: 0,
            availability: 0,
            performance: 0,
            overall: 0,
        }
    }
}

/// Full diff-engine output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffReport {
    pub findings: Vec<DiffFinding>,
    /// Descriptions of the critical, non-cosmetic findings.
    pub critical_findings: Vec<String>,
    pub risk_scores: RiskScore,
}

/// Go / no-go verdict for a proposed change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Decision {
    Go,
    NoGo,
}

impl Decision {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Go => "GO",
            Self::NoGo => "NO-GO",
        }
    }
}

/// Impact matrix cell: findings counted per category and severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImpactCell {
    pub category: RiskCategory,
    pub critical: usize,
    pub warning: usize,
    pub info: usize,
}

/// Pre-change review output. Constructed once per `review_change` call and
/// never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewReport {
    pub decision: Decision,
    pub overall_score: u32,
    /// Present iff a high-risk pattern was detected.
    pub explicit_alert: Option<String>,
    pub findings: Vec<DiffFinding>,
    pub impact_matrix: Vec<ImpactCell>,
    pub recommended_actions: Vec<String>,
    pub rollback_plan: Vec<String>,
    pub post_change_playbook: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::{AclAction, AclRule, Severity};

    #[test]
    fn severity_orders_critical_first() {
        assert!(Severity::Critical < Severity::Warning);
        assert!(Severity::Warning < Severity::Info);
    }

    #[test]
    fn permit_any_matches_only_fully_open_rule() {
        let open = AclRule {
            action: AclAction::Permit,
            protocol: "ip".to_string(),
            source: "any".to_string(),
            destination: "any".to_string(),
            port: None,
        };
        assert!(open.is_permit_any());

        let scoped = AclRule {
            source: "10.0.0.0 0.0.0.255".to_string(),
            ..open.clone()
        };
        assert!(!scoped.is_permit_any());
    }
}
