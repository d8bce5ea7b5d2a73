//! Declarative validation rule table.
//!
//! Pattern rules live in data, not code: each entry pairs a lexical trigger
//! with the severity, category, and message of the resulting issue. The
//! table ships embedded in the binary and can be overridden from a TOML
//! file, so individual rules are unit-testable and vendor subsets are added
//! by tagging rather than new code paths.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::model::{IssueCategory, Severity, VendorKind};

/// Which vendor a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorTag {
    Any,
    Cisco,
    Juniper,
}

impl VendorTag {
    pub fn applies_to(self, vendor: VendorKind) -> bool {
        match self {
            Self::Any => true,
            Self::Cisco => vendor == VendorKind::Cisco,
            Self::Juniper => vendor == VendorKind::Juniper,
        }
    }
}

/// How a rule fires against the normalized config text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    /// Fires when the pattern appears anywhere.
    Contains,
    /// Fires when the pattern appears nowhere.
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSeverity {
    Critical,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    Security,
    Reliability,
    Performance,
}

/// One pattern rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidationRule {
    pub vendor: VendorTag,
    pub trigger: Trigger,
    pub pattern: String,
    pub severity: RuleSeverity,
    pub category: RuleCategory,
    pub message: String,
}

impl ValidationRule {
    pub fn severity(&self) -> Severity {
        match self.severity {
            RuleSeverity::Critical => Severity::Critical,
            RuleSeverity::Warning => Severity::Warning,
            RuleSeverity::Info => Severity::Info,
        }
    }

    pub fn category(&self) -> IssueCategory {
        match self.category {
            RuleCategory::Security => IssueCategory::Security,
            RuleCategory::Reliability => IssueCategory::Reliability,
            RuleCategory::Performance => IssueCategory::Performance,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RuleFile {
    rule: Vec<ValidationRule>,
}

/// Errors returned when loading rule files.
#[derive(Debug, Error)]
pub enum RuleLoadError {
    #[error("failed to read rules file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse rules file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load validation rules from a TOML file.
pub fn load_rules(path: &Path) -> Result<Vec<ValidationRule>, RuleLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| RuleLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_rules(&raw, path.display().to_string())
}

/// Built-in rule table.
pub fn default_rules() -> Vec<ValidationRule> {
    let embedded = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/rules/validation.toml"
    ));
    parse_rules(embedded, "embedded rules".to_string()).unwrap_or_default()
}

fn parse_rules(raw: &str, path: String) -> Result<Vec<ValidationRule>, RuleLoadError> {
    let parsed: RuleFile =
        toml::from_str(raw).map_err(|source| RuleLoadError::Parse { path, source })?;
    Ok(parsed.rule)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{default_rules, load_rules, RuleLoadError, Trigger, VendorTag};
    use crate::model::VendorKind;

    #[test]
    fn embedded_rules_parse_and_cover_minimum_set() {
        let rules = default_rules();
        assert!(rules.iter().any(|r| r.pattern == "telnet"));
        assert!(rules
            .iter()
            .any(|r| r.pattern == "ntp server" && r.trigger == Trigger::Missing));
        assert!(rules.iter().any(|r| r.pattern.contains("snmp")));
    }

    #[test]
    fn vendor_tags_filter_by_vendor() {
        assert!(VendorTag::Any.applies_to(VendorKind::Unknown));
        assert!(VendorTag::Cisco.applies_to(VendorKind::Cisco));
        assert!(!VendorTag::Cisco.applies_to(VendorKind::Juniper));
        assert!(!VendorTag::Juniper.applies_to(VendorKind::Unknown));
    }

    #[test]
    fn loads_valid_rules_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("rules.toml");
        fs::write(
            &path,
            r#"
[[rule]]
vendor = "any"
trigger = "contains"
pattern = "telnet"
severity = "critical"
category = "security"
message = "telnet found"
"#,
        )
        .expect("write rules");

        let rules = load_rules(&path).expect("rules should parse");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].message, "telnet found");
    }

    #[test]
    fn returns_parse_error_for_invalid_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.toml");
        fs::write(&path, "not = [valid").expect("write broken file");

        let err = load_rules(&path).expect_err("should fail parse");
        match err {
            RuleLoadError::Parse { .. } => {}
            other => panic!("unexpected error variant: {other}"),
        }
    }
}
