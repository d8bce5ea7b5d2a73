//! Best-practice validation of raw configuration text.
//!
//! Applies the declarative pattern table from [`crate::rules`] against the
//! normalized text, then the structural checks from [`crate::checks`]
//! against the parsed config. Rules are independent and order-insensitive:
//! callers may rely on the *set* of issues, while [`format_report`] imposes
//! the stable critical → warning → info rendering order.

use crate::checks::{logging_buffer_issues, protocol_auth_issues, spanning_tree_issues};
use crate::model::{Issue, VendorKind};
use crate::parse::parse;
use crate::rules::{default_rules, Trigger, ValidationRule};

/// Validate configuration text against the built-in rule table. Never
/// fails; empty input yields an empty issue list.
pub fn validate(config_text: &str, vendor: VendorKind) -> Vec<Issue> {
    validate_with_rules(config_text, vendor, &default_rules())
}

/// Validate with an explicit rule table (used by the CLI `--rules-file`
/// override and by per-rule tests).
pub fn validate_with_rules(
    config_text: &str,
    vendor: VendorKind,
    rules: &[ValidationRule],
) -> Vec<Issue> {
    if config_text.trim().is_empty() {
        return Vec::new();
    }

    let haystack = config_text.to_ascii_lowercase();
    let mut issues = Vec::new();

    for rule in rules {
        if !rule.vendor.applies_to(vendor) {
            continue;
        }
        let pattern = rule.pattern.to_ascii_lowercase();
        let fired = match rule.trigger {
            Trigger::Contains => haystack.contains(&pattern),
            Trigger::Missing => !haystack.contains(&pattern),
        };
        if fired {
            issues.push(Issue {
                severity: rule.severity(),
                category: rule.category(),
                message: rule.message.clone(),
                reference: match rule.trigger {
                    Trigger::Contains => find_line(config_text, &pattern),
                    Trigger::Missing => None,
                },
            });
        }
    }

    let config = parse(config_text);
    issues.extend(protocol_auth_issues(&config));
    issues.extend(logging_buffer_issues(&config));
    issues.extend(spanning_tree_issues(&config));

    issues
}

/// Render issues grouped by severity (critical → warning → info), then by
/// category, for stable output. Returns "no issues found" when empty.
pub fn format_report(issues: &[Issue]) -> String {
    if issues.is_empty() {
        return "no issues found".to_string();
    }

    let mut sorted = issues.to_vec();
    sorted.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then_with(|| a.category.cmp(&b.category))
            .then_with(|| a.message.cmp(&b.message))
    });

    let mut out = Vec::new();
    let mut current = None;
    for issue in &sorted {
        if current != Some(issue.severity) {
            if current.is_some() {
                out.push(String::new());
            }
            out.push(format!("{}:", issue.severity.as_str()));
            current = Some(issue.severity);
        }
        let reference = issue
            .reference
            .as_deref()
            .map(|r| format!(" [{r}]"))
            .unwrap_or_default();
        out.push(format!(
            "- {} ({}){}",
            issue.message,
            issue.category.as_str(),
            reference
        ));
    }
    out.join("\n")
}

fn find_line(text: &str, pattern: &str) -> Option<String> {
    text.lines()
        .find(|line| line.to_ascii_lowercase().contains(pattern))
        .map(|line| line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::{format_report, validate};
    use crate::detect::detect_vendor;
    use crate::model::{IssueCategory, Severity};

    const WEAK_CONFIG: &str = "\
hostname lab-sw1
interface Vlan1
 ip address 10.0.0.1 255.255.255.0
line vty 0 4
 transport input telnet
snmp-server community public RO
router ospf 1
 network 10.0.0.0 0.0.0.255 area 0
";

    #[test]
    fn flags_telnet_as_critical_security() {
        let issues = validate(WEAK_CONFIG, detect_vendor(WEAK_CONFIG));
        assert!(issues.iter().any(|i| i.severity == Severity::Critical
            && i.category == IssueCategory::Security
            && i.message.contains("telnet")));
    }

    #[test]
    fn flags_default_snmp_community() {
        let issues = validate(WEAK_CONFIG, detect_vendor(WEAK_CONFIG));
        assert!(issues
            .iter()
            .any(|i| i.severity == Severity::Warning && i.message.contains("public")));
    }

    #[test]
    fn flags_missing_ntp_and_logging() {
        let issues = validate(WEAK_CONFIG, detect_vendor(WEAK_CONFIG));
        assert!(issues.iter().any(|i| i.message.contains("ntp")));
        assert!(issues.iter().any(|i| i.message.contains("logging")));
    }

    #[test]
    fn flags_unauthenticated_ospf() {
        let issues = validate(WEAK_CONFIG, detect_vendor(WEAK_CONFIG));
        assert!(issues.iter().any(|i| i.severity == Severity::Critical
            && i.message.contains("ospf process 1")));
    }

    #[test]
    fn empty_input_yields_no_issues() {
        let issues = validate("", crate::model::VendorKind::Unknown);
        assert!(issues.is_empty());
        assert_eq!(format_report(&issues), "no issues found");
    }

    #[test]
    fn report_orders_critical_before_warning_before_info() {
        let issues = validate(WEAK_CONFIG, detect_vendor(WEAK_CONFIG));
        let report = format_report(&issues);
        let critical = report.find("critical:").expect("critical header");
        let warning = report.find("warning:").expect("warning header");
        let info = report.find("info:").expect("info header");
        assert!(critical < warning);
        assert!(warning < info);
    }

    #[test]
    fn issue_set_is_order_insensitive() {
        // Same input twice: identical sets regardless of evaluation details.
        let a = validate(WEAK_CONFIG, detect_vendor(WEAK_CONFIG));
        let b = validate(WEAK_CONFIG, detect_vendor(WEAK_CONFIG));
        assert_eq!(a.len(), b.len());
        for issue in &a {
            assert!(b.contains(issue));
        }
    }
}
