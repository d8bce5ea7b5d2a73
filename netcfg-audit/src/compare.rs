//! Semantic comparison of two configuration snapshots.
//!
//! Both sides are parsed independently and matched entity-by-entity
//! (interface name, protocol kind + process id, ACL name, VLAN id), so
//! reordered-but-equivalent lines never show up as changes. Sections that
//! fail structural parsing fall back to a deterministic raw line diff with
//! signature-based categorization.
//!
//! Direction: the golden config is the approved baseline, the running
//! config is the live state. `before` snippets come from the golden side,
//! `after` snippets from the running side.

use cfgtree_core::diff_lines;
use cfgtree_core::LineDiffEntry;

use crate::model::{
    DeviceConfig, DiffFinding, DiffReport, RiskCategory, RiskScore, Severity, VendorKind,
};
use crate::parse::parse;
use crate::risk::{is_cosmetic_only, score_findings};
use crate::signatures::categorize_line;

/// Compare the running configuration against the golden baseline. Never
/// fails; empty inputs yield an empty report with score 0.
pub fn compare_configs(running_config: &str, golden_config: &str) -> DiffReport {
    if running_config.trim().is_empty() && golden_config.trim().is_empty() {
        return DiffReport {
            findings: Vec::new(),
            critical_findings: Vec::new(),
            risk_scores: RiskScore::zero(),
        };
    }

    let running = parse(running_config);
    let golden = parse(golden_config);

    let mut findings = Vec::new();
    diff_interfaces(&golden, &running, &mut findings);
    diff_protocols(&golden, &running, &mut findings);
    diff_acls(&golden, &running, &mut findings);
    diff_vlans(&golden, &running, &mut findings);
    diff_globals(&golden, &running, &mut findings);

    if structured_is_empty(&golden) && structured_is_empty(&running) {
        raw_fallback(golden_config, running_config, &mut findings);
    }

    let critical_findings = findings
        .iter()
        .filter(|f| f.severity == Severity::Critical && f.category != RiskCategory::Cosmetic)
        .map(|f| f.description.clone())
        .collect();
    let risk_scores = score_findings(&findings);

    DiffReport {
        findings,
        critical_findings,
        risk_scores,
    }
}

/// True when no non-cosmetic change was detected.
pub fn no_semantic_changes(report: &DiffReport) -> bool {
    is_cosmetic_only(&report.findings)
}

fn structured_is_empty(config: &DeviceConfig) -> bool {
    config.vendor == VendorKind::Unknown
        && config.interfaces.is_empty()
        && config.routing_protocols.is_empty()
        && config.acls.is_empty()
        && config.vlans.is_empty()
        && config.global_settings.is_empty()
}

fn diff_interfaces(golden: &DeviceConfig, running: &DeviceConfig, out: &mut Vec<DiffFinding>) {
    for gold in &golden.interfaces {
        let Some(run) = running.interfaces.iter().find(|i| i.name == gold.name) else {
            out.push(DiffFinding {
                category: RiskCategory::Availability,
                severity: Severity::Warning,
                description: format!("interface {} removed", gold.name),
                before: Some(format!("interface {}", gold.name)),
                after: None,
                rationale: "removing an interface block drops its addressing and features"
                    .to_string(),
            });
            continue;
        };

        if gold.ospf_auth && !run.ospf_auth {
            out.push(DiffFinding {
                category: RiskCategory::Security,
                severity: Severity::Critical,
                description: format!("ospf authentication removed on interface {}", gold.name),
                before: gold
                    .raw_lines
                    .iter()
                    .find(|l| l.starts_with("ip ospf authentication"))
                    .cloned(),
                after: None,
                rationale: "unauthenticated ospf adjacencies accept rogue neighbors".to_string(),
            });
        } else if !gold.ospf_auth && run.ospf_auth {
            out.push(DiffFinding {
                category: RiskCategory::Security,
                severity: Severity::Info,
                description: format!("ospf authentication enabled on interface {}", gold.name),
                before: None,
                after: run
                    .raw_lines
                    .iter()
                    .find(|l| l.starts_with("ip ospf authentication"))
                    .cloned(),
                rationale: "hardening change; verify both neighbors share the key".to_string(),
            });
        }

        if !gold.shutdown && run.shutdown {
            out.push(DiffFinding {
                category: RiskCategory::Availability,
                severity: Severity::Critical,
                description: format!("interface {} administratively shut down", gold.name),
                before: None,
                after: Some("shutdown".to_string()),
                rationale: "traffic through this interface stops immediately".to_string(),
            });
        } else if gold.shutdown && !run.shutdown {
            out.push(DiffFinding {
                category: RiskCategory::Availability,
                severity: Severity::Info,
                description: format!("interface {} brought up", gold.name),
                before: Some("shutdown".to_string()),
                after: None,
                rationale: "previously disabled interface now forwards traffic".to_string(),
            });
        }

        if gold.address != run.address {
            out.push(DiffFinding {
                category: RiskCategory::Availability,
                severity: Severity::Warning,
                description: format!("ip address changed on interface {}", gold.name),
                before: gold.address.clone(),
                after: run.address.clone(),
                rationale: "readdressing breaks existing adjacencies and static references"
                    .to_string(),
            });
        }

        if gold.description != run.description {
            out.push(DiffFinding {
                category: RiskCategory::Cosmetic,
                severity: Severity::Info,
                description: format!("description changed on interface {}", gold.name),
                before: gold.description.clone(),
                after: run.description.clone(),
                rationale: "descriptions are documentation only; no semantic significance"
                    .to_string(),
            });
        }
    }

    for run in &running.interfaces {
        if !golden.interfaces.iter().any(|i| i.name == run.name) {
            out.push(DiffFinding {
                category: RiskCategory::Availability,
                severity: Severity::Info,
                description: format!("interface {} added", run.name),
                before: None,
                after: Some(format!("interface {}", run.name)),
                rationale: "new interface block not present in the baseline".to_string(),
            });
        }
    }
}

fn diff_protocols(golden: &DeviceConfig, running: &DeviceConfig, out: &mut Vec<DiffFinding>) {
    for gold in &golden.routing_protocols {
        let same = running
            .routing_protocols
            .iter()
            .find(|p| p.kind == gold.kind && p.process_id == gold.process_id);

        let run = match same {
            Some(run) => run,
            None => {
                // Same protocol family under a different process/AS id is an
                // identity change, not an add/remove pair.
                if let Some(moved) = running
                    .routing_protocols
                    .iter()
                    .find(|p| p.kind == gold.kind)
                {
                    out.push(DiffFinding {
                        category: RiskCategory::Availability,
                        severity: Severity::Critical,
                        description: format!(
                            "{} process/AS changed from {} to {}",
                            gold.kind.as_str(),
                            gold.process_id,
                            moved.process_id
                        ),
                        before: Some(format!("router {} {}", gold.kind.as_str(), gold.process_id)),
                        after: Some(format!("router {} {}", moved.kind.as_str(), moved.process_id)),
                        rationale: "every peering/adjacency of this process resets".to_string(),
                    });
                    moved
                } else {
                    out.push(DiffFinding {
                        category: RiskCategory::Availability,
                        severity: Severity::Critical,
                        description: format!(
                            "routing protocol {} {} removed",
                            gold.kind.as_str(),
                            gold.process_id
                        ),
                        before: Some(format!("router {} {}", gold.kind.as_str(), gold.process_id)),
                        after: None,
                        rationale: "routes learned via this process are withdrawn".to_string(),
                    });
                    continue;
                }
            }
        };

        if gold.authentication && !run.authentication {
            out.push(DiffFinding {
                category: RiskCategory::Security,
                severity: Severity::Critical,
                description: format!(
                    "authentication removed from {} {}",
                    gold.kind.as_str(),
                    gold.process_id
                ),
                before: gold
                    .raw_lines
                    .iter()
                    .find(|l| l.contains("authentication") || l.contains("password"))
                    .cloned(),
                after: None,
                rationale: "unauthenticated sessions accept spoofed peers".to_string(),
            });
        }

        for neighbor in &gold.neighbors {
            if !run.neighbors.contains(neighbor) {
                out.push(DiffFinding {
                    category: RiskCategory::Availability,
                    severity: Severity::Warning,
                    description: format!(
                        "neighbor {neighbor} removed from {} {}",
                        gold.kind.as_str(),
                        gold.process_id
                    ),
                    before: Some(format!("neighbor {neighbor}")),
                    after: None,
                    rationale: "the peering to this neighbor is torn down".to_string(),
                });
            }
        }
        for neighbor in &run.neighbors {
            if !gold.neighbors.contains(neighbor) {
                out.push(DiffFinding {
                    category: RiskCategory::Availability,
                    severity: Severity::Info,
                    description: format!(
                        "neighbor {neighbor} added to {} {}",
                        run.kind.as_str(),
                        run.process_id
                    ),
                    before: None,
                    after: Some(format!("neighbor {neighbor}")),
                    rationale: "new peering not present in the baseline".to_string(),
                });
            }
        }

        diff_neighbor_as(gold, run, out);
    }

    for run in &running.routing_protocols {
        let known = golden.routing_protocols.iter().any(|p| p.kind == run.kind);
        if !known {
            out.push(DiffFinding {
                category: RiskCategory::Availability,
                severity: Severity::Warning,
                description: format!(
                    "routing protocol {} {} added",
                    run.kind.as_str(),
                    run.process_id
                ),
                before: None,
                after: Some(format!("router {} {}", run.kind.as_str(), run.process_id)),
                rationale: "a new routing process changes path selection".to_string(),
            });
        }
    }
}

/// Detect per-neighbor remote-as changes from the raw lines of two matched
/// protocol blocks.
fn diff_neighbor_as(
    gold: &crate::model::RoutingProtocolBlock,
    run: &crate::model::RoutingProtocolBlock,
    out: &mut Vec<DiffFinding>,
) {
    for (neighbor, gold_as) in neighbor_as_pairs(&gold.raw_lines) {
        for (run_neighbor, run_as) in neighbor_as_pairs(&run.raw_lines) {
            if neighbor == run_neighbor && gold_as != run_as {
                out.push(DiffFinding {
                    category: RiskCategory::Availability,
                    severity: Severity::Critical,
                    description: format!(
                        "bgp neighbor {neighbor} AS changed from {gold_as} to {run_as}"
                    ),
                    before: Some(format!("neighbor {neighbor} remote-as {gold_as}")),
                    after: Some(format!("neighbor {neighbor} remote-as {run_as}")),
                    rationale: "an AS mismatch resets and breaks the peering".to_string(),
                });
            }
        }
    }
}

fn neighbor_as_pairs(lines: &[String]) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for line in lines {
        let tokens: Vec<&str> = line.split(' ').collect();
        if let ["neighbor", addr, "remote-as", asn, ..] = tokens.as_slice() {
            out.push(((*addr).to_string(), (*asn).to_string()));
        }
    }
    out
}

fn diff_acls(golden: &DeviceConfig, running: &DeviceConfig, out: &mut Vec<DiffFinding>) {
    for gold in &golden.acls {
        let Some(run) = running.acls.iter().find(|a| a.name == gold.name) else {
            out.push(DiffFinding {
                category: RiskCategory::Security,
                severity: Severity::Warning,
                description: format!("access list {} removed", gold.name),
                before: Some(format!("ip access-list {}", gold.name)),
                after: None,
                rationale: "traffic previously filtered by this list is no longer matched"
                    .to_string(),
            });
            continue;
        };

        let widened = run.rules.iter().any(|r| r.is_permit_any())
            && !gold.rules.iter().any(|r| r.is_permit_any());
        if widened {
            out.push(DiffFinding {
                category: RiskCategory::Security,
                severity: Severity::Critical,
                description: format!("access list {} widened to permit ip any any", gold.name),
                before: gold.rules.first().map(rule_text),
                after: Some("permit ip any any".to_string()),
                rationale: "a permit-any entry bypasses every restriction in the list".to_string(),
            });
        }

        for rule in &gold.rules {
            if !run.rules.contains(rule) {
                out.push(DiffFinding {
                    category: RiskCategory::Security,
                    severity: Severity::Warning,
                    description: format!("rule removed from access list {}", gold.name),
                    before: Some(rule_text(rule)),
                    after: None,
                    rationale: "the traffic this rule matched now falls through".to_string(),
                });
            }
        }
        for rule in &run.rules {
            if !gold.rules.contains(rule) && !(widened && rule.is_permit_any()) {
                out.push(DiffFinding {
                    category: RiskCategory::Security,
                    severity: Severity::Info,
                    description: format!("rule added to access list {}", run.name),
                    before: None,
                    after: Some(rule_text(rule)),
                    rationale: "new filtering entry not present in the baseline".to_string(),
                });
            }
        }
    }

    for run in &running.acls {
        if !golden.acls.iter().any(|a| a.name == run.name) {
            out.push(DiffFinding {
                category: RiskCategory::Security,
                severity: Severity::Info,
                description: format!("access list {} added", run.name),
                before: None,
                after: Some(format!("ip access-list {}", run.name)),
                rationale: "new access list not present in the baseline".to_string(),
            });
        }
    }
}

fn rule_text(rule: &crate::model::AclRule) -> String {
    let action = match rule.action {
        crate::model::AclAction::Permit => "permit",
        crate::model::AclAction::Deny => "deny",
    };
    let port = rule
        .port
        .as_deref()
        .map(|p| format!(" {p}"))
        .unwrap_or_default();
    format!(
        "{action} {} {} {}{port}",
        rule.protocol, rule.source, rule.destination
    )
}

fn diff_vlans(golden: &DeviceConfig, running: &DeviceConfig, out: &mut Vec<DiffFinding>) {
    for gold in &golden.vlans {
        if !running.vlans.iter().any(|v| v.id == gold.id) {
            out.push(DiffFinding {
                category: RiskCategory::Availability,
                severity: Severity::Warning,
                description: format!("vlan {} removed", gold.id),
                before: Some(format!("vlan {}", gold.id)),
                after: None,
                rationale: "ports assigned to this vlan lose connectivity".to_string(),
            });
        }
    }
    for run in &running.vlans {
        if !golden.vlans.iter().any(|v| v.id == run.id) {
            out.push(DiffFinding {
                category: RiskCategory::Availability,
                severity: Severity::Info,
                description: format!("vlan {} added", run.id),
                before: None,
                after: Some(format!("vlan {}", run.id)),
                rationale: "new vlan not present in the baseline".to_string(),
            });
        }
    }
}

fn diff_globals(golden: &DeviceConfig, running: &DeviceConfig, out: &mut Vec<DiffFinding>) {
    let keys: Vec<&String> = golden
        .global_settings
        .keys()
        .chain(running.global_settings.keys())
        .collect();
    let mut seen = Vec::new();
    for key in keys {
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);

        let before = golden.global_settings.get(key);
        let after = running.global_settings.get(key);
        if before == after {
            continue;
        }

        let (category, severity) = if key.starts_with("snmp") {
            (RiskCategory::Security, Severity::Warning)
        } else {
            (RiskCategory::Availability, Severity::Info)
        };
        out.push(DiffFinding {
            category,
            severity,
            description: format!("global setting {key} changed"),
            before: before.cloned(),
            after: after.cloned(),
            rationale: "management-plane setting differs from the baseline".to_string(),
        });
    }
}

/// Raw line-diff fallback used when neither side parsed into recognized
/// blocks. Each changed line is categorized by the shared signature table.
fn raw_fallback(golden_text: &str, running_text: &str, out: &mut Vec<DiffFinding>) {
    for entry in diff_lines(golden_text, running_text) {
        match entry {
            LineDiffEntry::Removed { line } => {
                let (category, severity) = categorize_line(&line);
                out.push(DiffFinding {
                    category,
                    severity,
                    description: format!("line removed: {line}"),
                    before: Some(line),
                    after: None,
                    rationale: "structural parsing unavailable; textual change".to_string(),
                });
            }
            LineDiffEntry::Added { line } => {
                let (category, severity) = categorize_line(&line);
                out.push(DiffFinding {
                    category,
                    severity,
                    description: format!("line added: {line}"),
                    before: None,
                    after: Some(line),
                    rationale: "structural parsing unavailable; textual change".to_string(),
                });
            }
            LineDiffEntry::Unchanged { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{compare_configs, no_semantic_changes};
    use crate::model::Severity;

    const GOLDEN: &str = "\
hostname edge-r1
interface GigabitEthernet0/0
 description uplink to core
 ip address 192.0.2.1 255.255.255.0
 ip ospf authentication message-digest
router bgp 65000
 neighbor 198.51.100.2 remote-as 65001
 neighbor 198.51.100.2 password s3cret
ip access-list extended EDGE-IN
 permit tcp any host 192.0.2.10 eq 443
 deny ip any any
ntp server 198.51.100.7
";

    #[test]
    fn identical_configs_are_idempotent() {
        let report = compare_configs(GOLDEN, GOLDEN);
        assert!(report.critical_findings.is_empty());
        assert_eq!(report.risk_scores.overall, 0);
        assert!(no_semantic_changes(&report));
    }

    #[test]
    fn empty_inputs_score_zero() {
        let report = compare_configs("", "");
        assert!(report.findings.is_empty());
        assert_eq!(report.risk_scores.overall, 0);
    }

    #[test]
    fn description_only_change_is_cosmetic() {
        let running = GOLDEN.replace("uplink to core", "uplink to core-2");
        let report = compare_configs(&running, GOLDEN);
        assert!(report.critical_findings.is_empty());
        assert!(report.risk_scores.overall < 25);
        assert!(no_semantic_changes(&report));
        assert!(report
            .findings
            .iter()
            .any(|f| f.description.contains("description changed")));
    }

    #[test]
    fn security_regression_is_critical_across_categories() {
        let running = GOLDEN
            .replace(" ip ospf authentication message-digest\n", "")
            .replace("remote-as 65001", "remote-as 65010")
            .replace(
                " permit tcp any host 192.0.2.10 eq 443\n deny ip any any\n",
                " permit ip any any\n",
            );
        let report = compare_configs(&running, GOLDEN);

        assert!(report
            .critical_findings
            .iter()
            .any(|d| d.contains("ospf authentication removed")));
        assert!(report
            .critical_findings
            .iter()
            .any(|d| d.contains("AS changed from 65001 to 65010")));
        assert!(report
            .critical_findings
            .iter()
            .any(|d| d.contains("widened to permit ip any any")));
        assert!(report.risk_scores.security >= 60);
        assert!(report.risk_scores.availability >= 40);
    }

    #[test]
    fn added_and_removed_entities_are_reported() {
        let running = format!("{GOLDEN}vlan 30\n name guests\n");
        let report = compare_configs(&running, GOLDEN);
        assert!(report
            .findings
            .iter()
            .any(|f| f.description == "vlan 30 added"));

        let report = compare_configs(GOLDEN, &running);
        assert!(report
            .findings
            .iter()
            .any(|f| f.description == "vlan 30 removed"));
    }

    #[test]
    fn unparseable_sides_fall_back_to_line_diff() {
        let left = "alpha one\nshared line\n";
        let right = "beta two\nshared line\n";
        let report = compare_configs(right, left);
        assert!(report
            .findings
            .iter()
            .any(|f| f.description.contains("line removed: alpha one")));
        assert!(report
            .findings
            .iter()
            .any(|f| f.description.contains("line added: beta two")));
    }

    #[test]
    fn protocol_removal_is_critical() {
        let running = GOLDEN.replace(
            "router bgp 65000\n neighbor 198.51.100.2 remote-as 65001\n neighbor 198.51.100.2 password s3cret\n",
            "",
        );
        let report = compare_configs(&running, GOLDEN);
        assert!(report
            .critical_findings
            .iter()
            .any(|d| d.contains("routing protocol bgp 65000 removed")));
    }
}
