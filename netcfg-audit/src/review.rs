//! Pre-change review: go / no-go gate for a proposed change.
//!
//! The proposal is free-form text (prose or a config snippet). It is
//! normalized with the same line scanner the parser uses and matched
//! against the critical-change signature table shared with the diff
//! engine. The decision thresholds operate on the same weighted risk
//! arithmetic as the diff engine.

use cfgtree_core::parse as parse_tree;

use crate::detect::detect_vendor;
use crate::model::{
    Decision, DiffFinding, ImpactCell, Issue, ReviewReport, RiskCategory, Severity,
};
use crate::risk::score_findings;
use crate::signatures::{match_signatures, ChangeSignature};
use crate::validate::validate;

/// Score at or above which a proposal is rejected outright.
const NO_GO_THRESHOLD: u32 = 70;
/// Score at or above which peer review becomes mandatory.
const PEER_REVIEW_THRESHOLD: u32 = 40;

/// Review a proposed change, optionally against the current configuration.
/// Never fails; an empty proposal yields a clean "go".
pub fn review_change(change_proposal: &str, current_config: Option<&str>) -> ReviewReport {
    let findings = proposal_findings(change_proposal);
    let matched = match_signatures(change_proposal);
    let scores = score_findings(&findings);
    let overall_score = scores.overall;

    let decision = if overall_score >= NO_GO_THRESHOLD {
        Decision::NoGo
    } else {
        Decision::Go
    };

    let explicit_alert = (overall_score >= NO_GO_THRESHOLD).then(|| {
        let names: Vec<&str> = matched
            .iter()
            .filter(|s| s.alert)
            .map(|s| s.description)
            .collect();
        format!("ALERTA DE ALTO RISCO: {}", names.join("; "))
    });

    let mut recommended_actions: Vec<String> = matched
        .iter()
        .map(|s| s.recommended_action.to_string())
        .collect();
    if (PEER_REVIEW_THRESHOLD..NO_GO_THRESHOLD).contains(&overall_score) {
        recommended_actions
            .push("submit the change for peer review before scheduling".to_string());
    }
    if decision == Decision::NoGo {
        recommended_actions
            .push("do not apply as proposed; split the change and remove the high-risk steps"
                .to_string());
    }
    if let Some(current) = current_config {
        recommended_actions.extend(current_config_actions(current));
    }
    if recommended_actions.is_empty() {
        recommended_actions
            .push("apply during a maintenance window and monitor for regressions".to_string());
    }

    // Inverse of each matched change, last detected rolled back first.
    let mut rollback_plan: Vec<String> = matched
        .iter()
        .rev()
        .map(|s| s.rollback_hint.to_string())
        .collect();
    rollback_plan.push("restore the last approved configuration snapshot".to_string());

    ReviewReport {
        decision,
        overall_score,
        explicit_alert,
        impact_matrix: impact_matrix(&findings),
        findings,
        recommended_actions,
        rollback_plan,
        post_change_playbook: post_change_playbook(),
    }
}

/// Turn the proposal text into tagged findings via the signature table.
/// Each signature contributes at most one finding, anchored at the first
/// line that fired it.
fn proposal_findings(proposal: &str) -> Vec<DiffFinding> {
    let lines = parse_tree(proposal).flat_lines();
    let mut findings = Vec::new();

    for sig in match_signatures(proposal) {
        let evidence = lines
            .iter()
            .find(|line| line_fires(sig, line))
            .cloned()
            .unwrap_or_else(|| proposal.trim().to_string());
        findings.push(DiffFinding {
            category: sig.category,
            severity: sig.severity,
            description: sig.description.to_string(),
            before: None,
            after: Some(evidence),
            rationale: sig.recommended_action.to_string(),
        });
    }

    findings
}

fn line_fires(sig: &ChangeSignature, line: &str) -> bool {
    let lower = line.to_ascii_lowercase();
    sig.patterns.iter().any(|p| lower.contains(p))
        && !sig.unless.is_some_and(|u| lower.contains(u))
}

/// Fold critical issues of the current config into extra actions.
fn current_config_actions(current: &str) -> Vec<String> {
    let issues = validate(current, detect_vendor(current));
    issues
        .iter()
        .filter(|i| i.severity == Severity::Critical)
        .map(|i: &Issue| format!("resolve before the change: {}", i.message))
        .collect()
}

/// Category x severity bucket counts, one row per risk category.
fn impact_matrix(findings: &[DiffFinding]) -> Vec<ImpactCell> {
    [
        RiskCategory::Security,
        RiskCategory::Availability,
        RiskCategory::Performance,
        RiskCategory::Cosmetic,
    ]
    .into_iter()
    .map(|category| {
        let count = |severity: Severity| {
            findings
                .iter()
                .filter(|f| f.category == category && f.severity == severity)
                .count()
        };
        ImpactCell {
            category,
            critical: count(Severity::Critical),
            warning: count(Severity::Warning),
            info: count(Severity::Info),
        }
    })
    .collect()
}

/// Fixed post-change validation checklist, independent of the proposal.
fn post_change_playbook() -> Vec<String> {
    vec![
        "confirm all OSPF/BGP neighbors re-established".to_string(),
        "confirm no unexpected syslog errors within 30 minutes".to_string(),
        "verify management access (ssh) to the device".to_string(),
        "run a config diff against the approved baseline".to_string(),
    ]
}
