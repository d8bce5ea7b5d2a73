//! Operator-facing report rendering.
//!
//! The diff and review reports are rendered as Markdown with fixed section
//! headers; the agent/tool layer returns these strings verbatim, so the
//! headers are part of the output contract and must not change.

use colored::Colorize;

use crate::model::{DiffFinding, DiffReport, ReviewReport};
use crate::risk::is_cosmetic_only;

/// Render a diff report as Markdown.
pub fn format_diff_report(report: &DiffReport) -> String {
    let mut out = Vec::new();

    out.push("## Mudanças detectadas".to_string());
    if report.findings.is_empty() {
        out.push("- nenhuma".to_string());
    }
    for finding in &report.findings {
        out.push(format!(
            "- [{}/{}] {}",
            finding.severity.as_str(),
            finding.category.as_str(),
            finding.description
        ));
        if let Some(before) = &finding.before {
            out.push(format!("  - antes: `{before}`"));
        }
        if let Some(after) = &finding.after {
            out.push(format!("  - depois: `{after}`"));
        }
        out.push(format!("  - racional: {}", finding.rationale));
    }

    out.push(String::new());
    out.push("## Riscos".to_string());
    if is_cosmetic_only(&report.findings) {
        out.push("no semantic changes detected".to_string());
    }
    out.push(format!(
        "- security: {} | availability: {} | performance: {} | overall: {}",
        report.risk_scores.security,
        report.risk_scores.availability,
        report.risk_scores.performance,
        report.risk_scores.overall
    ));
    if !report.critical_findings.is_empty() {
        out.push("- críticos:".to_string());
        for critical in &report.critical_findings {
            out.push(format!("  - {critical}"));
        }
    }

    out.push(String::new());
    out.push("## Ações recomendadas".to_string());
    if report.critical_findings.is_empty() {
        out.push("- aplicar em janela de manutenção e monitorar".to_string());
    }
    for critical in &report.critical_findings {
        out.push(format!("- reverter ou justificar: {critical}"));
    }

    out.push(String::new());
    out.push("### Rollback sugerido".to_string());
    let steps = rollback_steps(&report.findings);
    if steps.is_empty() {
        out.push("- nenhum passo necessário".to_string());
    }
    for step in steps {
        out.push(format!("- {step}"));
    }

    out.join("\n")
}

/// Inverse of each detected change, in apply order: the last detected
/// change is rolled back first.
fn rollback_steps(findings: &[DiffFinding]) -> Vec<String> {
    findings
        .iter()
        .rev()
        .filter_map(|finding| match (&finding.before, &finding.after) {
            (Some(before), Some(_)) => Some(format!("restaurar: `{before}`")),
            (Some(before), None) => Some(format!("reaplicar: `{before}`")),
            (None, Some(after)) => Some(format!("remover: `{after}`")),
            (None, None) => None,
        })
        .collect()
}

/// Render a review report as Markdown.
pub fn format_review_report(report: &ReviewReport) -> String {
    let mut out = Vec::new();

    out.push("## Matriz de impacto".to_string());
    out.push("| categoria | critical | warning | info |".to_string());
    out.push("|---|---|---|---|".to_string());
    for cell in &report.impact_matrix {
        out.push(format!(
            "| {} | {} | {} | {} |",
            cell.category.as_str(),
            cell.critical,
            cell.warning,
            cell.info
        ));
    }

    out.push(String::new());
    out.push("## Decisão assistida".to_string());
    out.push(format!(
        "**{}** (score {}/100)",
        report.decision.as_str(),
        report.overall_score
    ));
    if let Some(alert) = &report.explicit_alert {
        out.push(String::new());
        out.push(format!("> {alert}"));
    }
    out.push(String::new());
    out.push("Recomendações objetivas:".to_string());
    for action in &report.recommended_actions {
        out.push(format!("- {action}"));
    }
    if !report.rollback_plan.is_empty() {
        out.push(String::new());
        out.push("Rollback:".to_string());
        for step in &report.rollback_plan {
            out.push(format!("- {step}"));
        }
    }

    out.push(String::new());
    out.push("## Playbook pós-change".to_string());
    for (idx, step) in report.post_change_playbook.iter().enumerate() {
        out.push(format!("{}. {step}", idx + 1));
    }

    out.join("\n")
}

/// Colorize a rendered report for terminal output: severity tags and the
/// decision token get ANSI colors, everything else passes through.
pub fn colorize(rendered: &str) -> String {
    rendered
        .lines()
        .map(|line| {
            if line.contains("[critical/") || line.contains("ALERTA DE ALTO RISCO") {
                line.red().to_string()
            } else if line.contains("[warning/") {
                line.yellow().to_string()
            } else if line.contains("[info/") {
                line.cyan().to_string()
            } else if line.starts_with("##") || line.starts_with("###") {
                line.bold().to_string()
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Colorize validator report severity headers.
pub fn colorize_issues(rendered: &str) -> String {
    rendered
        .lines()
        .map(|line| match line {
            "critical:" => line.red().to_string(),
            "warning:" => line.yellow().to_string(),
            "info:" => line.cyan().to_string(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::{format_diff_report, format_review_report};
    use crate::compare::compare_configs;
    use crate::review::review_change;

    #[test]
    fn diff_report_contains_required_headers() {
        let report = compare_configs("hostname a\n", "hostname b\n");
        let text = format_diff_report(&report);
        assert!(text.contains("## Mudanças detectadas"));
        assert!(text.contains("## Riscos"));
        assert!(text.contains("## Ações recomendadas"));
        assert!(text.contains("### Rollback sugerido"));
    }

    #[test]
    fn clean_diff_reports_no_semantic_changes() {
        let report = compare_configs("hostname a\n", "hostname a\n");
        let text = format_diff_report(&report);
        assert!(text.contains("no semantic changes detected"));
        assert!(text.contains("overall: 0"));
    }

    #[test]
    fn review_report_contains_required_headers_and_token() {
        let report = review_change("interface Gi0/0\n description x\n", None);
        let text = format_review_report(&report);
        assert!(text.contains("## Matriz de impacto"));
        assert!(text.contains("## Decisão assistida"));
        assert!(text.contains("**GO**"));
        assert!(text.contains("Recomendações objetivas"));
        assert!(text.contains("## Playbook pós-change"));
    }

    #[test]
    fn no_go_review_shows_alert_and_token() {
        let report = review_change(
            "no ip ospf authentication\npermit ip any any\n",
            None,
        );
        let text = format_review_report(&report);
        assert!(text.contains("**NO-GO**"));
        assert!(text.contains("ALERTA DE ALTO RISCO"));
    }

    #[test]
    fn rollback_lists_inverse_of_changes_last_first() {
        let golden = "hostname r1\nntp server 10.0.0.1\n";
        let running = "hostname r1\nntp server 10.9.9.9\n";
        let report = compare_configs(running, golden);
        let text = format_diff_report(&report);
        assert!(text.contains("restaurar: `10.0.0.1`"));
    }
}
