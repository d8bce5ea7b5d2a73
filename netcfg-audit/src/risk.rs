//! Risk aggregation over tagged findings.
//!
//! Pure arithmetic fold: every finding carries its own category and
//! severity, so scoring needs no hierarchy — sum the severity weights per
//! category, clamp to 100, and combine. Cosmetic findings never score.

use crate::model::{DiffFinding, RiskCategory, RiskScore};

/// Compute per-category and overall risk from a finding list.
///
/// `overall = clamp(security + 0.75*availability + 0.5*performance)`:
/// security weighs heaviest, the result is monotone non-decreasing in every
/// category, and it is 0 exactly when no scorable finding exists.
pub fn score_findings(findings: &[DiffFinding]) -> RiskScore {
    let mut security = 0u32;
    let mut availability = 0u32;
    let mut performance = 0u32;

    for finding in findings {
        let weight = finding.severity.weight();
        match finding.category {
            RiskCategory::Security => security += weight,
            RiskCategory::Availability => availability += weight,
            RiskCategory::Performance => performance += weight,
            RiskCategory::Cosmetic => {}
        }
    }

    let security = security.min(100);
    let availability = availability.min(100);
    let performance = performance.min(100);
    let overall = (security + availability * 3 / 4 + performance / 2).min(100);

    RiskScore {
        security,
        availability,
        performance,
        overall,
    }
}

/// True when nothing in the list affects behavior (empty or cosmetic only).
pub fn is_cosmetic_only(findings: &[DiffFinding]) -> bool {
    findings
        .iter()
        .all(|f| f.category == RiskCategory::Cosmetic)
}
