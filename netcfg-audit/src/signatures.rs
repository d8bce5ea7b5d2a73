//! Critical-change signatures shared by the diff engine and the pre-change
//! reviewer.
//!
//! Each signature is a lexical pattern set describing a change class that is
//! dangerous enough to call out on its own: removing routing authentication,
//! widening an ACL to permit-any, changing a BGP AS number, redistributing
//! routes without filters. The table is data, so both consumers stay in
//! sync and each entry is testable in isolation.

use crate::model::{RiskCategory, Severity};

/// One high-risk change class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeSignature {
    pub id: &'static str,
    /// Any-of lowercase substrings that fire the signature.
    pub patterns: &'static [&'static str],
    /// The signature does not fire when this pattern is also present.
    pub unless: Option<&'static str>,
    pub category: RiskCategory,
    pub severity: Severity,
    /// Whether a match warrants an explicit operator alert.
    pub alert: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
    pub rollback_hint: &'static str,
}

/// The fixed signature table.
pub fn change_signatures() -> &'static [ChangeSignature] {
    &[
        ChangeSignature {
            id: "routing_auth_removal",
            patterns: &[
                "no ip ospf authentication",
                "no ospf authentication",
                "no area authentication",
                "no neighbor password",
                "no authentication",
                "disable authentication",
                "disabling authentication",
                "disable ospf authentication",
                "disabling ospf authentication",
                "remove authentication",
                "removing authentication",
                "without authentication",
                "delete protocols ospf authentication",
            ],
            unless: None,
            category: RiskCategory::Security,
            severity: Severity::Critical,
            alert: true,
            description: "routing protocol authentication is being disabled",
            recommended_action: "keep neighbor authentication enabled; rotate keys instead of removing them",
            rollback_hint: "re-apply the previous authentication statements on the affected process",
        },
        ChangeSignature {
            id: "acl_widened_to_any",
            patterns: &["permit ip any any", "permit any any", "then accept any"],
            unless: None,
            category: RiskCategory::Security,
            severity: Severity::Critical,
            alert: true,
            description: "an access list is being widened to permit any traffic",
            recommended_action: "scope the permit statement to the required sources and destinations",
            rollback_hint: "remove the permit-any rule and restore the previous specific entries",
        },
        ChangeSignature {
            id: "bgp_asn_change",
            patterns: &["router bgp", "remote-as", "peer-as", "autonomous-system"],
            unless: None,
            category: RiskCategory::Availability,
            severity: Severity::Critical,
            alert: true,
            description: "a BGP AS number or peering definition is being changed",
            recommended_action: "coordinate the AS change with every affected peer before applying",
            rollback_hint: "restore the previous AS number and neighbor statements",
        },
        ChangeSignature {
            id: "unfiltered_redistribution",
            patterns: &["redistribute"],
            unless: Some("route-map"),
            category: RiskCategory::Availability,
            severity: Severity::Critical,
            alert: true,
            description: "route redistribution without a filtering route-map",
            recommended_action: "attach a route-map filter to every redistribute statement",
            rollback_hint: "remove the redistribute statement",
        },
        ChangeSignature {
            id: "interface_shutdown",
            patterns: &["shutdown"],
            unless: Some("no shutdown"),
            category: RiskCategory::Availability,
            severity: Severity::Warning,
            alert: false,
            description: "an interface is being administratively shut down",
            recommended_action: "confirm no production traffic uses the interface before shutting it",
            rollback_hint: "issue 'no shutdown' on the affected interface",
        },
    ]
}

/// Return every signature fired by the given text (lowercased substring
/// match). At most one hit per signature.
pub fn match_signatures(text: &str) -> Vec<&'static ChangeSignature> {
    let haystack = text.to_ascii_lowercase();
    change_signatures()
        .iter()
        .filter(|sig| {
            sig.patterns.iter().any(|p| haystack.contains(p))
                && !sig.unless.is_some_and(|u| haystack.contains(u))
        })
        .collect()
}

/// Categorize a single changed line for the raw line-diff fallback: first
/// matching signature wins; unmatched lines are cosmetic.
pub fn categorize_line(line: &str) -> (RiskCategory, Severity) {
    match match_signatures(line).first() {
        Some(sig) => (sig.category, sig.severity),
        None => (RiskCategory::Cosmetic, Severity::Info),
    }
}
