//! Vendor detection from raw configuration text.
//!
//! Purely lexical: counts vendor-specific signatures and picks the vendor
//! with the strictly higher count. On an exact non-zero tie the result is
//! Cisco (the most common platform for this tool's inputs); with no
//! signatures at all the vendor is unknown and downstream parsing falls
//! back to generic extraction.

use crate::model::VendorKind;

const CISCO_SIGNATURES: &[&str] = &[
    "interface ",
    "router ospf",
    "router bgp",
    "router eigrp",
    "ip access-list",
    "access-list ",
    "snmp-server ",
    "spanning-tree ",
];

const JUNIPER_SIGNATURES: &[&str] = &[
    "set interfaces",
    "set protocols",
    "set system",
    "set firewall",
    "set vlans",
    "set policy-options",
];

/// Detect the configuration vendor. Deterministic: same input, same result.
pub fn detect_vendor(config_text: &str) -> VendorKind {
    let mut cisco = 0usize;
    let mut juniper = 0usize;

    for raw in config_text.lines() {
        let line = raw.trim_start();
        if CISCO_SIGNATURES.iter().any(|sig| line.starts_with(sig)) {
            cisco += 1;
        }
        if JUNIPER_SIGNATURES.iter().any(|sig| line.starts_with(sig)) {
            juniper += 1;
        }
        // Curly-brace block syntax is a Juniper structured-config marker.
        if line.ends_with('{') {
            juniper += 1;
        }
    }

    if cisco == 0 && juniper == 0 {
        return VendorKind::Unknown;
    }
    if juniper > cisco {
        VendorKind::Juniper
    } else {
        VendorKind::Cisco
    }
}
