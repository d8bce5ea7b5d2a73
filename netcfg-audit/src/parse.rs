//! Vendor-aware structural parsing of raw configuration text.
//!
//! Parsing is best-effort and never fails: malformed or truncated input
//! yields a [`DeviceConfig`] with whatever could be recognized, and an
//! unknown vendor still gets a generic line-oriented extraction so the
//! downstream stages degrade gracefully instead of emitting nothing.
//!
//! ## Strategy per vendor
//!
//! - **Cisco** — indentation tree from `cfgtree-core`; a recognized
//!   top-level keyword (`interface`, `router`, `ip access-list`, `vlan`)
//!   opens a block and its indented children become the block's raw lines.
//! - **Juniper** — `set`-style statements parsed as word paths; curly-brace
//!   syntax is first flattened to the same paths by a brace-depth scanner.
//! - **Unknown** — token heuristics pull out interface names and
//!   ACL-looking lines.

use std::collections::BTreeMap;

use cfgtree_core::{normalize_line, parse as parse_tree, ConfigNode};

use crate::detect::detect_vendor;
use crate::model::{
    AclAction, AclBlock, AclRule, DeviceConfig, InterfaceConfig, ProtocolKind,
    RoutingProtocolBlock, VendorKind, VlanEntry,
};

/// Parse raw configuration text into a [`DeviceConfig`]. Never fails.
pub fn parse(config_text: &str) -> DeviceConfig {
    let vendor = detect_vendor(config_text);
    match vendor {
        VendorKind::Cisco => parse_cisco(config_text),
        VendorKind::Juniper => parse_juniper(config_text),
        VendorKind::Unknown => parse_generic(config_text),
    }
}

fn parse_cisco(text: &str) -> DeviceConfig {
    let tree = parse_tree(text);
    let mut config = DeviceConfig::empty(VendorKind::Cisco);
    let mut numbered_acls: BTreeMap<String, Vec<AclRule>> = BTreeMap::new();

    for block in &tree.children {
        let line = normalize_line(&block.line);
        let tokens: Vec<&str> = line.split(' ').collect();

        match tokens.as_slice() {
            ["hostname", name, ..] => config.hostname = Some((*name).to_string()),
            ["interface", rest @ ..] if !rest.is_empty() => {
                config.interfaces.push(parse_cisco_interface(rest.join(" "), block));
            }
            ["router", kind, rest @ ..] => {
                if let Some(kind) = protocol_kind(kind) {
                    config
                        .routing_protocols
                        .push(parse_cisco_protocol(kind, rest.join(" "), block));
                }
            }
            ["ip", "access-list", _mode, name, ..] => {
                let rules = block
                    .children
                    .iter()
                    .filter_map(|child| parse_acl_rule(&normalize_line(&child.line)))
                    .collect();
                config.acls.push(AclBlock {
                    name: (*name).to_string(),
                    rules,
                });
            }
            ["access-list", number, rest @ ..] => {
                if let Some(rule) = parse_acl_rule(&rest.join(" ")) {
                    numbered_acls
                        .entry((*number).to_string())
                        .or_default()
                        .push(rule);
                }
            }
            ["vlan", id, ..] if id.chars().all(|c| c.is_ascii_digit()) => {
                let name = block
                    .get_child("name ")
                    .map(|n| n.line.trim_start_matches("name ").trim().to_string());
                config.vlans.push(VlanEntry {
                    id: (*id).to_string(),
                    name,
                });
            }
            _ => collect_global_setting(&mut config.global_settings, &line),
        }
    }

    for (number, rules) in numbered_acls {
        config.acls.push(AclBlock {
            name: number,
            rules,
        });
    }

    config
}

fn parse_cisco_interface(name: String, block: &ConfigNode) -> InterfaceConfig {
    let raw_lines: Vec<String> = block
        .children
        .iter()
        .map(|c| normalize_line(&c.line))
        .collect();

    let mut description = None;
    let mut address = None;
    let mut shutdown = false;
    let mut ospf_auth = false;
    for line in &raw_lines {
        if let Some(rest) = line.strip_prefix("description ") {
            description = Some(rest.to_string());
        } else if let Some(rest) = line.strip_prefix("ip address ") {
            address = Some(rest.to_string());
        } else if line == "shutdown" {
            shutdown = true;
        } else if line.starts_with("ip ospf authentication") {
            ospf_auth = true;
        }
    }

    InterfaceConfig {
        name,
        description,
        address,
        shutdown,
        ospf_auth,
        raw_lines,
    }
}

fn parse_cisco_protocol(
    kind: ProtocolKind,
    process_id: String,
    block: &ConfigNode,
) -> RoutingProtocolBlock {
    let raw_lines: Vec<String> = block
        .children
        .iter()
        .map(|c| normalize_line(&c.line))
        .collect();

    let mut neighbors = Vec::new();
    let mut authentication = false;
    for line in &raw_lines {
        if let Some(rest) = line.strip_prefix("neighbor ") {
            if let Some(addr) = rest.split(' ').next() {
                if !neighbors.iter().any(|n| n == addr) {
                    neighbors.push(addr.to_string());
                }
            }
        }
        if line.contains("authentication") || line.contains("password") {
            authentication = true;
        }
    }

    RoutingProtocolBlock {
        kind,
        process_id,
        neighbors,
        authentication,
        raw_lines,
    }
}

fn protocol_kind(token: &str) -> Option<ProtocolKind> {
    match token {
        "ospf" => Some(ProtocolKind::Ospf),
        "bgp" => Some(ProtocolKind::Bgp),
        "eigrp" => Some(ProtocolKind::Eigrp),
        "isis" => Some(ProtocolKind::Isis),
        _ => None,
    }
}

/// Parse one ACL rule line. Leading sequence numbers are skipped; lines that
/// are not permit/deny statements yield `None`.
fn parse_acl_rule(line: &str) -> Option<AclRule> {
    let mut tokens = line.split(' ').peekable();
    if tokens
        .peek()
        .is_some_and(|t| t.chars().all(|c| c.is_ascii_digit()))
    {
        tokens.next();
    }

    let action = match tokens.next()? {
        "permit" => AclAction::Permit,
        "deny" => AclAction::Deny,
        _ => return None,
    };
    let protocol = tokens.next()?.to_string();

    let remaining: Vec<&str> = tokens.collect();
    let mut idx = 0;
    let source = parse_acl_endpoint(&remaining, &mut idx)?;
    let destination = parse_acl_endpoint(&remaining, &mut idx).unwrap_or_else(|| "any".to_string());
    let port = match remaining.get(idx) {
        Some(&"eq") | Some(&"gt") | Some(&"lt") | Some(&"range") => {
            Some(remaining[idx..].join(" "))
        }
        _ => None,
    };

    Some(AclRule {
        action,
        protocol,
        source,
        destination,
        port,
    })
}

fn parse_acl_endpoint(tokens: &[&str], idx: &mut usize) -> Option<String> {
    let first = *tokens.get(*idx)?;
    *idx += 1;
    match first {
        "any" => Some("any".to_string()),
        "host" => {
            let addr = *tokens.get(*idx)?;
            *idx += 1;
            Some(format!("host {addr}"))
        }
        addr => {
            // Address optionally followed by a wildcard mask.
            if let Some(next) = tokens.get(*idx) {
                if next.contains('.') && !matches!(*next, "any" | "host") {
                    *idx += 1;
                    return Some(format!("{addr} {next}"));
                }
            }
            Some(addr.to_string())
        }
    }
}

fn collect_global_setting(settings: &mut BTreeMap<String, String>, line: &str) {
    let (key, value) = if let Some(rest) = line.strip_prefix("ntp server ") {
        ("ntp_server", rest)
    } else if let Some(rest) = line.strip_prefix("logging buffered ") {
        ("logging_buffered", rest)
    } else if let Some(rest) = line.strip_prefix("logging host ") {
        ("logging_host", rest)
    } else if let Some(rest) = line.strip_prefix("logging ") {
        ("logging_host", rest)
    } else if let Some(rest) = line.strip_prefix("snmp-server community ") {
        ("snmp_community", rest)
    } else {
        return;
    };

    append_setting(settings, key, value);
}

/// Multi-valued settings (several ntp servers, syslog hosts) accumulate as
/// a comma-joined value under one key.
fn append_setting(settings: &mut BTreeMap<String, String>, key: &str, value: &str) {
    settings
        .entry(key.to_string())
        .and_modify(|existing| {
            existing.push(',');
            existing.push_str(value);
        })
        .or_insert_with(|| value.to_string());
}

fn parse_juniper(text: &str) -> DeviceConfig {
    let statements = juniper_statements(text);
    let mut config = DeviceConfig::empty(VendorKind::Juniper);
    let mut acl_terms: Vec<(String, String, AclRule)> = Vec::new();
    let mut bgp_as: Option<String> = None;

    for stmt in &statements {
        let words: Vec<&str> = stmt.iter().map(String::as_str).collect();
        match words.as_slice() {
            ["system", "host-name", name, ..] => config.hostname = Some((*name).to_string()),
            ["system", "ntp", "server", addr, ..] => {
                append_setting(&mut config.global_settings, "ntp_server", addr);
            }
            ["system", "syslog", "host", addr, ..] => {
                append_setting(&mut config.global_settings, "logging_host", addr);
            }
            ["snmp", "community", name, ..] => {
                append_setting(&mut config.global_settings, "snmp_community", name);
            }
            ["interfaces", name, rest @ ..] => {
                juniper_interface(&mut config.interfaces, name, rest);
            }
            ["routing-options", "autonomous-system", asn, ..] => {
                bgp_as = Some((*asn).to_string());
            }
            ["protocols", proto, rest @ ..] => {
                juniper_protocol(&mut config, proto, rest, stmt.join(" "));
            }
            ["firewall", "family", "inet", "filter", filter, "term", term, rest @ ..] => {
                juniper_filter_term(&mut acl_terms, filter, term, rest);
            }
            ["vlans", name, "vlan-id", id, ..] => {
                config.vlans.push(VlanEntry {
                    id: (*id).to_string(),
                    name: Some((*name).to_string()),
                });
            }
            _ => {}
        }
    }

    if let Some(asn) = bgp_as {
        if let Some(block) = config
            .routing_protocols
            .iter_mut()
            .find(|p| p.kind == ProtocolKind::Bgp)
        {
            block.process_id = asn;
        }
    }

    // Fold per-term rules into named ACL blocks, preserving term order.
    for (filter, _term, rule) in acl_terms {
        match config.acls.iter_mut().find(|a| a.name == filter) {
            Some(block) => block.rules.push(rule),
            None => config.acls.push(AclBlock {
                name: filter,
                rules: vec![rule],
            }),
        }
    }

    config
}

fn juniper_interface(interfaces: &mut Vec<InterfaceConfig>, name: &str, rest: &[&str]) {
    let idx = match interfaces.iter().position(|i| i.name == name) {
        Some(idx) => idx,
        None => {
            interfaces.push(InterfaceConfig {
                name: name.to_string(),
                description: None,
                address: None,
                shutdown: false,
                ospf_auth: false,
                raw_lines: Vec::new(),
            });
            interfaces.len() - 1
        }
    };
    let iface = &mut interfaces[idx];
    iface.raw_lines.push(rest.join(" "));

    match rest {
        ["description", text @ ..] => iface.description = Some(text.join(" ")),
        ["disable"] => iface.shutdown = true,
        _ => {
            if let Some(pos) = rest
                .windows(3)
                .position(|w| matches!(w, ["family", "inet", "address"]))
            {
                if let Some(addr) = rest.get(pos + 3) {
                    iface.address = Some((*addr).to_string());
                }
            }
        }
    }
}

fn juniper_protocol(config: &mut DeviceConfig, proto: &str, rest: &[&str], raw: String) {
    let Some(kind) = protocol_kind(proto) else {
        return;
    };

    let idx = match config.routing_protocols.iter().position(|p| p.kind == kind) {
        Some(idx) => idx,
        None => {
            config.routing_protocols.push(RoutingProtocolBlock {
                kind,
                // Junos has no per-process id; the BGP AS is patched in from
                // routing-options when present.
                process_id: "0".to_string(),
                neighbors: Vec::new(),
                authentication: false,
                raw_lines: Vec::new(),
            });
            config.routing_protocols.len() - 1
        }
    };
    let block = &mut config.routing_protocols[idx];
    block.raw_lines.push(raw);

    if let Some(pos) = rest.iter().position(|w| *w == "neighbor") {
        if let Some(addr) = rest.get(pos + 1) {
            if !block.neighbors.iter().any(|n| n == addr) {
                block.neighbors.push((*addr).to_string());
            }
        }
    }
    if rest
        .iter()
        .any(|w| w.starts_with("authentication") || *w == "md5")
    {
        block.authentication = true;
    }
    // Marking an interface's area membership with authentication also flags
    // the matching interface entry.
    if let (Some(if_pos), true) = (
        rest.iter().position(|w| *w == "interface"),
        rest.iter().any(|w| w.starts_with("authentication")),
    ) {
        if let Some(if_name) = rest.get(if_pos + 1) {
            let base = if_name.split('.').next().unwrap_or(*if_name);
            if let Some(iface) = config.interfaces.iter_mut().find(|i| i.name == base) {
                iface.ospf_auth = true;
            }
        }
    }
}

fn juniper_filter_term(
    terms: &mut Vec<(String, String, AclRule)>,
    filter: &str,
    term: &str,
    rest: &[&str],
) {
    let idx = match terms.iter().position(|(f, t, _)| f == filter && t == term) {
        Some(idx) => idx,
        None => {
            terms.push((
                filter.to_string(),
                term.to_string(),
                AclRule {
                    action: AclAction::Permit,
                    protocol: "ip".to_string(),
                    source: "any".to_string(),
                    destination: "any".to_string(),
                    port: None,
                },
            ));
            terms.len() - 1
        }
    };
    let entry = &mut terms[idx].2;

    match rest {
        ["from", "source-address", addr, ..] => entry.source = (*addr).to_string(),
        ["from", "destination-address", addr, ..] => entry.destination = (*addr).to_string(),
        ["from", "protocol", proto, ..] => entry.protocol = (*proto).to_string(),
        ["from", "destination-port", port, ..] => entry.port = Some((*port).to_string()),
        ["then", "accept", ..] => entry.action = AclAction::Permit,
        ["then", verdict, ..] if *verdict == "reject" || *verdict == "discard" => {
            entry.action = AclAction::Deny;
        }
        _ => {}
    }
}

/// Expand Juniper text into word-path statements: `set` lines verbatim,
/// curly-brace blocks flattened by tracking the enclosing path.
fn juniper_statements(text: &str) -> Vec<Vec<String>> {
    let mut out = Vec::new();
    let mut path: Vec<String> = Vec::new();
    // Words pushed per open block, so `}` pops exactly what `{` added.
    let mut block_sizes: Vec<usize> = Vec::new();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("/*") {
            continue;
        }
        if let Some(rest) = line.strip_prefix("set ") {
            out.push(rest.split_whitespace().map(str::to_string).collect());
            continue;
        }
        if line == "}" {
            if let Some(n) = block_sizes.pop() {
                for _ in 0..n {
                    path.pop();
                }
            }
            continue;
        }
        if let Some(head) = line.strip_suffix('{') {
            // Block headers may carry several words ("unit 0 {").
            let words: Vec<&str> = head.split_whitespace().collect();
            block_sizes.push(words.len());
            for word in words {
                path.push(word.to_string());
            }
            continue;
        }
        let stmt = line.trim_end_matches(';');
        if stmt.is_empty() {
            continue;
        }
        let mut words = path.clone();
        words.extend(stmt.split_whitespace().map(str::to_string));
        out.push(words);
    }

    out
}

fn parse_generic(text: &str) -> DeviceConfig {
    let mut config = DeviceConfig::empty(VendorKind::Unknown);
    let mut generic_rules = Vec::new();

    for raw in text.lines() {
        let line = normalize_line(raw);
        if line.is_empty() {
            continue;
        }
        let mut tokens = line.split(' ');
        match tokens.next() {
            Some("hostname") => {
                config.hostname = tokens.next().map(str::to_string);
            }
            Some("interface") => {
                let name: String = tokens.collect::<Vec<_>>().join(" ");
                if !name.is_empty() {
                    config.interfaces.push(InterfaceConfig {
                        name,
                        description: None,
                        address: None,
                        shutdown: false,
                        ospf_auth: false,
                        raw_lines: Vec::new(),
                    });
                }
            }
            Some("permit") | Some("deny") => {
                if let Some(rule) = parse_acl_rule(&line) {
                    generic_rules.push(rule);
                }
            }
            _ => collect_global_setting(&mut config.global_settings, &line),
        }
    }

    if !generic_rules.is_empty() {
        config.acls.push(AclBlock {
            name: "unnamed".to_string(),
            rules: generic_rules,
        });
    }

    config
}
