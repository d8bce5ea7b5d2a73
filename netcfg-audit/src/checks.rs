//! Structural best-practice checks over the parsed configuration.
//!
//! These cover the rules that need parsed blocks rather than raw text:
//! routing protocol authentication, logging buffer sizing, and
//! spanning-tree edge-port hardening.

use crate::model::{DeviceConfig, Issue, IssueCategory, ProtocolKind, Severity};

/// Minimum acceptable `logging buffered` size in bytes.
const MIN_LOG_BUFFER: u64 = 16384;

/// Routing protocol blocks without authentication.
pub fn protocol_auth_issues(config: &DeviceConfig) -> Vec<Issue> {
    let mut out = Vec::new();
    for proto in &config.routing_protocols {
        if matches!(proto.kind, ProtocolKind::Ospf | ProtocolKind::Bgp) && !proto.authentication {
            out.push(Issue {
                severity: Severity::Critical,
                category: IssueCategory::Security,
                message: format!(
                    "{} process {} has no neighbor authentication configured",
                    proto.kind.as_str(),
                    proto.process_id
                ),
                reference: Some(format!("router {} {}", proto.kind.as_str(), proto.process_id)),
            });
        }
    }
    out
}

/// Logging buffer configured but too small to be useful.
pub fn logging_buffer_issues(config: &DeviceConfig) -> Vec<Issue> {
    let Some(size) = config.global_settings.get("logging_buffered") else {
        return Vec::new();
    };
    let parsed = size.split(',').next().unwrap_or("").trim().parse::<u64>();
    match parsed {
        Ok(bytes) if bytes < MIN_LOG_BUFFER => vec![Issue {
            severity: Severity::Info,
            category: IssueCategory::Reliability,
            message: format!(
                "logging buffer is {bytes} bytes; {MIN_LOG_BUFFER} or larger is recommended"
            ),
            reference: Some(format!("logging buffered {size}")),
        }],
        _ => Vec::new(),
    }
}

/// Access-mode switchports without portfast/bpduguard hardening.
pub fn spanning_tree_issues(config: &DeviceConfig) -> Vec<Issue> {
    let mut out = Vec::new();
    for iface in &config.interfaces {
        let is_access = iface
            .raw_lines
            .iter()
            .any(|l| l.starts_with("switchport mode access"));
        if !is_access {
            continue;
        }
        let hardened = iface.raw_lines.iter().any(|l| {
            l.contains("spanning-tree portfast") || l.contains("spanning-tree bpduguard")
        });
        if !hardened {
            out.push(Issue {
                severity: Severity::Warning,
                category: IssueCategory::Reliability,
                message: format!(
                    "access port {} has no portfast/bpduguard hardening",
                    iface.name
                ),
                reference: Some(format!("interface {}", iface.name)),
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{logging_buffer_issues, protocol_auth_issues, spanning_tree_issues};
    use crate::model::Severity;
    use crate::parse::parse;

    #[test]
    fn flags_ospf_without_authentication() {
        let config = parse("router ospf 1\n network 10.0.0.0 0.0.0.255 area 0\n");
        let issues = protocol_auth_issues(&config);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Critical);
        assert!(issues[0].message.contains("ospf process 1"));
    }

    #[test]
    fn authenticated_bgp_is_clean() {
        let config = parse(
            "router bgp 65000\n neighbor 10.0.0.2 remote-as 65001\n neighbor 10.0.0.2 password x\n",
        );
        assert!(protocol_auth_issues(&config).is_empty());
    }

    #[test]
    fn small_log_buffer_is_reported() {
        let config = parse("interface Gi0/0\nlogging buffered 4096\n");
        let issues = logging_buffer_issues(&config);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("4096"));
    }

    #[test]
    fn unhardened_access_port_is_reported() {
        let config = parse(
            "interface Gi0/2\n switchport mode access\ninterface Gi0/3\n switchport mode access\n spanning-tree portfast\n",
        );
        let issues = spanning_tree_issues(&config);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("Gi0/2"));
    }
}
