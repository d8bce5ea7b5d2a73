use crate::model::DeviceConfig;

/// Render a human-readable summary of a parsed configuration: vendor,
/// hostname, entity counts, then one line per entity.
pub fn format_analysis(config: &DeviceConfig) -> String {
    let mut out = Vec::new();
    out.push(format!(
        "analysis vendor={} hostname={}",
        config.vendor.as_str(),
        config.hostname.as_deref().unwrap_or("unknown")
    ));
    out.push(format!(
        "counts interfaces={} protocols={} acls={} vlans={} globals={}",
        config.interfaces.len(),
        config.routing_protocols.len(),
        config.acls.len(),
        config.vlans.len(),
        config.global_settings.len()
    ));

    out.push("interfaces".to_string());
    if config.interfaces.is_empty() {
        out.push("- none".to_string());
    }
    for iface in &config.interfaces {
        let mut flags = Vec::new();
        if iface.shutdown {
            flags.push("shutdown");
        }
        if iface.ospf_auth {
            flags.push("ospf-auth");
        }
        out.push(format!(
            "- {} address={} description={}{}",
            iface.name,
            iface.address.as_deref().unwrap_or("none"),
            iface.description.as_deref().unwrap_or("none"),
            if flags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", flags.join(","))
            }
        ));
    }

    out.push("routing_protocols".to_string());
    if config.routing_protocols.is_empty() {
        out.push("- none".to_string());
    }
    for proto in &config.routing_protocols {
        out.push(format!(
            "- {} {} neighbors={} auth={}",
            proto.kind.as_str(),
            proto.process_id,
            proto.neighbors.len(),
            proto.authentication
        ));
    }

    out.push("acls".to_string());
    if config.acls.is_empty() {
        out.push("- none".to_string());
    }
    for acl in &config.acls {
        out.push(format!("- {} rules={}", acl.name, acl.rules.len()));
    }

    out.push("vlans".to_string());
    if config.vlans.is_empty() {
        out.push("- none".to_string());
    }
    for vlan in &config.vlans {
        out.push(format!(
            "- {} name={}",
            vlan.id,
            vlan.name.as_deref().unwrap_or("none")
        ));
    }

    out.join("\n")
}
