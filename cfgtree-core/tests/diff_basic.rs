use cfgtree_core::{
    diff_lines, diff_lines_with_options, format_json, format_summary, format_text, DiffOptions,
    LineDiffEntry,
};
use pretty_assertions::assert_eq;

const LEFT: &str = "\
hostname edge-r1
interface GigabitEthernet0/0
 ip address 192.0.2.1 255.255.255.0
 ip ospf authentication message-digest
ntp server 198.51.100.7
";

const RIGHT: &str = "\
hostname edge-r1
interface GigabitEthernet0/0
 ip address 192.0.2.1 255.255.255.0
ntp server 198.51.100.9
";

#[test]
fn diff_detects_removals_and_additions() {
    let entries = diff_lines(LEFT, RIGHT);

    assert!(entries.iter().any(|e| matches!(
        e,
        LineDiffEntry::Removed { line } if line.contains("ospf authentication")
    )));
    assert!(entries.iter().any(|e| matches!(
        e,
        LineDiffEntry::Added { line } if line.contains("198.51.100.9")
    )));

    let text = format_text(&entries);
    let json = format_json(&entries);
    let summary = format_summary(&entries);

    assert!(text.contains("- ip ospf authentication message-digest"));
    assert!(json.contains("\"type\""));
    assert_eq!(summary, "unchanged=0 added=1 removed=2");
}

#[test]
fn include_unchanged_lists_context_lines() {
    let opts = DiffOptions {
        include_unchanged: true,
        ..DiffOptions::default()
    };
    let entries = diff_lines_with_options(LEFT, RIGHT, &opts);
    assert!(entries
        .iter()
        .any(|e| matches!(e, LineDiffEntry::Unchanged { line } if line == "hostname edge-r1")));
}

#[test]
fn empty_inputs_yield_empty_diff() {
    assert_eq!(diff_lines("", ""), Vec::new());
}
