use std::fs;

use cfgtree_core::{parse, parse_file};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

const IOS_SAMPLE: &str = "\
hostname edge-r1
!
interface GigabitEthernet0/0
 description uplink
 ip address 192.0.2.1 255.255.255.0
 no shutdown
!
router ospf 10
 network 192.0.2.0 0.0.0.255 area 0
";

#[test]
fn builds_blocks_from_indentation() {
    let root = parse(IOS_SAMPLE);

    assert_eq!(root.children.len(), 3);
    let iface = root.get_child("interface ").expect("interface block");
    assert_eq!(iface.children.len(), 3);
    assert_eq!(iface.children[0].line, "description uplink");

    let ospf = root.get_child("router ospf").expect("ospf block");
    assert_eq!(ospf.children.len(), 1);
}

#[test]
fn display_round_trips_significant_lines() {
    let root = parse(IOS_SAMPLE);
    let rendered = root.to_string();
    let reparsed = parse(&rendered);
    assert_eq!(root, reparsed);
}

#[test]
fn parse_never_fails_on_garbage() {
    let root = parse("\0\0 not a config \n\t\t???\n");
    // Indented garbage nests under the first line, nothing is lost.
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].children.len(), 1);
}

#[test]
fn parse_file_reads_from_disk() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("running.cfg");
    fs::write(&path, IOS_SAMPLE).expect("write fixture");

    let root = parse_file(&path).expect("parse file");
    assert!(root.get_child("hostname ").is_some());
}

#[test]
fn parse_file_reports_missing_file() {
    let dir = tempdir().expect("tempdir");
    let missing = dir.path().join("nope.cfg");
    assert!(parse_file(&missing).is_err());
}
