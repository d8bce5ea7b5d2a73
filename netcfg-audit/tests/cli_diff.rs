use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const GOLDEN: &str = "\
hostname edge-r1
interface GigabitEthernet0/0
 description uplink to core
 ip address 192.0.2.1 255.255.255.0
 ip ospf authentication message-digest
router bgp 65000
 neighbor 198.51.100.2 remote-as 65001
 neighbor 198.51.100.2 password s3cret
ip access-list extended EDGE-IN
 permit tcp any host 192.0.2.10 eq 443
 deny ip any any
ntp server 198.51.100.7
";

fn write_config(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write config");
    path
}

#[test]
fn diff_renders_required_markdown_sections() {
    let dir = tempdir().expect("tempdir");
    let golden = write_config(dir.path(), "golden.cfg", GOLDEN);
    let running = write_config(
        dir.path(),
        "running.cfg",
        &GOLDEN.replace(" ip ospf authentication message-digest\n", ""),
    );

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("netcfg-audit"));
    cmd.arg("diff")
        .arg(&running)
        .arg(&golden)
        .arg("--format")
        .arg("markdown")
        .assert()
        .success()
        .stdout(predicate::str::contains("## Mudanças detectadas"))
        .stdout(predicate::str::contains("## Riscos"))
        .stdout(predicate::str::contains("## Ações recomendadas"))
        .stdout(predicate::str::contains("### Rollback sugerido"))
        .stdout(predicate::str::contains("ospf authentication removed"));
}

#[test]
fn diff_of_identical_configs_scores_zero() {
    let dir = tempdir().expect("tempdir");
    let golden = write_config(dir.path(), "golden.cfg", GOLDEN);
    let running = write_config(dir.path(), "running.cfg", GOLDEN);

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("netcfg-audit"));
    cmd.arg("diff")
        .arg(&running)
        .arg(&golden)
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("critical=0"))
        .stdout(predicate::str::contains("overall=0"));
}

#[test]
fn diff_ignores_cosmetic_only_changes() {
    let dir = tempdir().expect("tempdir");
    let golden = write_config(dir.path(), "golden.cfg", GOLDEN);
    let running = write_config(
        dir.path(),
        "running.cfg",
        &GOLDEN.replace("uplink to core", "uplink to new core"),
    );

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("netcfg-audit"));
    cmd.arg("diff")
        .arg(&running)
        .arg(&golden)
        .arg("--format")
        .arg("markdown")
        .assert()
        .success()
        .stdout(predicate::str::contains("no semantic changes detected"))
        .stdout(predicate::str::contains("overall: 0"));
}

#[test]
fn diff_strict_fails_on_critical_findings() {
    let dir = tempdir().expect("tempdir");
    let golden = write_config(dir.path(), "golden.cfg", GOLDEN);
    let running = write_config(
        dir.path(),
        "running.cfg",
        &GOLDEN.replace(
            " permit tcp any host 192.0.2.10 eq 443\n deny ip any any\n",
            " permit ip any any\n",
        ),
    );

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("netcfg-audit"));
    cmd.arg("diff")
        .arg(&running)
        .arg(&golden)
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("critical findings"));
}

#[test]
fn diff_emits_structured_json() {
    let dir = tempdir().expect("tempdir");
    let golden = write_config(dir.path(), "golden.cfg", GOLDEN);
    let running = write_config(
        dir.path(),
        "running.cfg",
        &GOLDEN.replace("remote-as 65001", "remote-as 65010"),
    );

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("netcfg-audit"));
    cmd.arg("diff")
        .arg(&running)
        .arg(&golden)
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"critical_findings\""))
        .stdout(predicate::str::contains("\"risk_scores\""))
        .stdout(predicate::str::contains("AS changed from 65001 to 65010"));
}
