use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write file");
    path
}

#[test]
fn low_impact_proposal_gets_go() {
    let dir = tempdir().expect("tempdir");
    let proposal = write_file(
        dir.path(),
        "proposal.txt",
        "interface GigabitEthernet0/0\n description new uplink label\n",
    );

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("netcfg-audit"));
    cmd.arg("review")
        .arg(&proposal)
        .arg("--format")
        .arg("markdown")
        .assert()
        .success()
        .stdout(predicate::str::contains("## Matriz de impacto"))
        .stdout(predicate::str::contains("## Decisão assistida"))
        .stdout(predicate::str::contains("**GO**"))
        .stdout(predicate::str::contains("## Playbook pós-change"))
        .stdout(predicate::str::contains("ALERTA DE ALTO RISCO").not());
}

#[test]
fn high_risk_proposal_gets_no_go_with_alert() {
    let dir = tempdir().expect("tempdir");
    let proposal = write_file(
        dir.path(),
        "proposal.txt",
        "interface GigabitEthernet0/0\n no ip ospf authentication message-digest\nip access-list extended EDGE-IN\n permit ip any any\n",
    );

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("netcfg-audit"));
    cmd.arg("review")
        .arg(&proposal)
        .arg("--format")
        .arg("markdown")
        .assert()
        .success()
        .stdout(predicate::str::contains("**NO-GO**"))
        .stdout(predicate::str::contains("ALERTA DE ALTO RISCO"))
        .stdout(predicate::str::contains("Recomendações objetivas"));
}

#[test]
fn review_strict_fails_on_no_go() {
    let dir = tempdir().expect("tempdir");
    let proposal = write_file(
        dir.path(),
        "proposal.txt",
        "no ip ospf authentication\npermit ip any any\n",
    );

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("netcfg-audit"));
    cmd.arg("review")
        .arg(&proposal)
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("change rejected"));
}

#[test]
fn review_folds_current_config_issues_into_actions() {
    let dir = tempdir().expect("tempdir");
    let proposal = write_file(
        dir.path(),
        "proposal.txt",
        "interface Gi0/0\n description maintenance window test\n",
    );
    let current = write_file(
        dir.path(),
        "current.cfg",
        "interface Gi0/0\nline vty 0 4\n transport input telnet\n",
    );

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("netcfg-audit"));
    cmd.arg("review")
        .arg(&proposal)
        .arg("--current")
        .arg(&current)
        .arg("--format")
        .arg("markdown")
        .assert()
        .success()
        .stdout(predicate::str::contains("resolve before the change"));
}

#[test]
fn review_emits_structured_json() {
    let dir = tempdir().expect("tempdir");
    let proposal = write_file(dir.path(), "proposal.txt", "permit ip any any\n");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("netcfg-audit"));
    cmd.arg("review")
        .arg(&proposal)
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"decision\""))
        .stdout(predicate::str::contains("\"overall_score\""))
        .stdout(predicate::str::contains("\"post_change_playbook\""));
}
