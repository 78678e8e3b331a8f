use assert_cmd::Command;
use predicates::prelude::*;

fn disk_auditor() -> Command {
    Command::cargo_bin("disk-auditor").unwrap()
}

#[test]
fn shows_help() {
    disk_auditor()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("largest folders and files"));
}

#[test]
fn shows_version() {
    disk_auditor()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn requires_subcommand() {
    disk_auditor()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn scan_subcommand_help() {
    disk_auditor()
        .args(["scan", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--depth"))
        .stdout(predicate::str::contains("--no-report"))
        .stdout(predicate::str::contains("negative means unlimited"));
}

#[test]
fn completions_for_bash() {
    disk_auditor()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("disk-auditor"));
}

#[test]
fn rejects_unknown_shell() {
    disk_auditor()
        .args(["completions", "cmd.exe"])
        .assert()
        .failure();
}
