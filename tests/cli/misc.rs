use crate::cli::support::teamsweep;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_help_flag() {
    let dir = tempdir().unwrap();

    teamsweep(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: teamsweep"))
        .stdout(predicate::str::contains("audit"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_flag() {
    let dir = tempdir().unwrap();

    teamsweep(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("teamsweep"));
}

#[test]
fn test_no_command_prints_banner() {
    let dir = tempdir().unwrap();

    teamsweep(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Retention audit for collaboration workspaces."));
}

#[test]
fn test_unknown_format_rejected() {
    let dir = tempdir().unwrap();

    teamsweep(dir.path())
        .args(["--format", "csv", "config"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown format: csv"));
}
