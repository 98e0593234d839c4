use crate::cli::support::{sample_inventory, teamsweep, write_file, AS_OF};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_missing_inventory_is_data_error() {
    let dir = tempdir().unwrap();

    teamsweep(dir.path())
        .args(["audit", "nope.json"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("inventory not found"));
}

#[test]
fn test_missing_inventory_json_envelope() {
    let dir = tempdir().unwrap();

    let output = teamsweep(dir.path())
        .args(["--format", "json", "audit", "nope.json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));

    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["code"], 3);
    assert_eq!(json["error"]["type"], "inventory_not_found");
}

#[test]
fn test_malformed_inventory() {
    let dir = tempdir().unwrap();
    let inventory = write_file(&dir, "inventory.json", "{\"workspaces\": [");

    teamsweep(dir.path())
        .arg("audit")
        .arg(&inventory)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid inventory"));
}

#[test]
fn test_directory_listing_failure_aborts() {
    let dir = tempdir().unwrap();
    let inventory = write_file(
        &dir,
        "inventory.json",
        r#"{"lookup_error": "401 Unauthorized"}"#,
    );

    teamsweep(dir.path())
        .arg("audit")
        .arg(&inventory)
        .args(["--as-of", AS_OF])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "failed to list workspaces: 401 Unauthorized",
        ));
}

#[test]
fn test_zero_workers_is_usage_error() {
    let (dir, inventory) = sample_inventory();

    teamsweep(dir.path())
        .arg("audit")
        .arg(&inventory)
        .args(["--workers", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("workers"));
}

#[test]
fn test_huge_inactive_days_is_usage_error() {
    let (dir, inventory) = sample_inventory();

    teamsweep(dir.path())
        .arg("audit")
        .arg(&inventory)
        .args(["--inactive-days", "4000000000", "--as-of", AS_OF])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid inactivity_days"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn test_bad_date_is_usage_error_in_json() {
    let (dir, inventory) = sample_inventory();

    let output = teamsweep(dir.path())
        .args(["--format", "json", "audit"])
        .arg(&inventory)
        .args(["--as-of", "yesterday"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["type"], "usage_error");
}

#[test]
fn test_quiet_suppresses_error_text() {
    let dir = tempdir().unwrap();

    teamsweep(dir.path())
        .args(["--quiet", "audit", "nope.json"])
        .assert()
        .code(3)
        .stderr(predicate::str::is_empty());
}
