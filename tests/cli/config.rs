use crate::cli::support::{sample_inventory, teamsweep, write_file, AS_OF};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_defaults_without_file() {
    let dir = tempdir().unwrap();

    let output = teamsweep(dir.path())
        .args(["--format", "json", "config"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["source"], "defaults");
    assert_eq!(json["config"]["inactivity_days"], 90);
    assert_eq!(json["config"]["lookup_batch_size"], 15);
    assert_eq!(json["config"]["member_abbreviation_threshold"], 5);
    assert_eq!(json["config"]["general_channel_name"], "General");
    assert_eq!(json["config"]["workers"], 1);
}

#[test]
fn test_config_file_in_config_dir() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "inactivity_days = 45\n").unwrap();

    teamsweep(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("inactivity_days = 45"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_records() {
    let dir = tempdir().unwrap();

    teamsweep(dir.path())
        .args(["--format", "records", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "H teamsweep=1 records=1 mode=config source=\"defaults\"",
        ))
        .stdout(predicate::str::contains("K workers=1"));
}

#[test]
fn test_explicit_config_drives_audit() {
    let (dir, inventory) = sample_inventory();
    let config = write_file(
        &dir,
        "audit.toml",
        "inactivity_days = 365\ngeneral_channel_name = \"General\"\n",
    );

    teamsweep(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["--format", "records", "audit"])
        .arg(&inventory)
        .args(["--as-of", AS_OF])
        .assert()
        .success()
        .stdout(predicate::str::contains("cutoff=2025-10-17 inactive_days=365"));
}

#[test]
fn test_flag_overrides_config_file() {
    let (dir, inventory) = sample_inventory();
    std::fs::write(dir.path().join("config.toml"), "inactivity_days = 365\n").unwrap();

    teamsweep(dir.path())
        .args(["--format", "records", "audit"])
        .arg(&inventory)
        .args(["--as-of", AS_OF, "--inactive-days", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("inactive_days=30"));
}

#[test]
fn test_invalid_config_value_is_usage_error() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "lookup_batch_size = 20\n").unwrap();

    teamsweep(dir.path())
        .arg("config")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("lookup_batch_size"));
}

#[test]
fn test_malformed_config_is_data_error() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "workers = \"many\"\n").unwrap();

    teamsweep(dir.path())
        .arg("config")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid config"));
}
