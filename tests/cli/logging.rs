use crate::cli::support::{sample_inventory, teamsweep, AS_OF};
use predicates::prelude::*;

#[test]
fn test_log_level_debug_shows_phase_events() {
    let (dir, inventory) = sample_inventory();

    teamsweep(dir.path())
        .args(["--log-level", "debug", "--quiet", "audit"])
        .arg(&inventory)
        .args(["--as-of", AS_OF])
        .assert()
        .success()
        .stderr(predicate::str::contains("audit_started"))
        .stderr(predicate::str::contains("workspace_decided"));
}

#[test]
fn test_default_level_only_warns() {
    let (dir, inventory) = sample_inventory();

    teamsweep(dir.path())
        .args(["--quiet", "audit"])
        .arg(&inventory)
        .args(["--as-of", AS_OF])
        .assert()
        .success()
        .stderr(predicate::str::contains("audit_started").not())
        .stderr(predicate::str::contains("Workspace audit failed"))
        .stderr(predicate::str::contains("Private channel drive lookup failed"));
}

#[test]
fn test_log_json_emits_json_lines() {
    let (dir, inventory) = sample_inventory();

    let output = teamsweep(dir.path())
        .args(["--log-json", "--log-level", "info", "--quiet", "audit"])
        .arg(&inventory)
        .args(["--as-of", AS_OF])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    let first = stderr.lines().next().expect("log output");
    let event: serde_json::Value = serde_json::from_str(first).unwrap();
    assert!(event.get("level").is_some());
}

#[test]
fn test_env_filter_overrides_flag() {
    let (dir, inventory) = sample_inventory();

    teamsweep(dir.path())
        .env("TEAMSWEEP_LOG", "teamsweep_core=debug")
        .args(["--quiet", "audit"])
        .arg(&inventory)
        .args(["--as-of", AS_OF])
        .assert()
        .success()
        .stderr(predicate::str::contains("inventory_loaded"));
}
