use crate::cli::support::{
    audit_json, details, sample_inventory, summary, teamsweep, write_file, AS_OF,
};
use predicates::prelude::*;

// ============================================================================
// Verdicts
// ============================================================================

#[test]
fn test_audit_verdicts_for_sample_tenant() {
    let (dir, inventory) = sample_inventory();
    let report = audit_json(&dir, &inventory, &[]);

    assert_eq!(report["generated_on"], AS_OF);
    assert_eq!(report["cutoff"], "2026-07-19");
    assert_eq!(report["inactivity_days"], 90);
    assert_eq!(report["report_window_days"], 180);
    assert_eq!(report["activity_report_available"], true);
    assert_eq!(report["failed_workspaces"], 1);
    assert_eq!(report["summaries"].as_array().unwrap().len(), 6);

    let expected = [
        ("ws-a", "Yes", "No members or owners"),
        ("ws-b", "Yes", "Inactive and no files"),
        ("ws-c", "No", "Contains files or needs review"),
        ("ws-d", "No", "Has recent activity"),
        ("ws-e", "No", "Contains files or needs review"),
    ];
    for (id, safe, rationale) in expected {
        let row = summary(&report, id);
        assert_eq!(row["safe_to_delete"], safe, "{}", id);
        assert_eq!(row["rationale"], rationale, "{}", id);
    }
}

#[test]
fn test_summary_columns() {
    let (dir, inventory) = sample_inventory();
    let report = audit_json(&dir, &inventory, &[]);

    let finance = summary(&report, "ws-c");
    assert_eq!(finance["workspace_name"], "Finance");
    assert_eq!(finance["owner_count"], 1);
    assert_eq!(finance["member_count"], 1);
    assert_eq!(finance["owner_names"], "Ada Lovelace");
    assert_eq!(finance["member_names"], "Grace Hopper");
    assert_eq!(finance["departments"], "Treasury");
    assert_eq!(finance["last_activity"], "2026-02-01");
    assert_eq!(finance["total_size"], "2 KB");
    assert_eq!(finance["has_any_data"], true);
    assert_eq!(finance["storage_url"], "https://files.example/finance");

    assert_eq!(summary(&report, "ws-e")["last_activity"], "No Activity in Period");
}

#[test]
fn test_channel_rows() {
    let (dir, inventory) = sample_inventory();
    let report = audit_json(&dir, &inventory, &[]);

    let finance = details(&report, "ws-c");
    assert_eq!(finance.len(), 2);
    assert_eq!(finance[0]["channel_name"], "General");
    assert_eq!(finance[0]["content_state"], "No");
    assert_eq!(finance[1]["channel_name"], "Budget");
    assert_eq!(finance[1]["content_state"], "Yes");
    assert_eq!(finance[1]["channel_size"], "2 KB");
    assert_eq!(finance[1]["item_counts"], "2 enumerated / 2 reported");
}

#[test]
fn test_private_channel_failure_is_contained() {
    let (dir, inventory) = sample_inventory();
    let report = audit_json(&dir, &inventory, &[]);

    let legal = details(&report, "ws-d");
    assert_eq!(legal.len(), 2);
    assert_eq!(legal[0]["content_state"], "No");
    assert_eq!(legal[1]["channel_name"], "Counsel");
    assert_eq!(legal[1]["content_state"], "Error");
    assert_eq!(legal[1]["channel_size"], "Error");
    assert!(legal[1]["status"]
        .as_str()
        .unwrap()
        .contains("503 Service Unavailable"));
}

#[test]
fn test_orphan_folder_row() {
    let (dir, inventory) = sample_inventory();
    let report = audit_json(&dir, &inventory, &[]);

    let ops = details(&report, "ws-e");
    let orphan = ops
        .iter()
        .find(|d| d["channel_name"] == "ArchivedStuff (Orphaned)")
        .expect("orphan row");
    assert_eq!(orphan["content_state"], "Needs Manual Review");
    assert_eq!(orphan["status"], "Orphaned Folder");
}

#[test]
fn test_failed_workspace_rows() {
    let (dir, inventory) = sample_inventory();
    let report = audit_json(&dir, &inventory, &[]);

    let broken = summary(&report, "ws-f");
    assert_eq!(broken["safe_to_delete"], "No");
    assert!(broken["rationale"]
        .as_str()
        .unwrap()
        .contains("500 Internal Server Error"));
    assert_eq!(broken["owner_count"], 1);

    let rows = details(&report, "ws-f");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["channel_name"], "Error");
    assert_eq!(rows[0]["content_state"], "Error");
}

// ============================================================================
// Flags
// ============================================================================

#[test]
fn test_inactive_days_flag_moves_cutoff() {
    let (dir, inventory) = sample_inventory();
    let report = audit_json(&dir, &inventory, &["--inactive-days", "365"]);

    assert_eq!(report["cutoff"], "2025-10-17");
    assert_eq!(report["inactivity_days"], 365);
    assert_eq!(summary(&report, "ws-b")["rationale"], "Has recent activity");
}

#[test]
fn test_workers_keep_directory_order() {
    let (dir, inventory) = sample_inventory();
    let sequential = audit_json(&dir, &inventory, &[]);
    let parallel = audit_json(&dir, &inventory, &["--workers", "4"]);

    assert_eq!(sequential["summaries"], parallel["summaries"]);
    assert_eq!(sequential["details"], parallel["details"]);
}

#[test]
fn test_only_deletable() {
    let (dir, inventory) = sample_inventory();
    let report = audit_json(&dir, &inventory, &["--only-deletable"]);

    let ids: Vec<&str> = report["summaries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["workspace_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["ws-a", "ws-b"]);
    assert!(details(&report, "ws-c").is_empty());
}

#[test]
fn test_output_file_holds_full_report() {
    let (dir, inventory) = sample_inventory();
    let out = dir.path().join("report.json");

    teamsweep(dir.path())
        .args(["--quiet", "audit"])
        .arg(&inventory)
        .args(["--as-of", AS_OF, "--only-deletable", "--output"])
        .arg(&out)
        .assert()
        .success();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written["summaries"].as_array().unwrap().len(), 6);
}

#[test]
fn test_activity_file_overrides_embedded_report() {
    let (dir, inventory) = sample_inventory();
    let activity = write_file(
        &dir,
        "activity.json",
        r#"[{"workspace_id": "ws-c", "last_activity_date": "2026-10-10"}]"#,
    );
    let report = audit_json(
        &dir,
        &inventory,
        &["--activity", activity.to_str().unwrap()],
    );

    assert_eq!(summary(&report, "ws-c")["rationale"], "Has recent activity");
    assert_eq!(summary(&report, "ws-b")["last_activity"], "No Activity in Period");
}

#[test]
fn test_unreadable_activity_file_degrades() {
    let (dir, inventory) = sample_inventory();
    let missing = dir.path().join("missing.json");

    teamsweep(dir.path())
        .args(["--format", "json", "audit"])
        .arg(&inventory)
        .args(["--as-of", AS_OF, "--activity"])
        .arg(&missing)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\"activity_report_available\": false",
        ))
        .stderr(predicate::str::contains("Activity report unavailable"));
}

// ============================================================================
// Output formats
// ============================================================================

#[test]
fn test_human_output() {
    let (dir, inventory) = sample_inventory();

    teamsweep(dir.path())
        .arg("audit")
        .arg(&inventory)
        .args(["--as-of", AS_OF])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Audit as of 2026-10-17 (inactive before 2026-07-19, 90 days)",
        ))
        .stdout(predicate::str::contains(
            "Ghost Town [ws-a] safe to delete: Yes (No members or owners)",
        ))
        .stdout(predicate::str::contains("departments: Treasury"))
        .stdout(predicate::str::contains("ArchivedStuff (Orphaned)"))
        .stdout(predicate::str::contains(
            "6 workspaces, 2 safe to delete, 1 failed",
        ));
}

#[test]
fn test_human_output_quiet() {
    let (dir, inventory) = sample_inventory();

    teamsweep(dir.path())
        .args(["--quiet", "audit"])
        .arg(&inventory)
        .args(["--as-of", AS_OF, "--only-deletable"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Audit as of").not())
        .stdout(predicate::str::contains("Old Project [ws-b] safe to delete: Yes"))
        .stdout(predicate::str::contains("Finance").not());
}

#[test]
fn test_records_output() {
    let (dir, inventory) = sample_inventory();

    teamsweep(dir.path())
        .args(["--format", "records", "audit"])
        .arg(&inventory)
        .args(["--as-of", AS_OF])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "H teamsweep=1 records=1 generated=2026-10-17 cutoff=2026-07-19",
        ))
        .stdout(predicate::str::contains("workspaces=6 deletable=2 failed=1"))
        .stdout(predicate::str::contains("S ws-a safe=Yes members=0 owners=0"))
        .stdout(predicate::str::contains(
            r#"C ws-d "Counsel" content="Error" size="Error""#,
        ));
}
