use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use tempfile::TempDir;

/// Run date used by every audit test; the 90-day cutoff is 2026-07-19
pub const AS_OF: &str = "2026-10-17";

/// Six workspaces covering every verdict path:
/// - ws-a: nobody in it, has files -> deletable
/// - ws-b: inactive and empty -> deletable
/// - ws-c: inactive with files in a channel -> kept
/// - ws-d: recent activity, private channel lookup fails -> kept
/// - ws-e: orphaned library folder -> kept
/// - ws-f: drive lookup fails -> failure rows
pub const SAMPLE_INVENTORY: &str = r#"{
  "workspaces": [
    {
      "id": "ws-a",
      "display_name": "Ghost Town",
      "channels": [{"display_name": "General"}],
      "drive": {"items": [
        {"name": "General", "size": 1024, "children": [{"name": "plan.docx", "size": 1024}]}
      ]}
    },
    {
      "id": "ws-b",
      "display_name": "Old Project",
      "owners": [{"display_name": "Ada Lovelace"}],
      "members": [{"display_name": "Ada Lovelace"}, {"display_name": "Grace Hopper"}],
      "channels": [{"display_name": "General"}],
      "drive": {"items": [{"name": "General", "children": []}]}
    },
    {
      "id": "ws-c",
      "display_name": "Finance",
      "owners": [{"display_name": "Ada Lovelace"}],
      "members": [{"display_name": "Grace Hopper", "identity_id": "0f8fad5b-d9cb-469f-a165-70867728950e"}],
      "channels": [{"display_name": "General"}, {"display_name": "Budget"}],
      "drive": {"web_url": "https://files.example/finance", "items": [
        {"name": "General", "children": []},
        {"name": "Budget", "size": 2048, "children": [
          {"name": "q1.xlsx", "size": 1024}, {"name": "q2.xlsx", "size": 1024}
        ]}
      ]}
    },
    {
      "id": "ws-d",
      "display_name": "Legal",
      "owners": [{"display_name": "Ada Lovelace"}],
      "channels": [
        {"display_name": "General"},
        {"display_name": "Counsel", "membership_type": "private", "lookup_error": "503 Service Unavailable"}
      ],
      "drive": {"items": [{"name": "General", "children": []}]}
    },
    {
      "id": "ws-e",
      "display_name": "Ops",
      "owners": [{"display_name": "Ada Lovelace"}],
      "channels": [{"display_name": "General"}],
      "drive": {"items": [
        {"name": "General", "children": []},
        {"name": "ArchivedStuff", "children": []}
      ]}
    },
    {
      "id": "ws-f",
      "display_name": "Broken",
      "owners": [{"display_name": "Ada Lovelace"}],
      "drive": {"lookup_error": "500 Internal Server Error"}
    }
  ],
  "identities": [{"id": "0f8fad5b-d9cb-469f-a165-70867728950e", "department": "Treasury"}],
  "activity_report": [
    {"workspace_id": "ws-a", "last_activity_date": "2026-10-01"},
    {"workspace_id": "ws-b", "last_activity_date": "2026-01-05"},
    {"workspace_id": "ws-c", "last_activity_date": "2026-02-01"},
    {"workspace_id": "ws-d", "last_activity_date": "2026-10-01"}
  ]
}"#;

/// Get a Command for teamsweep isolated from the user's config
pub fn teamsweep(config_dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("teamsweep");
    cmd.env("TEAMSWEEP_CONFIG_DIR", config_dir)
        .env_remove("TEAMSWEEP_CONFIG")
        .env_remove("TEAMSWEEP_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// Write a file into the test directory and return its path
pub fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Temp directory holding the sample inventory
pub fn sample_inventory() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "inventory.json", SAMPLE_INVENTORY);
    (dir, path)
}

/// Run an audit of `inventory` with JSON output and parse stdout
pub fn audit_json(dir: &TempDir, inventory: &Path, extra: &[&str]) -> serde_json::Value {
    let output = teamsweep(dir.path())
        .args(["--format", "json", "audit"])
        .arg(inventory)
        .args(["--as-of", AS_OF])
        .args(extra)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "audit failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

/// Summary row for one workspace id
pub fn summary<'v>(report: &'v serde_json::Value, id: &str) -> &'v serde_json::Value {
    report["summaries"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["workspace_id"] == id)
        .unwrap_or_else(|| panic!("no summary for {}", id))
}

/// Detail rows for one workspace id
pub fn details<'v>(report: &'v serde_json::Value, id: &str) -> Vec<&'v serde_json::Value> {
    report["details"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|d| d["workspace_id"] == id)
        .collect()
}
