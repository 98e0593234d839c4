//! Human-readable output formatting for audit command

use std::collections::HashMap;

use crate::cli::Cli;
use teamsweep_core::report::{AuditReport, ChannelAuditRow, WorkspaceSummaryRow};

/// Output in human-readable format
pub fn output_human(cli: &Cli, report: &AuditReport) {
    if !cli.quiet {
        println!(
            "Audit as of {} (inactive before {}, {} days)",
            report.generated_on.format("%Y-%m-%d"),
            report.cutoff.format("%Y-%m-%d"),
            report.inactivity_days
        );
        if !report.activity_report_available {
            println!("Activity report unavailable: no workspace has recorded activity");
        }
        println!();
    }

    if report.summaries.is_empty() {
        if !cli.quiet {
            println!("No workspaces found");
        }
        return;
    }

    let mut details: HashMap<&str, Vec<&ChannelAuditRow>> = HashMap::new();
    for row in &report.details {
        details.entry(row.workspace_id.as_str()).or_default().push(row);
    }

    for summary in &report.summaries {
        let rows = details
            .get(summary.workspace_id.as_str())
            .map(Vec::as_slice)
            .unwrap_or_default();
        print_workspace(cli, summary, rows);
    }

    if !cli.quiet {
        println!(
            "{} workspaces, {} safe to delete, {} failed",
            report.summaries.len(),
            report.deletable_count(),
            report.failed_workspaces
        );
    }
}

fn print_workspace(cli: &Cli, summary: &WorkspaceSummaryRow, rows: &[&ChannelAuditRow]) {
    println!(
        "{} [{}] safe to delete: {} ({})",
        summary.workspace_name, summary.workspace_id, summary.safe_to_delete, summary.rationale
    );
    if cli.quiet {
        return;
    }

    println!(
        "  owners: {}  members: {}  last activity: {}  size: {}",
        summary.owner_count, summary.member_count, summary.last_activity, summary.total_size
    );
    if !summary.departments.is_empty() {
        println!("  departments: {}", summary.departments);
    }

    let name_width = rows.iter().map(|r| r.channel_name.len()).max().unwrap_or(0);
    for row in rows {
        println!(
            "  - {:<name_width$}  {:<19}  {:>10}  {}",
            row.channel_name,
            row.content_state.to_string(),
            row.channel_size,
            row.status,
            name_width = name_width
        );
    }
    println!();
}
