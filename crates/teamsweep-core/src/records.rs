//! Records output format
//!
//! One header line followed by one line per workspace (`S`) and one per
//! detail row (`C`). Free-text fields are quoted with embedded quotes escaped.

use crate::report::{AuditReport, ChannelAuditRow, WorkspaceSummaryRow};

/// Escape double quotes in a string for records format.
pub fn escape_quotes(s: &str) -> String {
    s.replace('\"', r#"\""#)
}

/// Format the `H` header line
pub fn format_header(report: &AuditReport) -> String {
    format!(
        "H teamsweep=1 records=1 generated={} cutoff={} inactive_days={} workspaces={} deletable={} failed={} activity_report={}",
        report.generated_on.format("%Y-%m-%d"),
        report.cutoff.format("%Y-%m-%d"),
        report.inactivity_days,
        report.summaries.len(),
        report.deletable_count(),
        report.failed_workspaces,
        if report.activity_report_available {
            "available"
        } else {
            "unavailable"
        }
    )
}

/// Format an `S` line for one workspace summary
pub fn format_workspace_record(row: &WorkspaceSummaryRow) -> String {
    format!(
        "S {} safe={} members={} owners={} data={} last_activity=\"{}\" size=\"{}\" \"{}\" rationale=\"{}\"",
        row.workspace_id,
        row.safe_to_delete,
        row.member_count,
        row.owner_count,
        if row.has_any_data { "yes" } else { "no" },
        escape_quotes(&row.last_activity),
        escape_quotes(&row.total_size),
        escape_quotes(&row.workspace_name),
        escape_quotes(&row.rationale)
    )
}

/// Format a `C` line for one detail row
pub fn format_channel_record(row: &ChannelAuditRow) -> String {
    format!(
        "C {} \"{}\" content=\"{}\" size=\"{}\" items=\"{}\" status=\"{}\"",
        row.workspace_id,
        escape_quotes(&row.channel_name),
        row.content_state,
        escape_quotes(&row.channel_size),
        escape_quotes(&row.item_counts),
        escape_quotes(&row.status)
    )
}

/// All lines of a report, workspaces first then details
pub fn format_report(report: &AuditReport) -> Vec<String> {
    let mut lines = Vec::with_capacity(1 + report.summaries.len() + report.details.len());
    lines.push(format_header(report));
    lines.extend(report.summaries.iter().map(format_workspace_record));
    lines.extend(report.details.iter().map(format_channel_record));
    lines
}
