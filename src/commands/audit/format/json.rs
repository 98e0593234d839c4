//! JSON output formatting for audit command

use teamsweep_core::error::Result;
use teamsweep_core::report::AuditReport;

/// Output the full report as pretty JSON
pub fn output_json(report: &AuditReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
