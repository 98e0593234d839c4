//! Records output formatting for audit command

use teamsweep_core::records::format_report;
use teamsweep_core::report::AuditReport;

/// Output in records format
pub fn output_records(report: &AuditReport) {
    for line in format_report(report) {
        println!("{}", line);
    }
}
