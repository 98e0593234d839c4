//! `teamsweep audit` command - audit every workspace in an inventory
//!
//! - activity from `--activity` or the inventory's embedded report
//! - interruption via Ctrl-C stops before the next workspace
//! - `--output` writes the full JSON report regardless of `--format`
//! - `--only-deletable` filters printed rows, not the `--output` file

pub mod format;

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use tracing::{debug, info};

use crate::cli::{AuditArgs, Cli};
use crate::output_by_format_result;
use teamsweep_core::activity::ActivityIndex;
use teamsweep_core::audit::Auditor;
use teamsweep_core::config::AuditConfig;
use teamsweep_core::error::{AuditError, Result};
use teamsweep_core::report::AuditReport;
use teamsweep_core::source::{ActivityReportFile, SnapshotSource};

/// Execute the audit command
pub fn execute(cli: &Cli, config: &AuditConfig, args: &AuditArgs, start: Instant) -> Result<()> {
    let source = SnapshotSource::load(&args.inventory)?;
    debug!(elapsed = ?start.elapsed(), "load_inventory");

    let activity = match &args.activity {
        Some(path) => ActivityIndex::from_report(&ActivityReportFile::new(path)),
        None => ActivityIndex::from_report(&source),
    };
    debug!(elapsed = ?start.elapsed(), entries = activity.len(), "build_activity_index");

    let today = args.as_of.unwrap_or_else(|| Local::now().date_naive());

    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_clone = Arc::clone(&interrupted);
    if let Err(e) = ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::SeqCst);
    }) {
        debug!(error = %e, "Could not install interrupt handler");
    }

    let mut report = Auditor::new(&source, &source, &activity, config, today)
        .with_interrupt(&interrupted)
        .run()?;
    debug!(elapsed = ?start.elapsed(), "audit");

    if let Some(path) = &args.output {
        write_report(path, &report)?;
    }

    if args.only_deletable {
        report.retain_deletable();
    }

    output_by_format_result!(cli.format,
        json => format::json::output_json(&report),
        human => { format::human::output_human(cli, &report) },
        records => { format::records::output_records(&report) }
    )
}

fn write_report(path: &Path, report: &AuditReport) -> Result<()> {
    let content = serde_json::to_string_pretty(report)?;
    fs::write(path, content)
        .map_err(|e| AuditError::io_operation("write report", path.display(), e))?;
    info!(path = %path.display(), "report_written");
    Ok(())
}
