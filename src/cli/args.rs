//! Command argument structures

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;

use crate::cli::parse::parse_date;

/// Arguments for the audit command.
#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Tenant inventory snapshot (JSON)
    pub inventory: PathBuf,

    /// Activity report (JSON array); overrides the report embedded in the inventory
    #[arg(long)]
    pub activity: Option<PathBuf>,

    /// Days without activity before a workspace counts as inactive
    #[arg(long)]
    pub inactive_days: Option<u32>,

    /// Workspaces audited concurrently
    #[arg(long)]
    pub workers: Option<usize>,

    /// Also write the full JSON report to this file
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Only print workspaces that are safe to delete
    #[arg(long)]
    pub only_deletable: bool,

    /// Run date used for the inactivity cutoff (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub as_of: Option<NaiveDate>,
}
