//! Last-activity lookup built from the tenant activity report

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{AuditError, Result};
use crate::source::ActivityReport;

/// Trailing window covered by the activity report, fixed by the platform
pub const ACTIVITY_REPORT_WINDOW_DAYS: u32 = 180;

/// Label used in report cells when no activity date is known
pub const NO_ACTIVITY_LABEL: &str = "No Activity in Period";

/// One row of the activity report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub workspace_id: String,
    #[serde(default)]
    pub last_activity_date: Option<String>,
}

impl ActivityRecord {
    pub fn new(workspace_id: impl Into<String>, date: Option<&str>) -> Self {
        Self {
            workspace_id: workspace_id.into(),
            last_activity_date: date.map(str::to_string),
        }
    }
}

/// What the report says about one workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastActivity {
    /// Workspace absent from the report
    NotReported,
    /// Present with a blank or unparseable date
    Blank,
    On(NaiveDate),
}

impl LastActivity {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            LastActivity::On(date) => Some(*date),
            LastActivity::NotReported | LastActivity::Blank => None,
        }
    }

    /// Inactive unless a recorded date falls on or after the cutoff
    pub fn is_inactive(&self, cutoff: NaiveDate) -> bool {
        match self.date() {
            Some(date) => date < cutoff,
            None => true,
        }
    }
}

impl fmt::Display for LastActivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LastActivity::On(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            LastActivity::NotReported | LastActivity::Blank => write!(f, "{}", NO_ACTIVITY_LABEL),
        }
    }
}

/// Frozen mapping of workspace id to last activity date.
///
/// Built once before any workspace is processed and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct ActivityIndex {
    entries: HashMap<String, Option<NaiveDate>>,
    available: bool,
}

impl ActivityIndex {
    /// Build from report records; later duplicates overwrite earlier ones.
    pub fn from_records(records: impl IntoIterator<Item = ActivityRecord>) -> Self {
        let mut entries = HashMap::new();
        for record in records {
            let date = record.last_activity_date.as_deref().and_then(parse_date);
            if let Some(previous) = entries.insert(record.workspace_id.clone(), date) {
                debug!(
                    workspace_id = %record.workspace_id,
                    ?previous,
                    "duplicate activity record, keeping latest"
                );
            }
        }
        Self {
            entries,
            available: true,
        }
    }

    /// Build from a report source, degrading to an empty index if the report
    /// cannot be read.
    pub fn from_report(report: &dyn ActivityReport) -> Self {
        match report.records() {
            Ok(records) => {
                let index = Self::from_records(records);
                debug!(workspaces = index.len(), "activity_index_built");
                index
            }
            Err(e) => {
                warn!(
                    error = %e,
                    "Activity report unavailable; every workspace is treated as having no recorded activity"
                );
                Self::unavailable()
            }
        }
    }

    /// Empty index for runs without an activity report
    pub fn unavailable() -> Self {
        Self {
            entries: HashMap::new(),
            available: false,
        }
    }

    pub fn lookup(&self, workspace_id: &str) -> LastActivity {
        match self.entries.get(workspace_id) {
            None => LastActivity::NotReported,
            Some(None) => LastActivity::Blank,
            Some(Some(date)) => LastActivity::On(*date),
        }
    }

    /// Whether the report was obtained at all
    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Date before which recorded activity counts as inactive
pub fn inactivity_cutoff(today: NaiveDate, inactivity_days: u32) -> Result<NaiveDate> {
    today
        .checked_sub_signed(Duration::days(i64::from(inactivity_days)))
        .ok_or_else(|| {
            AuditError::invalid_value(
                "inactivity_days",
                format!("{} (cutoff before {} is out of range)", inactivity_days, today),
            )
        })
}

/// Accepts plain ISO dates and RFC 3339 timestamps; anything else is blank.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()));
    if parsed.is_none() {
        debug!(value = raw, "unparseable activity date treated as blank");
    }
    parsed
}
