//! Detail and summary rows handed to the tabular exporter

use chrono::NaiveDate;
use serde::Serialize;

use crate::decision::{Decision, SafeToDelete};
use crate::membership::MembershipSummary;
use crate::model::Workspace;
use crate::size::format_size;
use crate::storage::{ChannelOutcome, ContentState, OrphanFolder};

const NOT_AVAILABLE: &str = "N/A";

/// Channel cell used for the single detail row of a failed workspace
pub const FAILED_CHANNEL_LABEL: &str = "Error";

/// One row per declared channel, orphan folder, or failed workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelAuditRow {
    pub workspace_name: String,
    pub channel_name: String,
    pub member_count: usize,
    pub owner_count: usize,
    pub last_activity: String,
    pub workspace_size: String,
    pub channel_size: String,
    pub storage_url: String,
    pub item_counts: String,
    pub content_state: ContentState,
    pub status: String,
    pub workspace_id: String,
}

impl ChannelAuditRow {
    fn base(workspace: &Workspace, channel_name: String) -> Self {
        Self {
            workspace_name: workspace.display_name.clone(),
            channel_name,
            member_count: workspace.member_count,
            owner_count: workspace.owner_count,
            last_activity: workspace.last_activity.to_string(),
            workspace_size: total_size(workspace),
            channel_size: NOT_AVAILABLE.to_string(),
            storage_url: workspace.storage_url.clone().unwrap_or_default(),
            item_counts: NOT_AVAILABLE.to_string(),
            content_state: ContentState::Error,
            status: String::new(),
            workspace_id: workspace.id.clone(),
        }
    }

    pub fn from_outcome(workspace: &Workspace, outcome: &ChannelOutcome) -> Self {
        Self {
            channel_size: outcome.size.to_string(),
            item_counts: outcome
                .item_counts
                .map(|c| c.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            content_state: outcome.state(),
            status: outcome.finding.to_string(),
            storage_url: outcome
                .storage_url
                .clone()
                .or_else(|| workspace.storage_url.clone())
                .unwrap_or_default(),
            ..Self::base(workspace, outcome.channel_name.clone())
        }
    }

    pub fn orphan(workspace: &Workspace, orphan: &OrphanFolder) -> Self {
        Self {
            channel_size: format_size(orphan.size),
            item_counts: format!("{} reported", orphan.child_count),
            content_state: ContentState::NeedsManualReview,
            status: "Orphaned Folder".to_string(),
            ..Self::base(workspace, orphan.label())
        }
    }

    /// The single row emitted for a workspace whose audit failed
    pub fn failure(workspace: &Workspace, reason: &str) -> Self {
        Self {
            channel_size: FAILED_CHANNEL_LABEL.to_string(),
            content_state: ContentState::Error,
            status: reason.to_string(),
            ..Self::base(workspace, FAILED_CHANNEL_LABEL.to_string())
        }
    }
}

/// One row per workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspaceSummaryRow {
    pub workspace_name: String,
    pub member_count: usize,
    pub owner_count: usize,
    pub safe_to_delete: SafeToDelete,
    pub owner_names: String,
    pub member_names: String,
    pub departments: String,
    pub last_activity: String,
    pub total_size: String,
    pub has_any_data: bool,
    pub rationale: String,
    pub workspace_id: String,
    pub storage_url: String,
}

impl WorkspaceSummaryRow {
    pub fn new(
        workspace: &Workspace,
        membership: &MembershipSummary,
        has_any_data: bool,
        decision: &Decision,
    ) -> Self {
        Self {
            workspace_name: workspace.display_name.clone(),
            member_count: workspace.member_count,
            owner_count: workspace.owner_count,
            safe_to_delete: decision.safe_to_delete,
            owner_names: membership.owner_names.clone(),
            member_names: membership.member_names.clone(),
            departments: membership.departments.to_string(),
            last_activity: workspace.last_activity.to_string(),
            total_size: total_size(workspace),
            has_any_data,
            rationale: decision.rationale.to_string(),
            workspace_id: workspace.id.clone(),
            storage_url: workspace.storage_url.clone().unwrap_or_default(),
        }
    }

    /// Summary for a workspace whose audit failed: never recommended for deletion
    pub fn failure(workspace: &Workspace, decision: &Decision) -> Self {
        Self {
            workspace_name: workspace.display_name.clone(),
            member_count: workspace.member_count,
            owner_count: workspace.owner_count,
            safe_to_delete: decision.safe_to_delete,
            owner_names: String::new(),
            member_names: String::new(),
            departments: String::new(),
            last_activity: workspace.last_activity.to_string(),
            total_size: total_size(workspace),
            has_any_data: false,
            rationale: decision.rationale.to_string(),
            workspace_id: workspace.id.clone(),
            storage_url: workspace.storage_url.clone().unwrap_or_default(),
        }
    }

    pub fn is_deletable(&self) -> bool {
        self.safe_to_delete == SafeToDelete::Yes
    }
}

/// Rows produced for a single workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspaceAudit {
    pub summary: WorkspaceSummaryRow,
    pub details: Vec<ChannelAuditRow>,
    /// Set when the workspace hit its error boundary
    pub failed: bool,
}

/// Full result of an audit run
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub generated_on: NaiveDate,
    pub cutoff: NaiveDate,
    pub inactivity_days: u32,
    pub report_window_days: u32,
    pub activity_report_available: bool,
    pub failed_workspaces: usize,
    pub summaries: Vec<WorkspaceSummaryRow>,
    pub details: Vec<ChannelAuditRow>,
}

impl AuditReport {
    pub fn deletable_count(&self) -> usize {
        self.summaries.iter().filter(|s| s.is_deletable()).count()
    }

    /// Keep only workspaces recommended for deletion, with their detail rows
    pub fn retain_deletable(&mut self) {
        self.summaries.retain(WorkspaceSummaryRow::is_deletable);
        let keep: std::collections::HashSet<&str> = self
            .summaries
            .iter()
            .map(|s| s.workspace_id.as_str())
            .collect();
        self.details
            .retain(|d| keep.contains(d.workspace_id.as_str()));
    }
}

fn total_size(workspace: &Workspace) -> String {
    workspace
        .total_size
        .map(format_size)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
