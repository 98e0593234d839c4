//! Audit run orchestration
//!
//! Lists the tenant's workspaces, audits each one inside its own error
//! boundary and assembles the report. A failed directory listing aborts the
//! run; anything that fails inside a workspace becomes that workspace's
//! failure rows and the run continues.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use chrono::NaiveDate;
use tracing::{debug, info, info_span, warn};

use crate::activity::{inactivity_cutoff, ActivityIndex, ACTIVITY_REPORT_WINDOW_DAYS};
use crate::config::AuditConfig;
use crate::decision::{decide, Decision, DecisionInputs};
use crate::error::{AuditError, Result};
use crate::membership::MembershipResolver;
use crate::model::{Workspace, WorkspaceEntry};
use crate::report::{AuditReport, ChannelAuditRow, WorkspaceAudit, WorkspaceSummaryRow};
use crate::source::{IdentityDirectory, TenantDirectory};
use crate::storage::StorageReconciler;
use crate::trace_time;

/// Runs one audit over a tenant
pub struct Auditor<'a> {
    tenant: &'a dyn TenantDirectory,
    identity: &'a dyn IdentityDirectory,
    activity: &'a ActivityIndex,
    config: &'a AuditConfig,
    today: NaiveDate,
    interrupted: Option<&'a AtomicBool>,
}

impl<'a> Auditor<'a> {
    pub fn new(
        tenant: &'a dyn TenantDirectory,
        identity: &'a dyn IdentityDirectory,
        activity: &'a ActivityIndex,
        config: &'a AuditConfig,
        today: NaiveDate,
    ) -> Self {
        Self {
            tenant,
            identity,
            activity,
            config,
            today,
            interrupted: None,
        }
    }

    /// Stop taking new workspaces once `flag` is set
    pub fn with_interrupt(mut self, flag: &'a AtomicBool) -> Self {
        self.interrupted = Some(flag);
        self
    }

    pub fn cutoff(&self) -> Result<NaiveDate> {
        inactivity_cutoff(self.today, self.config.inactivity_days)
    }

    pub fn run(&self) -> Result<AuditReport> {
        let start = Instant::now();
        let cutoff = self.cutoff()?;

        let entries = self.tenant.list_workspaces().map_err(|e| match e {
            AuditError::DirectoryUnavailable { .. } => e,
            other => AuditError::DirectoryUnavailable {
                reason: other.to_string(),
            },
        })?;
        info!(
            workspaces = entries.len(),
            cutoff = %cutoff,
            workers = self.config.workers,
            activity_report = self.activity.is_available(),
            "audit_started"
        );

        let audits = if self.config.workers > 1 {
            self.audit_parallel(&entries, cutoff)?
        } else {
            self.audit_sequential(&entries, cutoff)?
        };

        let report = self.assemble(cutoff, audits);
        info!(
            workspaces = report.summaries.len(),
            deletable = report.deletable_count(),
            failed = report.failed_workspaces,
            "audit_finished"
        );
        trace_time!(start, "audit_run", workspaces = entries.len());
        Ok(report)
    }

    fn audit_sequential(
        &self,
        entries: &[WorkspaceEntry],
        cutoff: NaiveDate,
    ) -> Result<Vec<WorkspaceAudit>> {
        let mut audits = Vec::with_capacity(entries.len());
        for entry in entries {
            self.check_interrupted(audits.len(), entries.len())?;
            audits.push(self.audit_workspace(entry, cutoff));
        }
        Ok(audits)
    }

    /// Audit up to `workers` workspaces at a time; results stay in listing order
    fn audit_parallel(
        &self,
        entries: &[WorkspaceEntry],
        cutoff: NaiveDate,
    ) -> Result<Vec<WorkspaceAudit>> {
        let mut audits = Vec::with_capacity(entries.len());
        for chunk in entries.chunks(self.config.workers) {
            self.check_interrupted(audits.len(), entries.len())?;
            let results: Vec<Option<WorkspaceAudit>> = std::thread::scope(|s| {
                let handles: Vec<_> = chunk
                    .iter()
                    .map(|entry| s.spawn(move || self.audit_workspace(entry, cutoff)))
                    .collect();
                handles.into_iter().map(|h| h.join().ok()).collect()
            });
            for (entry, result) in chunk.iter().zip(results) {
                audits.push(result.unwrap_or_else(|| self.panicked_audit(entry)));
            }
        }
        Ok(audits)
    }

    fn panicked_audit(&self, entry: &WorkspaceEntry) -> WorkspaceAudit {
        let error = AuditError::Other(format!(
            "audit thread panicked for workspace {}",
            entry.display_name
        ));
        warn!(id = %entry.id, error = %error, "Workspace audit failed");
        failed_audit(
            &Workspace::new(entry, self.activity.lookup(&entry.id)),
            &error,
        )
    }

    fn check_interrupted(&self, done: usize, total: usize) -> Result<()> {
        match self.interrupted {
            Some(flag) if flag.load(Ordering::SeqCst) => {
                info!(audited = done, total, "Audit interrupted");
                Err(AuditError::Interrupted)
            }
            _ => Ok(()),
        }
    }

    /// Audit one workspace; errors are converted into failure rows here
    pub fn audit_workspace(&self, entry: &WorkspaceEntry, cutoff: NaiveDate) -> WorkspaceAudit {
        let span = info_span!("workspace", id = %entry.id, name = %entry.display_name);
        let _guard = span.enter();
        let start = Instant::now();

        let mut workspace = Workspace::new(entry, self.activity.lookup(&entry.id));
        let audit = match self.try_audit(&mut workspace, cutoff) {
            Ok(audit) => audit,
            Err(e) => {
                warn!(error = %e, "Workspace audit failed");
                failed_audit(&workspace, &e)
            }
        };
        trace_time!(start, "workspace_audit", rows = audit.details.len());
        audit
    }

    fn try_audit(&self, workspace: &mut Workspace, cutoff: NaiveDate) -> Result<WorkspaceAudit> {
        let owners = self.tenant.owners(&workspace.id)?;
        workspace.owner_count = owners.len();
        let members = self.tenant.members(&workspace.id)?;
        workspace.member_count = members.len();

        let drive = self.tenant.drive(&workspace.id)?;
        workspace.total_size = Some(drive.total_size);
        workspace.storage_url = drive.web_url.clone();
        let channels = self.tenant.channels(&workspace.id)?;

        let membership = MembershipResolver::new(
            self.identity,
            self.config.lookup_batch_size,
            self.config.member_abbreviation_threshold,
        )
        .resolve(&owners, &members);

        let reconciliation =
            StorageReconciler::new(self.tenant, &self.config.general_channel_name)
                .reconcile(&workspace.id, &channels, &drive);
        let has_any_data = reconciliation.has_any_data();

        let decision = decide(DecisionInputs {
            is_empty_of_people: membership.is_empty_of_people(),
            is_inactive: workspace.last_activity.is_inactive(cutoff),
            has_any_data,
        });
        debug!(
            safe_to_delete = %decision.safe_to_delete,
            rationale = %decision.rationale,
            channels = channels.len(),
            orphans = reconciliation.orphans.len(),
            "workspace_decided"
        );

        let workspace = &*workspace;
        let mut details: Vec<ChannelAuditRow> = reconciliation
            .channels
            .iter()
            .map(|outcome| ChannelAuditRow::from_outcome(workspace, outcome))
            .collect();
        details.extend(
            reconciliation
                .orphans
                .iter()
                .map(|orphan| ChannelAuditRow::orphan(workspace, orphan)),
        );

        Ok(WorkspaceAudit {
            summary: WorkspaceSummaryRow::new(workspace, &membership, has_any_data, &decision),
            details,
            failed: false,
        })
    }

    fn assemble(&self, cutoff: NaiveDate, audits: Vec<WorkspaceAudit>) -> AuditReport {
        let failed_workspaces = audits.iter().filter(|a| a.failed).count();
        let mut summaries = Vec::with_capacity(audits.len());
        let mut details = Vec::new();
        for audit in audits {
            summaries.push(audit.summary);
            details.extend(audit.details);
        }
        AuditReport {
            generated_on: self.today,
            cutoff,
            inactivity_days: self.config.inactivity_days,
            report_window_days: ACTIVITY_REPORT_WINDOW_DAYS,
            activity_report_available: self.activity.is_available(),
            failed_workspaces,
            summaries,
            details,
        }
    }
}

fn failed_audit(workspace: &Workspace, error: &AuditError) -> WorkspaceAudit {
    let reason = error.to_string();
    WorkspaceAudit {
        summary: WorkspaceSummaryRow::failure(workspace, &Decision::failed(reason.as_str())),
        details: vec![ChannelAuditRow::failure(workspace, &reason)],
        failed: true,
    }
}
