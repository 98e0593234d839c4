//! Platform data sources consumed by the audit engine
//!
//! Authentication, paging and transport live behind these traits. The engine
//! only sees fully materialized listings and typed lookup failures.

pub mod snapshot;

use crate::activity::ActivityRecord;
use crate::error::Result;
use crate::model::{
    Channel, DriveListing, DriveRoot, IdentityDepartment, RosterEntry, StorageItem,
    WorkspaceEntry,
};

pub use snapshot::{ActivityReportFile, SnapshotSource};

/// Workspace directory, rosters, channels and document libraries
pub trait TenantDirectory: Send + Sync {
    /// List every workspace in the tenant. Failure here aborts the run.
    fn list_workspaces(&self) -> Result<Vec<WorkspaceEntry>>;

    fn owners(&self, workspace_id: &str) -> Result<Vec<RosterEntry>>;

    fn members(&self, workspace_id: &str) -> Result<Vec<RosterEntry>>;

    fn channels(&self, workspace_id: &str) -> Result<Vec<Channel>>;

    /// Top-level listing of the workspace's default library
    fn drive(&self, workspace_id: &str) -> Result<DriveListing>;

    /// Enumerate the direct children of a top-level folder
    fn list_children(&self, workspace_id: &str, folder: &StorageItem)
        -> Result<Vec<StorageItem>>;

    /// Resolve the dedicated drive root of a private channel.
    ///
    /// `Ok(None)` means the platform answered but has no root for the channel.
    fn private_channel_root(
        &self,
        workspace_id: &str,
        channel: &Channel,
    ) -> Result<Option<DriveRoot>>;
}

/// Batched identity lookups
pub trait IdentityDirectory: Send + Sync {
    /// Look up departments for at most
    /// [`IDENTITY_LOOKUP_BATCH_LIMIT`](crate::batch::IDENTITY_LOOKUP_BATCH_LIMIT) ids.
    fn departments(&self, ids: &[String]) -> Result<Vec<IdentityDepartment>>;
}

/// Tenant-wide activity report covering the reporting window
pub trait ActivityReport {
    fn records(&self) -> Result<Box<dyn Iterator<Item = ActivityRecord> + '_>>;
}
