//! Offline tenant inventory loaded from JSON
//!
//! Any lookup can be recorded as failed by replacing its value with
//! `{"lookup_error": "<reason>"}`. Folders and private channels carry an
//! optional `lookup_error` of their own for enumeration and root lookups.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use super::{ActivityReport, IdentityDirectory, TenantDirectory};
use crate::activity::ActivityRecord;
use crate::batch::IDENTITY_LOOKUP_BATCH_LIMIT;
use crate::error::{AuditError, Result};
use crate::model::{
    Channel, DriveListing, DriveRoot, IdentityDepartment, ItemKind, MembershipType, RosterEntry,
    StorageItem, WorkspaceEntry,
};

/// A recorded lookup result: either the value or the error it produced
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Lookup<T> {
    Failed { lookup_error: String },
    Found(T),
}

impl<T: Default> Default for Lookup<T> {
    fn default() -> Self {
        Lookup::Found(T::default())
    }
}

impl<T> Lookup<T> {
    fn get(&self, operation: &str, target: &str) -> Result<&T> {
        match self {
            Lookup::Found(value) => Ok(value),
            Lookup::Failed { lookup_error } => {
                Err(AuditError::lookup(operation, target, lookup_error))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct Inventory {
    /// Set when the workspace listing itself failed
    #[serde(default)]
    lookup_error: Option<String>,
    #[serde(default)]
    workspaces: Vec<SnapshotWorkspace>,
    #[serde(default)]
    identities: Lookup<Vec<IdentityDepartment>>,
    #[serde(default)]
    activity_report: Option<Lookup<Vec<ActivityRecord>>>,
}

#[derive(Debug, Deserialize)]
struct SnapshotWorkspace {
    id: String,
    display_name: String,
    #[serde(default)]
    owners: Lookup<Vec<RosterEntry>>,
    #[serde(default)]
    members: Lookup<Vec<RosterEntry>>,
    #[serde(default)]
    channels: Lookup<Vec<SnapshotChannel>>,
    #[serde(default)]
    drive: Lookup<SnapshotDrive>,
}

#[derive(Debug, Deserialize)]
struct SnapshotChannel {
    #[serde(default)]
    id: Option<String>,
    display_name: String,
    #[serde(default)]
    membership_type: MembershipType,
    /// Dedicated drive root of a private channel
    #[serde(default)]
    drive_root: Option<DriveRoot>,
    #[serde(default)]
    lookup_error: Option<String>,
}

impl SnapshotChannel {
    fn id(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.display_name)
    }

    fn to_channel(&self) -> Channel {
        Channel::new(self.id(), self.display_name.clone(), self.membership_type)
    }
}

#[derive(Debug, Default, Deserialize)]
struct SnapshotDrive {
    #[serde(default)]
    web_url: Option<String>,
    /// Defaults to the sum of top-level item sizes
    #[serde(default)]
    total_size: Option<u64>,
    #[serde(default)]
    items: Vec<SnapshotItem>,
}

#[derive(Debug, Deserialize)]
struct SnapshotItem {
    #[serde(default)]
    id: Option<String>,
    name: String,
    /// Inferred from `children` when absent
    #[serde(default)]
    kind: Option<ItemKind>,
    #[serde(default)]
    size: u64,
    /// Reported child count; defaults to the number of listed children
    #[serde(default)]
    child_count: Option<u64>,
    #[serde(default)]
    children: Option<Vec<SnapshotItem>>,
    /// Enumeration failure for this folder's children
    #[serde(default)]
    lookup_error: Option<String>,
}

impl SnapshotItem {
    fn id(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }

    fn kind(&self) -> ItemKind {
        match (self.kind, &self.children) {
            (Some(kind), _) => kind,
            (None, Some(_)) => ItemKind::Folder,
            (None, None) => ItemKind::File,
        }
    }

    fn to_item(&self) -> StorageItem {
        let kind = self.kind();
        let listed = self.children.as_ref().map_or(0, Vec::len) as u64;
        StorageItem {
            id: self.id().to_string(),
            name: self.name.clone(),
            kind,
            size: self.size,
            child_count: match kind {
                ItemKind::File => 0,
                ItemKind::Folder => self.child_count.unwrap_or(listed),
            },
        }
    }
}

/// Tenant inventory read from a JSON snapshot; implements every source trait
#[derive(Debug)]
pub struct SnapshotSource {
    path: PathBuf,
    inventory: Inventory,
    index: HashMap<String, usize>,
}

impl SnapshotSource {
    /// Load and validate an inventory file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AuditError::InventoryNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)
            .map_err(|e| AuditError::io_operation("read inventory", path.display(), e))?;
        Self::from_json(path, &content)
    }

    /// Parse an inventory document; `path` is only used in error messages
    pub fn from_json(path: &Path, content: &str) -> Result<Self> {
        let invalid = |reason: String| AuditError::InvalidInventory {
            path: path.to_path_buf(),
            reason,
        };
        let inventory: Inventory =
            serde_json::from_str(content).map_err(|e| invalid(e.to_string()))?;

        let mut index = HashMap::with_capacity(inventory.workspaces.len());
        for (i, workspace) in inventory.workspaces.iter().enumerate() {
            if index.insert(workspace.id.clone(), i).is_some() {
                return Err(invalid(format!("duplicate workspace id {}", workspace.id)));
            }
        }
        debug!(
            path = %path.display(),
            workspaces = inventory.workspaces.len(),
            "inventory_loaded"
        );

        Ok(Self {
            path: path.to_path_buf(),
            inventory,
            index,
        })
    }

    fn workspace(&self, workspace_id: &str) -> Result<&SnapshotWorkspace> {
        self.index
            .get(workspace_id)
            .map(|&i| &self.inventory.workspaces[i])
            .ok_or_else(|| AuditError::not_found("workspace", workspace_id))
    }

    fn drive_items(&self, workspace_id: &str) -> Result<&[SnapshotItem]> {
        let workspace = self.workspace(workspace_id)?;
        Ok(&workspace.drive.get("drive lookup", &workspace.display_name)?.items)
    }
}

impl TenantDirectory for SnapshotSource {
    fn list_workspaces(&self) -> Result<Vec<WorkspaceEntry>> {
        if let Some(reason) = &self.inventory.lookup_error {
            return Err(AuditError::DirectoryUnavailable {
                reason: reason.clone(),
            });
        }
        Ok(self
            .inventory
            .workspaces
            .iter()
            .map(|w| WorkspaceEntry {
                id: w.id.clone(),
                display_name: w.display_name.clone(),
            })
            .collect())
    }

    fn owners(&self, workspace_id: &str) -> Result<Vec<RosterEntry>> {
        let workspace = self.workspace(workspace_id)?;
        workspace
            .owners
            .get("owner listing", &workspace.display_name)
            .cloned()
    }

    fn members(&self, workspace_id: &str) -> Result<Vec<RosterEntry>> {
        let workspace = self.workspace(workspace_id)?;
        workspace
            .members
            .get("member listing", &workspace.display_name)
            .cloned()
    }

    fn channels(&self, workspace_id: &str) -> Result<Vec<Channel>> {
        let workspace = self.workspace(workspace_id)?;
        let channels = workspace
            .channels
            .get("channel listing", &workspace.display_name)?;
        Ok(channels.iter().map(SnapshotChannel::to_channel).collect())
    }

    fn drive(&self, workspace_id: &str) -> Result<DriveListing> {
        let workspace = self.workspace(workspace_id)?;
        let drive = workspace.drive.get("drive lookup", &workspace.display_name)?;
        let items: Vec<StorageItem> = drive.items.iter().map(SnapshotItem::to_item).collect();
        Ok(DriveListing {
            web_url: drive.web_url.clone(),
            total_size: drive
                .total_size
                .unwrap_or_else(|| items.iter().map(|i| i.size).sum()),
            items,
        })
    }

    fn list_children(&self, workspace_id: &str, folder: &StorageItem) -> Result<Vec<StorageItem>> {
        let item = self
            .drive_items(workspace_id)?
            .iter()
            .find(|i| i.id() == folder.id)
            .ok_or_else(|| AuditError::not_found("folder", &folder.name))?;
        if let Some(reason) = &item.lookup_error {
            return Err(AuditError::lookup("folder enumeration", &folder.name, reason));
        }
        Ok(item
            .children
            .iter()
            .flatten()
            .map(SnapshotItem::to_item)
            .collect())
    }

    fn private_channel_root(
        &self,
        workspace_id: &str,
        channel: &Channel,
    ) -> Result<Option<DriveRoot>> {
        let workspace = self.workspace(workspace_id)?;
        let channels = workspace
            .channels
            .get("channel listing", &workspace.display_name)?;
        let snapshot = channels
            .iter()
            .find(|c| c.id() == channel.id)
            .ok_or_else(|| AuditError::not_found("channel", &channel.display_name))?;
        if let Some(reason) = &snapshot.lookup_error {
            return Err(AuditError::lookup(
                "private channel root lookup",
                &channel.display_name,
                reason,
            ));
        }
        Ok(snapshot.drive_root.clone())
    }
}

impl IdentityDirectory for SnapshotSource {
    fn departments(&self, ids: &[String]) -> Result<Vec<IdentityDepartment>> {
        if ids.len() > IDENTITY_LOOKUP_BATCH_LIMIT {
            return Err(AuditError::invalid_value(
                "identity batch size",
                format!("{} (limit {})", ids.len(), IDENTITY_LOOKUP_BATCH_LIMIT),
            ));
        }
        let identities = self
            .inventory
            .identities
            .get("identity lookup", format!("{} ids", ids.len()).as_str())?;
        Ok(identities
            .iter()
            .filter(|identity| ids.iter().any(|id| id.eq_ignore_ascii_case(&identity.id)))
            .cloned()
            .collect())
    }
}

impl ActivityReport for SnapshotSource {
    fn records(&self) -> Result<Box<dyn Iterator<Item = ActivityRecord> + '_>> {
        match &self.inventory.activity_report {
            None => Err(AuditError::not_found(
                "activity report in inventory",
                self.path.display(),
            )),
            Some(report) => {
                let records = report.get("activity report", "tenant")?;
                Ok(Box::new(records.iter().cloned()))
            }
        }
    }
}

/// Activity report kept in its own JSON file: an array of
/// `{"workspace_id", "last_activity_date"}` records.
///
/// The file is read when the records are requested, so a missing or malformed
/// file surfaces as a degraded activity index rather than a load failure.
#[derive(Debug, Clone)]
pub struct ActivityReportFile {
    path: PathBuf,
}

impl ActivityReportFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ActivityReport for ActivityReportFile {
    fn records(&self) -> Result<Box<dyn Iterator<Item = ActivityRecord> + '_>> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| AuditError::io_operation("read activity report", self.path.display(), e))?;
        let records: Vec<ActivityRecord> = serde_json::from_str(&content)?;
        Ok(Box::new(records.into_iter()))
    }
}
