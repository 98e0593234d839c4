//! Directory and storage records consumed by the audit engine

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::activity::LastActivity;

/// A workspace as returned by the directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceEntry {
    pub id: String,
    pub display_name: String,
}

/// Facts gathered about one workspace while it is audited.
///
/// Fields fill in as lookups succeed; a failed audit keeps whatever was known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub id: String,
    pub display_name: String,
    pub owner_count: usize,
    pub member_count: usize,
    pub last_activity: LastActivity,
    /// Bytes used by the default library, once known
    pub total_size: Option<u64>,
    pub storage_url: Option<String>,
}

impl Workspace {
    pub fn new(entry: &WorkspaceEntry, last_activity: LastActivity) -> Self {
        Self {
            id: entry.id.clone(),
            display_name: entry.display_name.clone(),
            owner_count: 0,
            member_count: 0,
            last_activity,
            total_size: None,
            storage_url: None,
        }
    }
}

/// One owner or member record from a workspace roster
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    #[serde(default)]
    pub display_name: Option<String>,
    /// Directory object id, used for department lookups
    #[serde(default)]
    pub identity_id: Option<String>,
}

impl RosterEntry {
    pub fn new(display_name: impl Into<String>, identity_id: Option<&str>) -> Self {
        Self {
            display_name: Some(display_name.into()),
            identity_id: identity_id.map(str::to_string),
        }
    }

    /// Display name, if present and not blank
    pub fn name(&self) -> Option<&str> {
        self.display_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}

/// Channel membership type as declared by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipType {
    #[default]
    Standard,
    Shared,
    /// Backed by its own drive rather than a folder in the workspace library
    Private,
}

impl fmt::Display for MembershipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MembershipType::Standard => write!(f, "standard"),
            MembershipType::Shared => write!(f, "shared"),
            MembershipType::Private => write!(f, "private"),
        }
    }
}

/// A channel declared on a workspace.
///
/// Channels are always handled in the scope of the workspace they were listed
/// for, so no back-reference is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub membership_type: MembershipType,
}

impl Channel {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        membership_type: MembershipType,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            membership_type,
        }
    }
}

/// Folder/file discriminator for library items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    File,
    Folder,
}

/// An item in a workspace's document library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageItem {
    pub id: String,
    pub name: String,
    pub kind: ItemKind,
    /// Size in bytes as reported by the platform
    pub size: u64,
    /// Child count as reported by the platform (0 for files)
    pub child_count: u64,
}

impl StorageItem {
    pub fn folder(name: impl Into<String>, size: u64, child_count: u64) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            kind: ItemKind::Folder,
            size,
            child_count,
        }
    }

    pub fn file(name: impl Into<String>, size: u64) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            kind: ItemKind::File,
            size,
            child_count: 0,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == ItemKind::File
    }

    pub fn is_folder(&self) -> bool {
        self.kind == ItemKind::Folder
    }
}

/// The default document library of a workspace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveListing {
    #[serde(default)]
    pub web_url: Option<String>,
    /// Total bytes used by the library
    #[serde(default)]
    pub total_size: u64,
    /// Top-level items only
    #[serde(default)]
    pub items: Vec<StorageItem>,
}

impl DriveListing {
    pub fn folders(&self) -> impl Iterator<Item = &StorageItem> {
        self.items.iter().filter(|i| i.is_folder())
    }

    pub fn root_files(&self) -> impl Iterator<Item = &StorageItem> {
        self.items.iter().filter(|i| i.is_file())
    }
}

/// Root of a private channel's dedicated drive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveRoot {
    pub size: u64,
    pub child_count: u64,
    #[serde(default)]
    pub web_url: Option<String>,
}

/// Department reported for one identity id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityDepartment {
    pub id: String,
    #[serde(default)]
    pub department: Option<String>,
}
