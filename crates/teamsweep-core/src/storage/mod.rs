//! Channel content classification against the workspace document library
//!
//! Declared channels and library folders come from independent listings. The
//! reconciler pairs them by name, classifies each channel's content and reports
//! library folders no channel claims.

mod reconcile;


use std::fmt;

use serde::{Serialize, Serializer};

use crate::size::format_size;

pub use reconcile::StorageReconciler;

/// Whether a channel's storage holds meaningful content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentState {
    Yes,
    No,
    NeedsManualReview,
    Error,
}

impl fmt::Display for ContentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentState::Yes => write!(f, "Yes"),
            ContentState::No => write!(f, "No"),
            ContentState::NeedsManualReview => write!(f, "Needs Manual Review"),
            ContentState::Error => write!(f, "Error"),
        }
    }
}

impl Serialize for ContentState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Why a channel received its content state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelFinding {
    /// Channel folder holds files directly
    Files { count: usize },
    /// No direct files, but a sub-folder reports children
    FilesInSubfolders,
    Empty,
    /// Folder reports a size but nothing visible was found
    HiddenItems,
    CountMismatch { enumerated: u64, reported: u64 },
    /// General channel without a folder; files at the library root
    RootFiles { count: usize },
    /// General channel without a folder and nothing at the library root
    NoRootFiles,
    FolderNotFound,
    /// Folder located but its children could not be enumerated
    EnumerationFailed(String),
    PrivateDrive { child_count: u64 },
    PrivateDriveUnresolved,
    LookupError(String),
    Orphaned,
}

impl ChannelFinding {
    pub fn state(&self) -> ContentState {
        match self {
            ChannelFinding::Files { .. }
            | ChannelFinding::FilesInSubfolders
            | ChannelFinding::RootFiles { .. } => ContentState::Yes,
            ChannelFinding::PrivateDrive { child_count } if *child_count > 0 => ContentState::Yes,
            ChannelFinding::Empty
            | ChannelFinding::NoRootFiles
            | ChannelFinding::FolderNotFound
            | ChannelFinding::PrivateDrive { .. } => ContentState::No,
            ChannelFinding::HiddenItems
            | ChannelFinding::CountMismatch { .. }
            | ChannelFinding::EnumerationFailed(_)
            | ChannelFinding::PrivateDriveUnresolved
            | ChannelFinding::Orphaned => ContentState::NeedsManualReview,
            ChannelFinding::LookupError(_) => ContentState::Error,
        }
    }
}

impl fmt::Display for ChannelFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelFinding::Files { count } => write!(f, "Contains {} file(s)", count),
            ChannelFinding::FilesInSubfolders => write!(f, "Files in sub-folders"),
            ChannelFinding::Empty => write!(f, "Channel folder is empty"),
            ChannelFinding::HiddenItems => write!(
                f,
                "Folder reports a size but no visible items (metadata or hidden items)"
            ),
            ChannelFinding::CountMismatch {
                enumerated,
                reported,
            } => write!(
                f,
                "Item count mismatch: enumerated {}, reported {}",
                enumerated, reported
            ),
            ChannelFinding::RootFiles { count } => {
                write!(f, "{} file(s) at library root attributed to channel", count)
            }
            ChannelFinding::NoRootFiles => {
                write!(f, "Channel folder not found; no files at library root")
            }
            ChannelFinding::FolderNotFound => write!(f, "Channel folder not found"),
            ChannelFinding::EnumerationFailed(reason) => {
                write!(f, "Could not enumerate channel folder: {}", reason)
            }
            ChannelFinding::PrivateDrive { child_count } => {
                write!(f, "Private channel drive with {} item(s)", child_count)
            }
            ChannelFinding::PrivateDriveUnresolved => {
                write!(f, "Private channel drive could not be resolved")
            }
            ChannelFinding::LookupError(reason) => write!(f, "Lookup failed: {}", reason),
            ChannelFinding::Orphaned => write!(f, "Orphaned Folder"),
        }
    }
}

/// Size cell for a channel row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeReading {
    Bytes(u64),
    Unavailable,
    Failed,
}

impl fmt::Display for SizeReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeReading::Bytes(bytes) => write!(f, "{}", format_size(*bytes)),
            SizeReading::Unavailable => write!(f, "N/A"),
            SizeReading::Failed => write!(f, "Error"),
        }
    }
}

/// Enumerated vs. platform-reported child counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemCounts {
    /// `None` when the children were not enumerated
    pub enumerated: Option<u64>,
    pub reported: u64,
}

impl fmt::Display for ItemCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.enumerated {
            Some(enumerated) => write!(f, "{} enumerated / {} reported", enumerated, self.reported),
            None => write!(f, "{} reported", self.reported),
        }
    }
}

/// Classification of one declared channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelOutcome {
    pub channel_name: String,
    pub finding: ChannelFinding,
    pub size: SizeReading,
    pub item_counts: Option<ItemCounts>,
    /// Set when the channel has its own drive
    pub storage_url: Option<String>,
}

impl ChannelOutcome {
    pub fn state(&self) -> ContentState {
        self.finding.state()
    }
}

/// Library folder with no declared channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrphanFolder {
    pub name: String,
    pub size: u64,
    pub child_count: u64,
}

impl OrphanFolder {
    /// Row label for the orphan
    pub fn label(&self) -> String {
        format!("{} (Orphaned)", self.name)
    }
}

/// Reconciliation result for one workspace
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// One outcome per declared channel, in declaration order
    pub channels: Vec<ChannelOutcome>,
    /// In library listing order
    pub orphans: Vec<OrphanFolder>,
}

impl Reconciliation {
    /// True when any channel is not plainly empty or any orphan exists
    pub fn has_any_data(&self) -> bool {
        !self.orphans.is_empty() || self.channels.iter().any(|c| c.state() != ContentState::No)
    }
}
