use std::collections::HashSet;

use tracing::{debug, warn};

use super::{
    ChannelFinding, ChannelOutcome, ContentState, ItemCounts, OrphanFolder, Reconciliation,
    SizeReading,
};
use crate::model::{Channel, DriveListing, MembershipType, StorageItem};
use crate::source::TenantDirectory;

type Classified = (ChannelFinding, SizeReading, Option<ItemCounts>);

/// Pairs declared channels with library folders for one workspace at a time
pub struct StorageReconciler<'a> {
    directory: &'a dyn TenantDirectory,
    general_channel_name: &'a str,
}

impl<'a> StorageReconciler<'a> {
    pub fn new(directory: &'a dyn TenantDirectory, general_channel_name: &'a str) -> Self {
        Self {
            directory,
            general_channel_name,
        }
    }

    /// Classify every declared channel, then derive orphans from the names
    /// that were processed.
    pub fn reconcile(
        &self,
        workspace_id: &str,
        channels: &[Channel],
        drive: &DriveListing,
    ) -> Reconciliation {
        let mut processed = HashSet::new();
        let mut outcomes = Vec::with_capacity(channels.len());

        for channel in channels {
            processed.insert(name_key(&channel.display_name));
            let outcome = self.classify(workspace_id, channel, drive);
            debug!(
                channel = %channel.display_name,
                membership = %channel.membership_type,
                state = %outcome.state(),
                "channel_classified"
            );
            outcomes.push(outcome);
        }

        Reconciliation {
            channels: outcomes,
            orphans: find_orphans(drive, &processed),
        }
    }

    fn classify(&self, workspace_id: &str, channel: &Channel, drive: &DriveListing) -> ChannelOutcome {
        let mut storage_url = None;
        let (finding, size, item_counts) = match channel.membership_type {
            MembershipType::Private => {
                let (classified, url) = self.classify_private(workspace_id, channel);
                storage_url = url;
                classified
            }
            MembershipType::Standard | MembershipType::Shared => {
                match find_folder(drive, &channel.display_name) {
                    Some(folder) => self.classify_folder(workspace_id, folder),
                    None if self.is_general(channel) => classify_root_files(drive),
                    None => (ChannelFinding::FolderNotFound, SizeReading::Unavailable, None),
                }
            }
        };

        ChannelOutcome {
            channel_name: channel.display_name.clone(),
            finding,
            size,
            item_counts,
            storage_url,
        }
    }

    /// Private channels live on their own drive, so the drive's URL comes back too
    fn classify_private(
        &self,
        workspace_id: &str,
        channel: &Channel,
    ) -> (Classified, Option<String>) {
        match self.directory.private_channel_root(workspace_id, channel) {
            Ok(Some(root)) => (
                (
                    ChannelFinding::PrivateDrive {
                        child_count: root.child_count,
                    },
                    SizeReading::Bytes(root.size),
                    Some(ItemCounts {
                        enumerated: None,
                        reported: root.child_count,
                    }),
                ),
                root.web_url,
            ),
            Ok(None) => (
                (
                    ChannelFinding::PrivateDriveUnresolved,
                    SizeReading::Unavailable,
                    None,
                ),
                None,
            ),
            Err(e) => {
                warn!(channel = %channel.display_name, error = %e, "Private channel drive lookup failed");
                (
                    (
                        ChannelFinding::LookupError(e.to_string()),
                        SizeReading::Failed,
                        None,
                    ),
                    None,
                )
            }
        }
    }

    fn classify_folder(
        &self,
        workspace_id: &str,
        folder: &StorageItem,
    ) -> Classified {
        match self.directory.list_children(workspace_id, folder) {
            Ok(children) => (
                folder_finding(folder, &children),
                SizeReading::Bytes(folder.size),
                Some(ItemCounts {
                    enumerated: Some(children.len() as u64),
                    reported: folder.child_count,
                }),
            ),
            Err(e) => {
                warn!(folder = %folder.name, error = %e, "Channel folder enumeration failed");
                (
                    ChannelFinding::EnumerationFailed(e.to_string()),
                    SizeReading::Bytes(folder.size),
                    Some(ItemCounts {
                        enumerated: None,
                        reported: folder.child_count,
                    }),
                )
            }
        }
    }

    fn is_general(&self, channel: &Channel) -> bool {
        name_key(&channel.display_name) == name_key(self.general_channel_name)
    }
}

/// Classify an enumerated channel folder.
///
/// The size override is applied before the count-mismatch override, so a
/// mismatch always determines the final finding.
pub(super) fn folder_finding(folder: &StorageItem, children: &[StorageItem]) -> ChannelFinding {
    let files = children.iter().filter(|c| c.is_file()).count();
    let mut finding = if files > 0 {
        ChannelFinding::Files { count: files }
    } else if children
        .iter()
        .any(|c| c.is_folder() && c.child_count > 0)
    {
        ChannelFinding::FilesInSubfolders
    } else {
        ChannelFinding::Empty
    };

    if folder.size > 0 && finding.state() == ContentState::No {
        finding = ChannelFinding::HiddenItems;
    }

    let enumerated = children.len() as u64;
    if enumerated != folder.child_count {
        finding = ChannelFinding::CountMismatch {
            enumerated,
            reported: folder.child_count,
        };
    }

    finding
}

fn classify_root_files(drive: &DriveListing) -> Classified {
    let (count, bytes) = drive
        .root_files()
        .fold((0usize, 0u64), |(count, bytes), f| (count + 1, bytes + f.size));
    if count == 0 {
        (ChannelFinding::NoRootFiles, SizeReading::Bytes(0), None)
    } else {
        (
            ChannelFinding::RootFiles { count },
            SizeReading::Bytes(bytes),
            None,
        )
    }
}

fn find_folder<'d>(drive: &'d DriveListing, channel_name: &str) -> Option<&'d StorageItem> {
    let key = name_key(channel_name);
    drive.folders().find(|f| name_key(&f.name) == key)
}

/// Top-level folders whose names no processed channel claimed
pub(super) fn find_orphans(drive: &DriveListing, processed: &HashSet<String>) -> Vec<OrphanFolder> {
    drive
        .folders()
        .filter(|f| !processed.contains(&name_key(&f.name)))
        .map(|f| OrphanFolder {
            name: f.name.clone(),
            size: f.size,
            child_count: f.child_count,
        })
        .collect()
}

/// Library names are case-insensitive on the platform
fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}
