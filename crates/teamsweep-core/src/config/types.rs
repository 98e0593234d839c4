//! Configuration type definitions

use serde::{Deserialize, Serialize};

use crate::batch::IDENTITY_LOOKUP_BATCH_LIMIT;

/// Default number of days without activity before a workspace counts as inactive
const DEFAULT_INACTIVITY_DAYS: u32 = 90;

/// Roster size above which member names are abbreviated
const DEFAULT_ABBREVIATION_THRESHOLD: usize = 5;

const DEFAULT_GENERAL_CHANNEL: &str = "General";

/// Audit configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Days since last activity before a workspace is inactive
    #[serde(default = "default_inactivity_days")]
    pub inactivity_days: u32,

    /// Ids per identity lookup request (at most 15)
    #[serde(default = "default_lookup_batch_size")]
    pub lookup_batch_size: usize,

    /// Member rosters larger than this are abbreviated
    #[serde(default = "default_abbreviation_threshold")]
    pub member_abbreviation_threshold: usize,

    /// Name of the default channel whose files may sit at the library root
    #[serde(default = "default_general_channel")]
    pub general_channel_name: String,

    /// Workspaces audited concurrently
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            inactivity_days: default_inactivity_days(),
            lookup_batch_size: default_lookup_batch_size(),
            member_abbreviation_threshold: default_abbreviation_threshold(),
            general_channel_name: default_general_channel(),
            workers: default_workers(),
        }
    }
}

fn default_inactivity_days() -> u32 {
    DEFAULT_INACTIVITY_DAYS
}

fn default_lookup_batch_size() -> usize {
    IDENTITY_LOOKUP_BATCH_LIMIT
}

fn default_abbreviation_threshold() -> usize {
    DEFAULT_ABBREVIATION_THRESHOLD
}

fn default_general_channel() -> String {
    DEFAULT_GENERAL_CHANNEL.to_string()
}

fn default_workers() -> usize {
    1
}
