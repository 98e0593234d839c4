//! Safe-to-delete verdicts for workspaces

use std::fmt;

use serde::{Serialize, Serializer};

/// Binary retention recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SafeToDelete {
    Yes,
    No,
}

impl fmt::Display for SafeToDelete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SafeToDelete::Yes => write!(f, "Yes"),
            SafeToDelete::No => write!(f, "No"),
        }
    }
}

impl Serialize for SafeToDelete {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Signals the verdict is computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionInputs {
    pub is_empty_of_people: bool,
    pub is_inactive: bool,
    pub has_any_data: bool,
}

/// Human-readable reason attached to a verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rationale {
    NoMembersOrOwners,
    InactiveAndNoFiles,
    RecentActivity,
    ContainsFiles,
    /// Workspace could not be audited; carries the error text
    AuditFailed(String),
}

impl fmt::Display for Rationale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rationale::NoMembersOrOwners => write!(f, "No members or owners"),
            Rationale::InactiveAndNoFiles => write!(f, "Inactive and no files"),
            Rationale::RecentActivity => write!(f, "Has recent activity"),
            Rationale::ContainsFiles => write!(f, "Contains files or needs review"),
            Rationale::AuditFailed(reason) => write!(f, "{}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub safe_to_delete: SafeToDelete,
    pub rationale: Rationale,
}

impl Decision {
    /// Verdict for a workspace whose audit failed
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            safe_to_delete: SafeToDelete::No,
            rationale: Rationale::AuditFailed(reason.into()),
        }
    }
}

/// Decide whether a workspace is safe to delete.
///
/// Rules, first match wins: no people at all; inactive with no data;
/// otherwise keep, explaining activity before content.
pub fn decide(inputs: DecisionInputs) -> Decision {
    let (safe_to_delete, rationale) = match (
        inputs.is_empty_of_people,
        inputs.is_inactive,
        inputs.has_any_data,
    ) {
        (true, _, _) => (SafeToDelete::Yes, Rationale::NoMembersOrOwners),
        (false, true, false) => (SafeToDelete::Yes, Rationale::InactiveAndNoFiles),
        (false, false, _) => (SafeToDelete::No, Rationale::RecentActivity),
        (false, true, true) => (SafeToDelete::No, Rationale::ContainsFiles),
    };
    Decision {
        safe_to_delete,
        rationale,
    }
}
