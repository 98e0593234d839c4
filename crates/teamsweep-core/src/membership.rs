//! Owner, member and department resolution for a workspace

use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::batch::{batched, IDENTITY_LOOKUP_BATCH_LIMIT};
use crate::model::RosterEntry;
use crate::source::IdentityDirectory;

/// Separator used for every multi-value report cell
pub const LIST_SEPARATOR: &str = "; ";

/// Marker placed in the department cell when any lookup batch fails
pub const DEPARTMENT_ERROR_MARKER: &str = "Error retrieving";

static GUID_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn guid_regex() -> Option<&'static Regex> {
    GUID_RE
        .get_or_init(|| {
            match Regex::new(
                r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
            ) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!(error = %e, "Failed to compile identity id regex");
                    None
                }
            }
        })
        .as_ref()
}

/// Whether `id` is shaped like a directory object id
pub fn is_identity_id(id: &str) -> bool {
    guid_regex().is_some_and(|re| re.is_match(id))
}

/// Department resolution outcome for a workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Departments {
    Resolved(Vec<String>),
    LookupFailed,
}

impl fmt::Display for Departments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Departments::Resolved(names) => write!(f, "{}", names.join(LIST_SEPARATOR)),
            Departments::LookupFailed => write!(f, "{}", DEPARTMENT_ERROR_MARKER),
        }
    }
}

impl Serialize for Departments {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Display-ready roster data for one workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MembershipSummary {
    pub owner_names: String,
    pub member_names: String,
    pub departments: Departments,
    pub owner_count: usize,
    pub member_count: usize,
}

impl MembershipSummary {
    pub fn is_empty_of_people(&self) -> bool {
        self.owner_count == 0 && self.member_count == 0
    }
}

/// Formats rosters and resolves departments through batched identity lookups
pub struct MembershipResolver<'a> {
    identity: &'a dyn IdentityDirectory,
    batch_size: usize,
    abbreviation_threshold: usize,
}

impl<'a> MembershipResolver<'a> {
    pub fn new(
        identity: &'a dyn IdentityDirectory,
        batch_size: usize,
        abbreviation_threshold: usize,
    ) -> Self {
        Self {
            identity,
            batch_size: batch_size.clamp(1, IDENTITY_LOOKUP_BATCH_LIMIT),
            abbreviation_threshold,
        }
    }

    pub fn resolve(&self, owners: &[RosterEntry], members: &[RosterEntry]) -> MembershipSummary {
        MembershipSummary {
            owner_names: owner_names(owners),
            member_names: member_names(members, self.abbreviation_threshold),
            departments: self.departments(members),
            owner_count: owners.len(),
            member_count: members.len(),
        }
    }

    /// Union of member departments in first-seen order.
    ///
    /// A single failed batch degrades the whole field.
    pub fn departments(&self, members: &[RosterEntry]) -> Departments {
        let mut seen_ids = HashSet::new();
        let ids: Vec<String> = members
            .iter()
            .filter_map(|m| m.identity_id.as_deref())
            .map(str::trim)
            .filter(|id| is_identity_id(id))
            .filter(|id| seen_ids.insert(id.to_lowercase()))
            .map(str::to_string)
            .collect();

        let mut seen = HashSet::new();
        let mut departments = Vec::new();
        for batch in batched(ids, self.batch_size) {
            let found = match self.identity.departments(&batch) {
                Ok(found) => found,
                Err(e) => {
                    warn!(error = %e, batch_len = batch.len(), "Department lookup failed");
                    return Departments::LookupFailed;
                }
            };
            debug!(requested = batch.len(), returned = found.len(), "department_batch");
            for department in found.into_iter().filter_map(|d| d.department) {
                let department = department.trim().to_string();
                if !department.is_empty() && seen.insert(department.clone()) {
                    departments.push(department);
                }
            }
        }
        Departments::Resolved(departments)
    }
}

/// Owner display names joined with `; `
pub fn owner_names(owners: &[RosterEntry]) -> String {
    owners
        .iter()
        .filter_map(RosterEntry::name)
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

/// Member display names, abbreviated once the roster exceeds `threshold`
pub fn member_names(members: &[RosterEntry], threshold: usize) -> String {
    let abbreviate = members.len() > threshold;
    members
        .iter()
        .filter_map(RosterEntry::name)
        .map(|name| {
            if abbreviate {
                abbreviate_name(name)
            } else {
                name.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

/// First four characters of the first token plus the initial of the last token.
///
/// Single-token names keep only the first four characters.
pub fn abbreviate_name(name: &str) -> String {
    let mut tokens = name.split_whitespace();
    let Some(first) = tokens.next() else {
        return String::new();
    };
    let mut short: String = first.chars().take(4).collect();
    if let Some(initial) = tokens.last().and_then(|last| last.chars().next()) {
        short.push(initial);
    }
    short
}
