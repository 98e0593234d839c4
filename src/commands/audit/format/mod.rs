//! Output formatting for the audit command

pub mod human;
pub mod json;
pub mod records;
