//! CLI commands for teamsweep

pub mod audit;
pub mod config;
pub mod dispatch;
