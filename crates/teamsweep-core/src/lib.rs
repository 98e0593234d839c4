//! Teamsweep Core Library
//!
//! Reconciliation and retention decision engine for collaboration workspace
//! audits: activity lookup, roster formatting, channel/library reconciliation
//! and the safe-to-delete verdict.

pub mod activity;
pub mod audit;
pub mod batch;
pub mod config;
pub mod decision;
pub mod error;
pub mod format;
pub mod logging;
pub mod membership;
pub mod model;
pub mod records;
pub mod report;
pub mod size;
pub mod source;
pub mod storage;
