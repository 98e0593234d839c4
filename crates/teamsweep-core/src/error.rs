//! Error types and exit codes for teamsweep
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (including interrupted runs)
//! - 2: Usage error (bad flags/args, invalid configuration values)
//! - 3: Data error (missing or malformed inventory or config, directory listing unavailable)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the teamsweep binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - unreadable inventory, failed directory listing (3)
    Data = 3,
}

/// Errors that can occur during an audit run
#[derive(Error, Debug)]
pub enum AuditError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human, json, or records)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("inventory not found: {path:?}")]
    InventoryNotFound { path: PathBuf },

    #[error("invalid inventory {path:?}: {reason}")]
    InvalidInventory { path: PathBuf, reason: String },

    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    #[error("invalid config {path:?}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("failed to list workspaces: {reason}")]
    DirectoryUnavailable { reason: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{operation} failed for {target}: {reason}")]
    LookupFailed {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("failed to {operation}: {reason}")]
    FailedOperation { operation: String, reason: String },

    #[error("{0}")]
    Other(String),

    #[error("Audit interrupted before all workspaces were processed.")]
    Interrupted,
}

impl AuditError {
    /// Create an error for a failed platform lookup against a specific target
    pub fn lookup(
        operation: &str,
        target: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        AuditError::LookupFailed {
            operation: operation.to_string(),
            target: target.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        AuditError::FailedOperation {
            operation: format!("{} {}", operation, path),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        AuditError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        AuditError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AuditError::UnknownFormat(_)
            | AuditError::UsageError(_)
            | AuditError::InvalidValue { .. } => ExitCode::Usage,

            AuditError::InventoryNotFound { .. }
            | AuditError::InvalidInventory { .. }
            | AuditError::NotFound { .. }
            | AuditError::InvalidConfig { .. }
            | AuditError::DirectoryUnavailable { .. } => ExitCode::Data,

            AuditError::Io(_)
            | AuditError::Json(_)
            | AuditError::LookupFailed { .. }
            | AuditError::FailedOperation { .. }
            | AuditError::Other(_)
            | AuditError::Interrupted => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            AuditError::UnknownFormat(_) => "unknown_format",
            AuditError::UsageError(_) => "usage_error",
            AuditError::InvalidValue { .. } => "invalid_value",
            AuditError::InventoryNotFound { .. } => "inventory_not_found",
            AuditError::InvalidInventory { .. } => "invalid_inventory",
            AuditError::NotFound { .. } => "not_found",
            AuditError::InvalidConfig { .. } => "invalid_config",
            AuditError::DirectoryUnavailable { .. } => "directory_unavailable",
            AuditError::Io(_) => "io_error",
            AuditError::Json(_) => "json_error",
            AuditError::LookupFailed { .. } => "lookup_failed",
            AuditError::FailedOperation { .. } => "failed_operation",
            AuditError::Other(_) => "other",
            AuditError::Interrupted => "interrupted",
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for teamsweep operations
pub type Result<T> = std::result::Result<T, AuditError>;
