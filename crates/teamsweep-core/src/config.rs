//! Audit configuration for teamsweep
//!
//! Read from `config.toml` in `$TEAMSWEEP_CONFIG_DIR` or the platform config
//! directory unless an explicit path is given. A missing file means defaults.

pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::activity::ACTIVITY_REPORT_WINDOW_DAYS;
use crate::batch::IDENTITY_LOOKUP_BATCH_LIMIT;
use crate::bail_invalid;
use crate::error::{AuditError, Result};

pub use types::AuditConfig;

/// Longest inactivity threshold accepted, roughly one hundred years
pub const MAX_INACTIVITY_DAYS: u32 = 36_500;

const CONFIG_DIR: &str = "teamsweep";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_DIR_ENV_VAR: &str = "TEAMSWEEP_CONFIG_DIR";

impl AuditConfig {
    /// Default location of the config file
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if let Ok(env_dir) = std::env::var(CONFIG_DIR_ENV_VAR) {
            PathBuf::from(env_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| {
                    AuditError::Other("unable to determine config directory".to_string())
                })?
                .join(CONFIG_DIR)
        };

        Ok(config_dir.join(CONFIG_FILE))
    }

    /// Load an explicit config file; it must exist
    pub fn load(path: &Path) -> Result<Self> {
        let invalid = |reason: String| AuditError::InvalidConfig {
            path: path.to_path_buf(),
            reason,
        };
        let content = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let config: AuditConfig = toml::from_str(&content).map_err(|e| invalid(e.to_string()))?;
        debug!(path = %path.display(), "config_loaded");
        Ok(config)
    }

    /// The file `discover` reads: `explicit` if given, else the default
    /// location when it exists
    pub fn resolve_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            return Ok(Some(path.to_path_buf()));
        }
        let default = Self::default_path()?;
        Ok(default.exists().then_some(default))
    }

    /// Load from `path` if given, else from the default location if present
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match Self::resolve_path(path)? {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Render as the TOML accepted by `load`
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| AuditError::Other(format!("failed to serialize config: {}", e)))
    }

    /// Reject values the engine cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.inactivity_days == 0 {
            bail_invalid!("inactivity_days", "0 (must be at least 1)");
        }
        if self.inactivity_days > MAX_INACTIVITY_DAYS {
            bail_invalid!(
                "inactivity_days",
                format!(
                    "{} (must be at most {})",
                    self.inactivity_days, MAX_INACTIVITY_DAYS
                )
            );
        }
        if self.lookup_batch_size == 0 || self.lookup_batch_size > IDENTITY_LOOKUP_BATCH_LIMIT {
            bail_invalid!(
                "lookup_batch_size",
                format!(
                    "{} (must be between 1 and {})",
                    self.lookup_batch_size, IDENTITY_LOOKUP_BATCH_LIMIT
                )
            );
        }
        if self.workers == 0 {
            bail_invalid!("workers", "0 (must be at least 1)");
        }
        if self.general_channel_name.trim().is_empty() {
            bail_invalid!("general_channel_name", "empty");
        }
        if self.inactivity_days > ACTIVITY_REPORT_WINDOW_DAYS {
            warn!(
                inactivity_days = self.inactivity_days,
                window_days = ACTIVITY_REPORT_WINDOW_DAYS,
                "Inactivity threshold exceeds the activity report window; older activity is not visible"
            );
        }
        Ok(())
    }
}
