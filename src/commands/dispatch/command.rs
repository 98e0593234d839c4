//! Command trait and context for dispatching commands

use std::path::PathBuf;
use std::time::Instant;

use crate::cli::Cli;
use teamsweep_core::config::AuditConfig;
use teamsweep_core::error::Result;

/// Flag values that take precedence over the config file
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigOverrides {
    pub inactivity_days: Option<u32>,
    pub workers: Option<usize>,
}

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, start: Instant) -> Self {
        Self { cli, start }
    }

    /// Config file that will be read, if any
    pub fn config_path(&self) -> Result<Option<PathBuf>> {
        AuditConfig::resolve_path(self.cli.config.as_deref())
    }

    /// Load the config file, apply flag overrides and validate the result
    pub fn load_config(&self, overrides: ConfigOverrides) -> Result<AuditConfig> {
        let mut config = AuditConfig::discover(self.cli.config.as_deref())?;
        if let Some(days) = overrides.inactivity_days {
            config.inactivity_days = days;
        }
        if let Some(workers) = overrides.workers {
            config.workers = workers;
        }
        config.validate()?;
        tracing::debug!(elapsed = ?self.start.elapsed(), "load_config");
        Ok(config)
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("teamsweep {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Retention audit for collaboration workspaces.");
        println!();
        println!("Run `teamsweep --help` for usage information.");
        Ok(())
    }
}
