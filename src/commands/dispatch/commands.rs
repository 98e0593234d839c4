//! Command implementations for all teamsweep commands

use crate::cli::{AuditArgs, Commands};
use crate::commands::dispatch::command::{Command, CommandContext, ConfigOverrides};
use crate::commands::{audit, config};
use teamsweep_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Audit(args) => execute_audit(ctx, args),
            Commands::Config => execute_config(ctx),
        }
    }
}

fn execute_audit(ctx: &CommandContext, args: &AuditArgs) -> Result<()> {
    let config = ctx.load_config(ConfigOverrides {
        inactivity_days: args.inactive_days,
        workers: args.workers,
    })?;
    audit::execute(ctx.cli, &config, args, ctx.start)
}

fn execute_config(ctx: &CommandContext) -> Result<()> {
    let config = ctx.load_config(ConfigOverrides::default())?;
    let path = ctx.config_path()?;
    config::execute(ctx.cli, &config, path.as_deref())
}
