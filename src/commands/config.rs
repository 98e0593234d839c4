//! `teamsweep config` command - show the effective configuration

use std::path::Path;

use crate::cli::Cli;
use crate::output_by_format_result;
use teamsweep_core::config::AuditConfig;
use teamsweep_core::error::Result;
use teamsweep_core::records::escape_quotes;

/// Execute the config command
pub fn execute(cli: &Cli, config: &AuditConfig, path: Option<&Path>) -> Result<()> {
    let source = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());

    output_by_format_result!(cli.format,
        json => {
            let output = serde_json::json!({
                "source": source,
                "config": config,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        },
        human => {
            if !cli.quiet {
                println!("# source: {}", source);
            }
            print!("{}", config.to_toml()?);
        },
        records => {
            println!("H teamsweep=1 records=1 mode=config source=\"{}\"", escape_quotes(&source));
            println!("K inactivity_days={}", config.inactivity_days);
            println!("K lookup_batch_size={}", config.lookup_batch_size);
            println!(
                "K member_abbreviation_threshold={}",
                config.member_abbreviation_threshold
            );
            println!(
                "K general_channel_name=\"{}\"",
                escape_quotes(&config.general_channel_name)
            );
            println!("K workers={}", config.workers);
        }
    )
}
