//! Output format selection
//!
//! The format type lives in the core crate; clap parses it through
//! [`parse_format`].

pub use teamsweep_core::format::OutputFormat;

/// Parse `--format` through the core `FromStr` impl
pub fn parse_format(s: &str) -> std::result::Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}
