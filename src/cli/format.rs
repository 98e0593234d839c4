//! Format output dispatch helpers

/// Dispatch output by format; the json branch returns a `Result`, the other
/// branches return `()`.
///
/// ```rust,ignore
/// output_by_format_result!(cli.format,
///     json => output_json(&report),
///     human => { output_human(cli, &report) },
///     records => { output_records(&report) }
/// )
/// ```
#[macro_export]
macro_rules! output_by_format_result {
    ($format:expr, json => $json:expr, human => $human:block, records => $records:block) => {
        match $format {
            $crate::cli::OutputFormat::Json => $json,
            $crate::cli::OutputFormat::Human => {
                $human;
                Ok(())
            }
            $crate::cli::OutputFormat::Records => {
                $records;
                Ok(())
            }
        }
    };
}
