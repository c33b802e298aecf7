//! Output formatting for resolution results.
//!
//! This module renders results to any [`std::io::Write`]:
//! - [`text`] - `<base>/<mask> <asn> <query>` lines
//! - [`csv`] - quoted CSV with a header row
//! - [`json`] - JSON array

mod csv;
mod json;
mod text;

use crate::processing::ResolutionResult;
use std::error::Error;
use std::io::Write;
use std::str::FromStr;

pub use csv::{csv_field, write_csv};
pub use json::{write_json, ResultRow};
pub use text::{format_result_line, write_text, NO_MATCH_SENTINEL};

/// Rendering used for the result stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{other}' (text|csv|json)")),
        }
    }
}

/// What to emit for a query that matched no block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoMatchPolicy {
    /// Emit an explicit no-match record.
    #[default]
    Sentinel,
    /// Leave the query out of the output.
    Skip,
}

impl FromStr for NoMatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sentinel" => Ok(NoMatchPolicy::Sentinel),
            "skip" => Ok(NoMatchPolicy::Skip),
            other => Err(format!("unknown no-match policy '{other}' (sentinel|skip)")),
        }
    }
}

/// Write `results` in the requested format.
pub fn write_results<W: Write>(
    out: &mut W,
    results: &[ResolutionResult<'_>],
    format: OutputFormat,
    policy: NoMatchPolicy,
) -> Result<(), Box<dyn Error>> {
    log::debug!("write_results({format:?}, {policy:?}) count={}", results.len());
    match format {
        OutputFormat::Text => write_text(out, results, policy)?,
        OutputFormat::Csv => write_csv(out, results, policy)?,
        OutputFormat::Json => write_json(out, results, policy)?,
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_no_match_policy_from_str() {
        assert_eq!(
            "sentinel".parse::<NoMatchPolicy>().unwrap(),
            NoMatchPolicy::Sentinel
        );
        assert_eq!("skip".parse::<NoMatchPolicy>().unwrap(), NoMatchPolicy::Skip);
        assert!("panic".parse::<NoMatchPolicy>().is_err());
    }
}
