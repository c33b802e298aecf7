//! JSON output formatting for resolution results.

use super::NoMatchPolicy;
use crate::models::Address;
use crate::processing::ResolutionResult;
use serde::Serialize;
use std::error::Error;
use std::io::Write;

/// Serialized form of one result; `prefix` and `asn` are null when unmatched.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct ResultRow {
    pub query: Address,
    pub prefix: Option<String>,
    pub asn: Option<u32>,
}

impl From<&ResolutionResult<'_>> for ResultRow {
    fn from(result: &ResolutionResult<'_>) -> Self {
        let best = result.best_match();
        ResultRow {
            query: result.query(),
            prefix: best.map(|b| b.to_string()),
            asn: best.map(|b| b.asn()),
        }
    }
}

/// Write the kept results as a pretty printed JSON array.
pub fn write_json<W: Write>(
    out: &mut W,
    results: &[ResolutionResult<'_>],
    policy: NoMatchPolicy,
) -> Result<(), Box<dyn Error>> {
    let rows: Vec<ResultRow> = results
        .iter()
        .filter(|r| r.is_match() || policy == NoMatchPolicy::Sentinel)
        .map(ResultRow::from)
        .collect();
    serde_json::to_writer_pretty(&mut *out, &rows)
        .map_err(|e| format!("Error serializing JSON: {e}"))?;
    writeln!(out)?;
    Ok(())
}
