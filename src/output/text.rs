//! Plain text result lines: `<base>/<mask> <asn> <query>`.

use super::NoMatchPolicy;
use crate::processing::ResolutionResult;
use std::io::Write;

/// First field of the line printed for a query with no matching block.
pub const NO_MATCH_SENTINEL: &str = "no-match";

/// Format one result, `None` if the policy drops it.
pub fn format_result_line(result: &ResolutionResult<'_>, policy: NoMatchPolicy) -> Option<String> {
    match (result.best_match(), policy) {
        (Some(block), _) => Some(format!("{block} {} {}", block.asn(), result.query())),
        (None, NoMatchPolicy::Sentinel) => Some(format!("{NO_MATCH_SENTINEL} {}", result.query())),
        (None, NoMatchPolicy::Skip) => None,
    }
}

pub fn write_text<W: Write>(
    out: &mut W,
    results: &[ResolutionResult<'_>],
    policy: NoMatchPolicy,
) -> std::io::Result<()> {
    for line in results.iter().filter_map(|r| format_result_line(r, policy)) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
