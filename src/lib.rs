//! Resolve IPv4 addresses to their owning Autonomous System.
//!
//! A registry of `(prefix, mask, AS)` records is loaded from a database file and
//! every query address is matched against it with longest-prefix-match.

pub mod config;
pub mod input;
pub mod models;
pub mod output;
pub mod processing;
pub mod registry;

use colored::Colorize;
use config::Settings;
use processing::{resolve_all, ResolutionSummary};
use std::error::Error;
use std::io::Write;
use std::path::Path;

/// Resolve every address of `queries` against `database` and write the results to `out`.
pub fn run<W: Write>(
    database: &Path,
    queries: &Path,
    settings: &Settings,
    out: &mut W,
) -> Result<ResolutionSummary, Box<dyn Error>> {
    // Both files are read before any resolution starts.
    let registry = input::read_registry_file(database)?;
    let query_list = input::read_query_file(queries)?;

    let results = resolve_all(&registry, &query_list.addresses, settings.default_route);
    for result in results.iter().filter(|r| !r.is_match()) {
        log::warn!("{} for {}", "NoMatch".on_red(), result.query());
    }

    output::write_results(out, &results, settings.format, settings.no_match)?;

    let summary = ResolutionSummary::from_results(&results);
    log::info!(
        "# Resolved {} queries: {} matched, {} unmatched, {} rejected lines",
        summary.queries,
        summary.matched.to_string().green(),
        summary.unmatched.to_string().yellow(),
        query_list.rejected.len()
    );
    Ok(summary)
}
