//! Database and query file readers.
//!
//! Both files are read fully into memory before anything is resolved.

use crate::models::{parse_address, Address, ResolveError};
use crate::registry::Registry;
use colored::Colorize;
use std::error::Error;
use std::path::Path;

/// Query addresses parsed from a query list, in input order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryList {
    pub addresses: Vec<Address>,
    /// 1-based line number and reason for every rejected line.
    pub rejected: Vec<(usize, ResolveError)>,
}

/// Read a text file, failing if it does not exist or cannot be read.
///
/// Lines are decoded one at a time. Bytes that are not valid UTF-8 become
/// `U+FFFD`, so such a line fails to parse later and is dropped on its own.
pub fn read_lines(path: &Path) -> Result<Vec<String>, Box<dyn Error>> {
    if !path.exists() {
        return Err(format!("File does not exist: {}", path.display()).into());
    }
    let bytes =
        std::fs::read(path).map_err(|e| format!("Error reading {}: {e}", path.display()))?;
    log::debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(split_lines(&bytes))
}

/// Split raw bytes on `\n`, trimming a trailing `\r` from each line.
fn split_lines(bytes: &[u8]) -> Vec<String> {
    let mut lines: Vec<String> = bytes
        .split(|b| *b == b'\n')
        .enumerate()
        .map(|(i, raw)| {
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            let line = String::from_utf8_lossy(raw);
            if let std::borrow::Cow::Owned(_) = line {
                log::debug!("line {}: not valid UTF-8", i + 1);
            }
            line.into_owned()
        })
        .collect();
    // A final newline (or an empty file) leaves one empty trailing piece.
    if lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

/// Load the routing registry from a database file.
pub fn read_registry_file(path: &Path) -> Result<Registry, Box<dyn Error>> {
    log::info!("Reading registry database: {}", path.display());
    let lines = read_lines(path)?;
    Ok(Registry::load(&lines))
}

/// Parse query lines, one dotted address per line.
///
/// Blank lines are ignored. Malformed addresses are logged and recorded in
/// [`QueryList::rejected`], the remaining queries are still returned.
pub fn parse_queries<I, S>(lines: I) -> QueryList
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut list = QueryList::default();
    for (i, line) in lines.into_iter().enumerate() {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        match parse_address(line) {
            Ok(addr) => list.addresses.push(addr),
            Err(e) => {
                log::warn!("query line {}: {} {e}", i + 1, "rejected".on_red());
                list.rejected.push((i + 1, e));
            }
        }
    }
    list
}

/// Read and parse the query list file.
pub fn read_query_file(path: &Path) -> Result<QueryList, Box<dyn Error>> {
    log::info!("Reading query list: {}", path.display());
    let lines = read_lines(path)?;
    let list = parse_queries(&lines);
    log::info!(
        "# Got query count = {} ({} rejected)",
        list.addresses.len(),
        list.rejected.len()
    );
    Ok(list)
}
