//! Routing registry built from database lines.
//!
//! Each database line reads `<dotted-ipv4> <mask-length> <as-number>`, extra
//! trailing fields are ignored. Lines that cannot produce a [`PrefixBlock`]
//! are dropped and counted, they never abort a load.

use crate::models::{make_block, PrefixBlock, ResolveError};
use colored::Colorize;
use serde::Serialize;

/// Counters collected while loading a registry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    /// Non-blank lines seen.
    pub lines: usize,
    /// Blocks accepted.
    pub blocks: usize,
    /// Lines dropped as malformed.
    pub skipped: usize,
}

/// Ordered, read-only collection of prefix blocks in database order.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    blocks: Vec<PrefixBlock>,
    stats: LoadStats,
}

/// Parse one database line.
///
/// Returns `None` when the line has fewer than three fields, otherwise the
/// block or the reason it could not be built.
pub fn parse_db_line(line: &str) -> Option<Result<PrefixBlock, ResolveError>> {
    let mut fields = line.split_whitespace();
    let (addr, mask, asn) = (fields.next()?, fields.next()?, fields.next()?);

    let block = mask
        .parse::<i64>()
        .map_err(|_| ResolveError::InvalidMask(mask.to_string()))
        .and_then(|mask_len| {
            let asn = asn
                .parse::<u32>()
                .map_err(|_| ResolveError::InvalidAsn(asn.to_string()))?;
            make_block(addr, mask_len, asn)
        });
    Some(block)
}

impl Registry {
    /// Build a registry from database lines, keeping file order.
    ///
    /// Duplicate and overlapping blocks are all retained.
    pub fn load<I, S>(lines: I) -> Registry
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Registry::default();

        for (i, line) in lines.into_iter().enumerate() {
            let line = line.as_ref().trim();
            if line.is_empty() {
                continue;
            }
            registry.stats.lines += 1;

            match parse_db_line(line) {
                Some(Ok(block)) => {
                    log::trace!("line {}: {block} AS{}", i + 1, block.asn());
                    registry.blocks.push(block);
                }
                Some(Err(e)) => {
                    log::debug!("line {}: skipped {:?}: {e}", i + 1, line);
                    registry.stats.skipped += 1;
                }
                None => {
                    log::debug!("line {}: skipped {:?}: too few fields", i + 1, line);
                    registry.stats.skipped += 1;
                }
            }
        }
        registry.stats.blocks = registry.blocks.len();

        log::info!(
            "Registry loaded: {} blocks from {} lines, {} skipped",
            registry.stats.blocks.to_string().green(),
            registry.stats.lines,
            registry.stats.skipped.to_string().yellow()
        );
        registry
    }

    /// Build a registry from blocks that are already constructed.
    pub fn from_blocks(blocks: Vec<PrefixBlock>) -> Registry {
        let n = blocks.len();
        Registry {
            blocks,
            stats: LoadStats {
                lines: n,
                blocks: n,
                skipped: 0,
            },
        }
    }

    pub fn blocks(&self) -> &[PrefixBlock] {
        &self.blocks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PrefixBlock> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn stats(&self) -> LoadStats {
        self.stats
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a PrefixBlock;
    type IntoIter = std::slice::Iter<'a, PrefixBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Address;

    #[test]
    fn test_parse_db_line() {
        let block = parse_db_line("1.2.3.0 24 500").unwrap().unwrap();
        assert_eq!(block.to_string(), "1.2.3.0/24");
        assert_eq!(block.asn(), 500);

        let block = parse_db_line("10.0.0.0\t8   100 extra fields").unwrap().unwrap();
        assert_eq!(block.mask(), 8);
        assert_eq!(block.asn(), 100);
    }

    #[test]
    fn test_parse_db_line_too_few_fields() {
        assert!(parse_db_line("bad.entry here").is_none());
        assert!(parse_db_line("").is_none());
    }

    #[test]
    fn test_parse_db_line_errors() {
        assert_eq!(
            parse_db_line("1.2.3.0 x 500").unwrap().unwrap_err(),
            ResolveError::InvalidMask("x".to_string())
        );
        assert_eq!(
            parse_db_line("1.2.3.0 40 500").unwrap().unwrap_err(),
            ResolveError::InvalidMask("40".to_string())
        );
        assert_eq!(
            parse_db_line("1.2.3.0 24 -5").unwrap().unwrap_err(),
            ResolveError::InvalidAsn("-5".to_string())
        );
        assert_eq!(
            parse_db_line("1.2.3.999 24 5").unwrap().unwrap_err(),
            ResolveError::InvalidAddress("1.2.3.999".to_string())
        );
    }

    #[test]
    fn test_load_skips_malformed_lines() {
        let lines = [
            "1.2.3.0 24 500",
            "bad.entry here",
            "",
            "300.1.1.0 24 9",
            "4.5.0.0 33 9",
            "10.0.0.0 8 100",
        ];
        let registry = Registry::load(lines);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.blocks()[0].to_string(), "1.2.3.0/24");
        assert_eq!(registry.blocks()[1].to_string(), "10.0.0.0/8");
        assert_eq!(
            registry.stats(),
            LoadStats {
                lines: 5,
                blocks: 2,
                skipped: 3
            }
        );
    }

    #[test]
    fn test_load_keeps_duplicates_in_order() {
        let registry = Registry::load(vec![
            "8.8.8.0 24 15169".to_string(),
            "8.8.8.0 24 15169".to_string(),
            "8.8.0.0 16 1".to_string(),
        ]);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.blocks()[0], registry.blocks()[1]);
        let masks: Vec<u8> = registry.iter().map(|b| b.mask()).collect();
        assert_eq!(masks, vec![24, 24, 16]);
    }

    #[test]
    fn test_load_empty() {
        let registry = Registry::load(Vec::<&str>::new());
        assert!(registry.is_empty());
        assert_eq!(registry.stats(), LoadStats::default());
    }

    #[test]
    fn test_from_blocks() {
        let block = PrefixBlock::new(Address::new(1, 0, 0, 0), 8, 3).unwrap();
        let registry = Registry::from_blocks(vec![block.clone()]);
        assert_eq!(registry.len(), 1);
        assert_eq!((&registry).into_iter().next(), Some(&block));
    }
}
