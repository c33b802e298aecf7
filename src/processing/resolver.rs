//! Longest-prefix-match resolution of query addresses.

use crate::models::{Address, PrefixBlock, ResolveError};
use crate::registry::Registry;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// How `/0` blocks take part in matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultRoute {
    /// A `/0` block is a catch-all, chosen when nothing narrower matches.
    #[default]
    Match,
    /// A `/0` block is never selected.
    Ignore,
}

impl FromStr for DefaultRoute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "match" => Ok(DefaultRoute::Match),
            "ignore" => Ok(DefaultRoute::Ignore),
            other => Err(format!("unknown default route mode '{other}' (match|ignore)")),
        }
    }
}

/// Outcome of resolving one query address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionResult<'r> {
    query: Address,
    best: Option<&'r PrefixBlock>,
}

impl<'r> ResolutionResult<'r> {
    pub fn query(&self) -> Address {
        self.query
    }

    /// The most specific block containing the query, if any.
    pub fn best_match(&self) -> Option<&'r PrefixBlock> {
        self.best
    }

    pub fn is_match(&self) -> bool {
        self.best.is_some()
    }

    /// The best match, or [`ResolveError::NoMatch`] for the query.
    pub fn require_match(&self) -> Result<&'r PrefixBlock, ResolveError> {
        self.best.ok_or(ResolveError::NoMatch(self.query))
    }
}

impl fmt::Display for ResolutionResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.best {
            Some(block) => write!(f, "{} -> {block} AS{}", self.query, block.asn()),
            None => write!(f, "{} -> no match", self.query),
        }
    }
}

/// Resolve `address` treating `/0` blocks as default routes.
pub fn resolve(registry: &Registry, address: Address) -> ResolutionResult<'_> {
    resolve_with(registry, address, DefaultRoute::Match)
}

/// Resolve `address` against every block of `registry`.
///
/// The candidate with the largest mask wins. Among equal masks the block
/// that comes first in registry order is kept.
pub fn resolve_with(
    registry: &Registry,
    address: Address,
    default_route: DefaultRoute,
) -> ResolutionResult<'_> {
    let mut best: Option<&PrefixBlock> = None;

    for block in registry {
        if !block.contains(&address) {
            continue;
        }
        if block.mask() == 0 && default_route == DefaultRoute::Ignore {
            continue;
        }
        match best {
            Some(current) if block.mask() <= current.mask() => {}
            _ => best = Some(block),
        }
    }

    log::trace!("resolve({address}) best={:?}", best.map(|b| b.to_string()));
    ResolutionResult {
        query: address,
        best,
    }
}

/// Resolve every query in input order.
pub fn resolve_all<'r>(
    registry: &'r Registry,
    queries: &[Address],
    default_route: DefaultRoute,
) -> Vec<ResolutionResult<'r>> {
    queries
        .iter()
        .map(|q| resolve_with(registry, *q, default_route))
        .collect()
}

/// Matched and unmatched counts over a batch of results.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolutionSummary {
    pub queries: usize,
    pub matched: usize,
    pub unmatched: usize,
}

impl ResolutionSummary {
    pub fn from_results(results: &[ResolutionResult<'_>]) -> ResolutionSummary {
        let matched = results.iter().filter(|r| r.is_match()).count();
        ResolutionSummary {
            queries: results.len(),
            matched,
            unmatched: results.len() - matched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_address;

    fn addr(s: &str) -> Address {
        parse_address(s).unwrap()
    }

    #[test]
    fn test_resolve_single_block() {
        let registry = Registry::load(["1.2.3.0 24 500"]);
        let result = resolve(&registry, addr("1.2.3.42"));
        let best = result.best_match().expect("1.2.3.42 should match");
        assert_eq!(best.to_string(), "1.2.3.0/24");
        assert_eq!(best.asn(), 500);
    }

    #[test]
    fn test_resolve_longest_prefix_wins() {
        let registry = Registry::load(["10.0.0.0 8 100", "10.1.0.0 16 200"]);
        let best = resolve(&registry, addr("10.1.2.3")).require_match().unwrap();
        assert_eq!(best.asn(), 200);
        assert_eq!(best.mask(), 16);

        // Order in the registry does not matter for different masks.
        let registry = Registry::load(["10.1.0.0 16 200", "10.0.0.0 8 100"]);
        let best = resolve(&registry, addr("10.1.2.3")).require_match().unwrap();
        assert_eq!(best.asn(), 200);

        // Outside the /16 only the /8 applies.
        let best = resolve(&registry, addr("10.2.0.1")).require_match().unwrap();
        assert_eq!(best.asn(), 100);
    }

    #[test]
    fn test_resolve_tie_keeps_first_block() {
        let registry = Registry::load(["20.0.0.0 16 1", "20.0.5.0 16 2", "20.0.0.0 8 3"]);
        let best = resolve(&registry, addr("20.0.9.9")).require_match().unwrap();
        assert_eq!(best.asn(), 1);
    }

    #[test]
    fn test_resolve_no_match() {
        let registry = Registry::load(["1.2.3.0 24 500"]);
        let result = resolve(&registry, addr("9.9.9.9"));
        assert!(!result.is_match());
        assert_eq!(result.best_match(), None);
        assert_eq!(
            result.require_match().unwrap_err(),
            ResolveError::NoMatch(addr("9.9.9.9"))
        );
        assert_eq!(result.to_string(), "9.9.9.9 -> no match");
    }

    #[test]
    fn test_resolve_empty_registry() {
        let registry = Registry::default();
        assert!(!resolve(&registry, addr("1.1.1.1")).is_match());
    }

    #[test]
    fn test_default_route_modes() {
        let registry = Registry::load(["0.0.0.0 0 65000", "1.2.3.0 24 500"]);

        let best = resolve(&registry, addr("9.9.9.9")).require_match().unwrap();
        assert_eq!(best.asn(), 65000);
        let best = resolve(&registry, addr("1.2.3.4")).require_match().unwrap();
        assert_eq!(best.asn(), 500);

        let legacy = resolve_with(&registry, addr("9.9.9.9"), DefaultRoute::Ignore);
        assert!(!legacy.is_match());
        let legacy = resolve_with(&registry, addr("1.2.3.4"), DefaultRoute::Ignore);
        assert_eq!(legacy.best_match().map(|b| b.asn()), Some(500));
    }

    #[test]
    fn test_default_route_from_str() {
        assert_eq!("match".parse::<DefaultRoute>().unwrap(), DefaultRoute::Match);
        assert_eq!(" IGNORE ".parse::<DefaultRoute>().unwrap(), DefaultRoute::Ignore);
        assert!("maybe".parse::<DefaultRoute>().is_err());
    }

    #[test]
    fn test_resolve_all_and_summary() {
        let registry = Registry::load(["1.2.3.0 24 500", "10.0.0.0 8 100"]);
        let queries = [addr("1.2.3.42"), addr("9.9.9.9"), addr("10.200.0.1")];
        let results = resolve_all(&registry, &queries, DefaultRoute::Match);

        let queried: Vec<Address> = results.iter().map(|r| r.query()).collect();
        assert_eq!(queried, queries.to_vec(), "results keep input order");
        assert_eq!(
            ResolutionSummary::from_results(&results),
            ResolutionSummary {
                queries: 3,
                matched: 2,
                unmatched: 1
            }
        );
    }
}
