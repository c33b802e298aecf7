//! Domain models for AS resolution.
//!
//! - [`Address`] - IPv4 address codec
//! - [`PrefixBlock`] - CIDR block owned by an AS
//! - [`ResolveError`] - error kinds shared by the crate

mod error;
mod ipv4;
mod prefix_block;

// Re-export public types
pub use error::ResolveError;
pub use ipv4::{get_cidr_mask, parse_address, Address, MAX_LENGTH};
pub use prefix_block::{make_block, PrefixBlock};
