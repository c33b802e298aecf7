//! Error kinds raised while building addresses and prefix blocks.

use super::Address;

/// Errors produced by the address codec, block construction and resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Wrong field count, non-decimal field or an octet outside 0..=255.
    #[error("invalid IPv4 address: {0}")]
    InvalidAddress(String),

    /// Mask length that is not an integer in 0..=32.
    #[error("invalid mask length: {0}")]
    InvalidMask(String),

    /// AS number that is not a non-negative 32-bit integer.
    #[error("invalid AS number: {0}")]
    InvalidAsn(String),

    /// No registry block contains the address.
    #[error("no registry block contains {0}")]
    NoMatch(Address),
}
