//! Registry record: a CIDR block mapped to an AS number.

use super::{get_cidr_mask, parse_address, Address, ResolveError, MAX_LENGTH};
use std::fmt;

/// One CIDR block of the routing registry and the AS that owns it.
///
/// The inclusive range `[low, high]` is derived once at construction: the
/// leading `mask` bits come from the base address, the remaining host bits
/// are all zeros for `low` and all ones for `high`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixBlock {
    base: Address,
    mask: u8,
    asn: u32,
    low: Address,
    high: Address,
}

/// Build a [`PrefixBlock`] from base address text, mask length and AS number.
///
/// # Errors
/// * [`ResolveError::InvalidAddress`] if `addr_text` is not a dotted quad
/// * [`ResolveError::InvalidMask`] if `mask_len` is outside `0..=32`
pub fn make_block(addr_text: &str, mask_len: i64, asn: u32) -> Result<PrefixBlock, ResolveError> {
    let base = parse_address(addr_text)?;
    let mask = u8::try_from(mask_len)
        .ok()
        .filter(|m| *m <= MAX_LENGTH)
        .ok_or_else(|| ResolveError::InvalidMask(mask_len.to_string()))?;
    PrefixBlock::new(base, mask, asn)
}

impl PrefixBlock {
    /// Create a block from an already parsed base address.
    pub fn new(base: Address, mask: u8, asn: u32) -> Result<PrefixBlock, ResolveError> {
        let network = get_cidr_mask(mask)?;
        let bits = base.ordinal();
        Ok(PrefixBlock {
            base,
            mask,
            asn,
            low: Address::from_ordinal(bits & network),
            high: Address::from_ordinal(bits | !network),
        })
    }

    /// Base address exactly as registered, host bits included.
    pub fn base(&self) -> Address {
        self.base
    }

    pub fn mask(&self) -> u8 {
        self.mask
    }

    pub fn asn(&self) -> u32 {
        self.asn
    }

    /// Lowest covered address (host bits cleared).
    pub fn low(&self) -> Address {
        self.low
    }

    /// Highest covered address (host bits set).
    pub fn high(&self) -> Address {
        self.high
    }

    /// Number of addresses covered by the block.
    pub fn size(&self) -> u64 {
        1u64 << (MAX_LENGTH - self.mask)
    }

    /// True if every octet of `addr` lies within the matching octets of `low` and `high`.
    pub fn contains(&self, addr: &Address) -> bool {
        let (low, high) = (self.low.octets(), self.high.octets());
        addr.octets()
            .iter()
            .enumerate()
            .all(|(i, octet)| low[i] <= *octet && *octet <= high[i])
    }
}

impl fmt::Display for PrefixBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.mask)
    }
}
