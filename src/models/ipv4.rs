//! IPv4 address codec.
//!
//! Provides the [`Address`] value used both for registry base addresses and for
//! query addresses, plus the CIDR mask helpers used to derive block ranges.

use super::ResolveError;
use itertools::Itertools;
use regex::Regex;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::OnceLock;

/// Maximum length for an IPv4 mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Regex matching exactly four dot separated runs of decimal digits.
static DOTTED_QUAD_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_dotted_quad_regex() -> &'static Regex {
    DOTTED_QUAD_REGEX.get_or_init(|| {
        Regex::new(r"^([0-9]+)\.([0-9]+)\.([0-9]+)\.([0-9]+)$").expect("Invalid Regex")
    })
}

/// Convert a CIDR prefix length to a network mask as u32.
///
/// # Examples
/// ```
/// use ip2as::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// assert_eq!(get_cidr_mask(0).unwrap(), 0);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, ResolveError> {
    if len > MAX_LENGTH {
        return Err(ResolveError::InvalidMask(len.to_string()));
    }
    // Shift in u64 so that len == 0 does not overflow a 32 bit shift.
    let right_len = MAX_LENGTH - len;
    let all_bits = u32::MAX as u64;
    Ok(((all_bits >> right_len) << right_len) as u32)
}

/// Parse dotted-decimal text into an [`Address`].
///
/// Surrounding whitespace is ignored. Anything other than four decimal
/// components in `0..=255` is [`ResolveError::InvalidAddress`].
pub fn parse_address(text: &str) -> Result<Address, ResolveError> {
    let text = text.trim();
    let invalid = || ResolveError::InvalidAddress(text.to_string());

    let caps = get_dotted_quad_regex().captures(text).ok_or_else(invalid)?;
    let mut octets = [0u8; 4];
    for (i, octet) in octets.iter_mut().enumerate() {
        // Leading zeros are accepted, oversized digit runs fail the u32 parse.
        let value: u32 = caps[i + 1].parse().map_err(|_| invalid())?;
        *octet = u8::try_from(value).map_err(|_| invalid())?;
    }
    Ok(Address { octets })
}

/// An IPv4 address held as four octets in network byte order.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Address {
    octets: [u8; 4],
}

impl Address {
    /// Build an address from its four octets, most significant first.
    pub const fn new(a: u8, b: u8, c: u8, d: u8) -> Address {
        Address {
            octets: [a, b, c, d],
        }
    }

    /// Build an address from its 32-bit ordinal.
    pub fn from_ordinal(ordinal: u32) -> Address {
        Address {
            octets: ordinal.to_be_bytes(),
        }
    }

    pub fn octets(&self) -> [u8; 4] {
        self.octets
    }

    /// The octets concatenated as one big-endian 32-bit value.
    pub fn ordinal(&self) -> u32 {
        u32::from_be_bytes(self.octets)
    }

    /// 32 character `0`/`1` view of the address, most significant bit first.
    pub fn bits(&self) -> String {
        self.octets.iter().map(|o| format!("{o:08b}")).collect()
    }
}

impl FromStr for Address {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_address(s)
    }
}

impl From<Ipv4Addr> for Address {
    fn from(addr: Ipv4Addr) -> Self {
        Address {
            octets: addr.octets(),
        }
    }
}

impl From<Address> for Ipv4Addr {
    fn from(addr: Address) -> Self {
        Ipv4Addr::from(addr.octets)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.octets.iter().join("."))
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Address, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_address(&s).map_err(de::Error::custom)
    }
}
