//! Hardware (MAC) address value type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A 6-byte station hardware address.
///
/// The canonical string form is lowercase, colon separated
/// (`aa:bb:cc:dd:ee:ff`). Equality, ordering and hashing are over the raw
/// bytes, so two spellings of the same address compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HardwareAddress([u8; 6]);

impl HardwareAddress {
    /// Wrap raw octets.
    #[must_use]
    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    /// Access the raw octets.
    #[must_use]
    pub const fn octets(self) -> [u8; 6] {
        self.0
    }
}

impl From<[u8; 6]> for HardwareAddress {
    fn from(octets: [u8; 6]) -> Self {
        Self(octets)
    }
}

impl fmt::Display for HardwareAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

/// Why a string could not be parsed as a [`HardwareAddress`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseAddressError {
    /// Not six separated groups.
    #[error("expected 6 octets in {input:?}, got {count}")]
    WrongLength { input: String, count: usize },

    /// Separators must be all `:` or all `-`.
    #[error("mixed separators in {input:?}")]
    Separator { input: String },

    /// A group is not two hex digits.
    #[error("invalid octet {octet:?} in {input:?}")]
    InvalidOctet { input: String, octet: String },
}

impl FromStr for HardwareAddress {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let separator = if input.contains(':') { ':' } else { '-' };
        let other = if separator == ':' { '-' } else { ':' };
        if input.contains(other) {
            return Err(ParseAddressError::Separator {
                input: input.to_string(),
            });
        }

        let groups: Vec<&str> = input.split(separator).collect();
        if groups.len() != 6 {
            return Err(ParseAddressError::WrongLength {
                input: input.to_string(),
                count: groups.len(),
            });
        }

        let mut octets = [0u8; 6];
        for (slot, group) in octets.iter_mut().zip(&groups) {
            let parsed = if group.len() == 2 && group.bytes().all(|b| b.is_ascii_hexdigit()) {
                u8::from_str_radix(group, 16).ok()
            } else {
                None
            };
            *slot = parsed.ok_or_else(|| ParseAddressError::InvalidOctet {
                input: input.to_string(),
                octet: (*group).to_string(),
            })?;
        }
        Ok(Self(octets))
    }
}

impl Serialize for HardwareAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HardwareAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse a comma-separated list of addresses, ignoring empty entries.
///
/// # Errors
///
/// Returns the first entry that fails to parse.
pub fn parse_list(csv: &str) -> Result<Vec<HardwareAddress>, ParseAddressError> {
    csv.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::parse)
        .collect()
}
