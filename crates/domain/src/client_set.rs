//! Client set — the stations currently associated with any access point.

use std::collections::BTreeSet;
use std::fmt;

use crate::hardware_address::HardwareAddress;

/// Unordered collection of unique station addresses.
///
/// Rebuilt from scratch every tick; no history is retained. Iteration order
/// is the address order so logs stay deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientSet {
    addresses: BTreeSet<HardwareAddress>,
}

impl ClientSet {
    /// An empty client set ("nobody connected").
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an address. Returns `false` if it was already present.
    pub fn insert(&mut self, address: HardwareAddress) -> bool {
        self.addresses.insert(address)
    }

    #[must_use]
    pub fn contains(&self, address: &HardwareAddress) -> bool {
        self.addresses.contains(address)
    }

    /// Whether at least one of `addresses` is connected.
    pub fn contains_any<'a>(&self, addresses: impl IntoIterator<Item = &'a HardwareAddress>) -> bool {
        addresses.into_iter().any(|a| self.contains(a))
    }

    /// Whether every one of `addresses` is connected (vacuously true when
    /// `addresses` is empty).
    pub fn contains_all<'a>(&self, addresses: impl IntoIterator<Item = &'a HardwareAddress>) -> bool {
        addresses.into_iter().all(|a| self.contains(a))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HardwareAddress> {
        self.addresses.iter()
    }
}

impl FromIterator<HardwareAddress> for ClientSet {
    fn from_iter<I: IntoIterator<Item = HardwareAddress>>(iter: I) -> Self {
        Self {
            addresses: iter.into_iter().collect(),
        }
    }
}

impl Extend<HardwareAddress> for ClientSet {
    fn extend<I: IntoIterator<Item = HardwareAddress>>(&mut self, iter: I) {
        self.addresses.extend(iter);
    }
}

impl IntoIterator for ClientSet {
    type Item = HardwareAddress;
    type IntoIter = std::collections::btree_set::IntoIter<HardwareAddress>;

    fn into_iter(self) -> Self::IntoIter {
        self.addresses.into_iter()
    }
}

impl<'a> IntoIterator for &'a ClientSet {
    type Item = &'a HardwareAddress;
    type IntoIter = std::collections::btree_set::Iter<'a, HardwareAddress>;

    fn into_iter(self) -> Self::IntoIter {
        self.addresses.iter()
    }
}

impl fmt::Display for ClientSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, address) in self.addresses.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{address}")?;
        }
        f.write_str("}")
    }
}
