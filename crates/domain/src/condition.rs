//! Condition — a pure predicate over the current client set.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::client_set::ClientSet;
use crate::hardware_address::HardwareAddress;

/// A predicate evaluated against the client set on every tick.
///
/// Conditions are plain data: evaluating one has no side effects, and
/// evaluating it twice against equal client sets gives equal answers, so the
/// same condition may be shared by several bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// Always holds.
    Always,
    /// Never holds.
    Never,
    /// At least one of the addresses is connected ("somebody is home").
    AnyPresent { addresses: BTreeSet<HardwareAddress> },
    /// Every one of the addresses is connected. Holds for an empty set.
    AllPresent { addresses: BTreeSet<HardwareAddress> },
    /// Negation.
    Not { condition: Box<Condition> },
    /// Both sides hold.
    And {
        left: Box<Condition>,
        right: Box<Condition>,
    },
    /// Either side holds.
    Or {
        left: Box<Condition>,
        right: Box<Condition>,
    },
}

impl Condition {
    pub fn any_present(addresses: impl IntoIterator<Item = HardwareAddress>) -> Self {
        Self::AnyPresent {
            addresses: addresses.into_iter().collect(),
        }
    }

    pub fn all_present(addresses: impl IntoIterator<Item = HardwareAddress>) -> Self {
        Self::AllPresent {
            addresses: addresses.into_iter().collect(),
        }
    }

    /// Logical AND of two conditions.
    ///
    /// ```
    /// # use wifitriggers_domain::condition::Condition;
    /// let c = Condition::Always.and(Condition::Never);
    /// assert!(!c.evaluate(&Default::default()));
    /// ```
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::And {
            left: Box::new(self),
            right: Box::new(other),
        }
    }

    /// Logical OR of two conditions.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self::Or {
            left: Box::new(self),
            right: Box::new(other),
        }
    }

    /// Evaluate against a client set.
    ///
    /// Both sides of `And`/`Or` are always evaluated; there is nothing to
    /// short-circuit since conditions are side-effect free.
    #[must_use]
    pub fn evaluate(&self, clients: &ClientSet) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::AnyPresent { addresses } => clients.contains_any(addresses),
            Self::AllPresent { addresses } => clients.contains_all(addresses),
            Self::Not { condition } => !condition.evaluate(clients),
            Self::And { left, right } => {
                let (l, r) = (left.evaluate(clients), right.evaluate(clients));
                l && r
            }
            Self::Or { left, right } => {
                let (l, r) = (left.evaluate(clients), right.evaluate(clients));
                l || r
            }
        }
    }
}

impl std::ops::Not for Condition {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::Not {
            condition: Box::new(self),
        }
    }
}

fn write_addresses(f: &mut fmt::Formatter<'_>, addresses: &BTreeSet<HardwareAddress>) -> fmt::Result {
    for (i, address) in addresses.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{address}")?;
    }
    Ok(())
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => f.write_str("always"),
            Self::Never => f.write_str("never"),
            Self::AnyPresent { addresses } => {
                f.write_str("any_present(")?;
                write_addresses(f, addresses)?;
                f.write_str(")")
            }
            Self::AllPresent { addresses } => {
                f.write_str("all_present(")?;
                write_addresses(f, addresses)?;
                f.write_str(")")
            }
            Self::Not { condition } => write!(f, "not({condition})"),
            Self::And { left, right } => write!(f, "({left} and {right})"),
            Self::Or { left, right } => write!(f, "({left} or {right})"),
        }
    }
}
