//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`WifiTriggersError`] when crossing a port boundary.

use crate::hardware_address::ParseAddressError;

/// Boxed error coming from an adapter.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Base error type shared by every crate in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum WifiTriggersError {
    /// A station backend reported an address that is not a hardware address.
    #[error("invalid hardware address")]
    Address(#[from] ParseAddressError),

    /// The station-query backend failed.
    #[error("station backend error")]
    Backend(#[source] BoxError),

    /// A notification provider failed to deliver.
    #[error("notification delivery failed")]
    Delivery(#[source] BoxError),

    /// The governing cancellation token fired.
    #[error("operation canceled")]
    Canceled,

    /// The per-tick deadline expired before the work completed.
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// The driver was given a zero tick interval.
    #[error("tick interval must be non-zero")]
    ZeroInterval,

    /// A switch was asked to deliver the `unknown` state.
    #[error("switch {switch} cannot target the unknown state")]
    InvalidTarget {
        /// Name of the switch.
        switch: String,
    },

    /// One leg of a composed action failed.
    #[error("action {label} failed")]
    Action {
        /// Label of the failing leg.
        label: String,
        #[source]
        source: Box<WifiTriggersError>,
    },

    /// A concurrently spawned task panicked or was aborted.
    #[error("concurrent task failed")]
    Task(#[source] BoxError),
}

impl WifiTriggersError {
    /// Whether this error, or the leg error it wraps, is a cancellation.
    #[must_use]
    pub fn is_canceled(&self) -> bool {
        match self {
            Self::Canceled => true,
            Self::Action { source, .. } => source.is_canceled(),
            _ => false,
        }
    }
}
