//! # wifitriggers-domain
//!
//! Pure domain model for the wifitriggers presence controller.
//!
//! ## Responsibilities
//! - Foundational types: hardware addresses and the error conventions shared
//!   by every crate in the workspace
//! - Define the **client set** (stations currently associated with the
//!   access points, rebuilt every tick)
//! - Define the **switch state** tracked for every external device/channel
//! - Define **conditions** (pure predicates over a client set)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod hardware_address;

pub mod client_set;
pub mod condition;
pub mod switch_state;
