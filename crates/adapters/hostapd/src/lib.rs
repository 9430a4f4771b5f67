//! # wifitriggers-adapter-hostapd
//!
//! Station backend adapter — asks the access point which stations are
//! connected to each of its sockets.
//!
//! ## Responsibilities
//! - List the backend's station sockets (one per radio interface)
//! - List the raw addresses of the stations connected to one socket
//! - Abort in-flight requests when the caller's token fires
//!
//! Implements [`StationBackend`](wifitriggers_app::ports::StationBackend);
//! merging the per-socket lists is the application's job.
//!
//! ## Dependency rule
//! Depends on `wifitriggers-app` (for port traits) and `wifitriggers-domain`.

pub mod client;
pub mod config;
pub mod error;

pub use client::HostapdClient;
pub use config::HostapdConfig;
pub use error::HostapdError;
