//! # wifitriggers-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `StationBackend` — list station sockets and the stations on each
//!   - `ApReader` — produce the current client set
//!   - `Delivery` — push a payload to a notification provider
//! - Provide the **use-cases** built on those ports:
//!   - `StationAggregator` — concurrent per-socket queries merged into one set
//!   - `Action` — fail-fast parallel composition of side effects
//!   - `Switch` — idempotent external on/off effect
//!   - `Engine` — ordered (condition, action) bindings evaluated every tick
//!   - `Driver` — the fixed-interval polling loop
//!   - `presence` — the home/away and all-connected rule tables
//!
//! ## Dependency rule
//! Depends on `wifitriggers-domain` only (plus `tokio`/`tokio-util` for tasks
//! and cancellation). Never imports adapter crates. Adapters depend on *this*
//! crate, not the reverse.

pub mod action;
pub mod aggregator;
pub mod driver;
pub mod engine;
pub mod ports;
pub mod presence;
pub mod switch;
