//! # wifitriggers-adapter-notify
//!
//! Notification adapter — the external effects fired by switches.
//!
//! ## Providers
//! - [`IftttTrigger`]: fires a named IFTTT Maker trigger (e.g. arm or disarm
//!   the cameras)
//! - [`SlackWebhook`]: posts a short text message to a Slack incoming webhook
//!
//! Both implement [`Delivery`](wifitriggers_app::ports::Delivery) with a
//! `String` payload, treat any non-2xx answer as a failed delivery and
//! abandon the request as soon as the caller's token fires.
//!
//! ## Dependency rule
//! Depends on `wifitriggers-app` (for port traits) and `wifitriggers-domain`.

pub mod config;
pub mod error;
mod http;
pub mod ifttt;
pub mod slack;

pub use config::{IftttConfig, SlackConfig};
pub use error::NotifyError;
pub use ifttt::IftttTrigger;
pub use slack::SlackWebhook;
