//! Station backend configuration.

use serde::Deserialize;

/// Where and how to reach the station backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HostapdConfig {
    /// Base URL of the backend (e.g. `http://hostapd:8080`).
    pub url: String,
    /// Upper bound for a single HTTP request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for HostapdConfig {
    fn default() -> Self {
        Self {
            url: "http://hostapd:8080".to_string(),
            request_timeout_secs: 5,
        }
    }
}
