//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `wifitriggers.toml` in the working directory, or the file named
//! by `WIFITRIGGERS_CONFIG`. Every field has a default so the file is
//! optional. Environment variables take precedence over file values.

use std::path::Path;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;
use wifitriggers_adapter_hostapd::HostapdConfig;
use wifitriggers_adapter_notify::{IftttConfig, SlackConfig};
use wifitriggers_domain::hardware_address::{self, HardwareAddress, ParseAddressError};

const DEFAULT_PATH: &str = "wifitriggers.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tick schedule.
    pub driver: DriverConfig,
    /// Station backend connection.
    pub access_point: HostapdConfig,
    /// Home/away detection.
    pub presence: PresenceConfig,
    /// IFTTT Maker trigger provider.
    pub ifttt: IftttConfig,
    /// Devices that must all stay connected.
    pub watch: WatchConfig,
    /// Slack webhook provider.
    pub slack: SlackConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Polling schedule.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Seconds between ticks; also the deadline of each tick.
    pub interval_secs: u64,
}

/// Which devices mean "somebody is home", and what to fire.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PresenceConfig {
    /// Hardware addresses of the tracked devices.
    pub tracked: Vec<HardwareAddress>,
    /// Trigger fired when somebody comes home.
    pub home_command: String,
    /// Trigger fired when the last tracked device leaves.
    pub away_command: String,
}

/// Devices whose complete presence is reported to Slack.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Hardware addresses of the watched devices. Empty disables the watch.
    pub devices: Vec<HardwareAddress>,
    /// Message posted once every device is connected.
    pub connected_message: String,
    /// Message posted once any device drops off.
    pub disconnected_message: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from the config file (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is malformed, if an override
    /// carries an invalid address list, or if validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("WIFITRIGGERS_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::from_file(Path::new(&path))?;
        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = var("WIFITRIGGERS_BACKEND") {
            self.access_point.url = val;
        }
        if let Some(val) = var("WIFITRIGGERS_IFTTT_KEY") {
            self.ifttt.key = SecretString::from(val);
        }
        if let Some(val) = var("WIFITRIGGERS_TRACKED_MACS") {
            self.presence.tracked = hardware_address::parse_list(&val)?;
        }
        if let Some(val) = var("WIFITRIGGERS_CAMERA_MACS") {
            self.watch.devices = hardware_address::parse_list(&val)?;
        }
        if let Some(val) = var("WIFITRIGGERS_SLACK_WEBHOOK_URL") {
            self.slack.webhook_url = SecretString::from(val);
        }
        if let Some(val) = var("WIFITRIGGERS_INTERVAL_SECS")
            && let Ok(secs) = val.parse()
        {
            self.driver.interval_secs = secs;
        }
        if let Some(val) = var("WIFITRIGGERS_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.driver.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "driver interval must be non-zero".to_string(),
            ));
        }
        if self.presence.tracked.is_empty() {
            return Err(ConfigError::Validation(
                "at least one tracked device is required".to_string(),
            ));
        }
        if self.ifttt.key.expose_secret().is_empty() {
            return Err(ConfigError::Validation("ifttt key is required".to_string()));
        }
        check_url("access point url", &self.access_point.url)?;
        check_url("ifttt base url", &self.ifttt.base_url)?;
        if !self.watch.devices.is_empty() {
            let webhook = self.slack.webhook_url.expose_secret();
            if webhook.is_empty() {
                return Err(ConfigError::Validation(
                    "watched devices require a slack webhook url".to_string(),
                ));
            }
            check_url("slack webhook url", webhook)?;
        }
        Ok(())
    }

    /// Time between ticks.
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.driver.interval_secs)
    }
}

fn check_url(what: &str, raw: &str) -> Result<(), ConfigError> {
    Url::parse(raw)
        .map(drop)
        .map_err(|err| ConfigError::Validation(format!("{what} is invalid: {err}")))
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self { interval_secs: 2 }
    }
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            tracked: Vec::new(),
            home_command: "disarm_wyzecam".to_string(),
            away_command: "arm_wyzecam".to_string(),
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            devices: Vec::new(),
            connected_message: "All cameras are connected.".to_string(),
            disconnected_message: "Some cameras are disconnected.".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "wifitriggersd=info,wifitriggers=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// An address list override is malformed.
    #[error("invalid device list")]
    Address(#[from] ParseAddressError),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
