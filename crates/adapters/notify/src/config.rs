//! Notification provider configuration.

use secrecy::SecretString;
use serde::Deserialize;

/// IFTTT Maker trigger settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IftttConfig {
    /// Maker webhooks key.
    pub key: SecretString,
    /// Maker service root.
    pub base_url: String,
    /// Upper bound for a single HTTP request, in seconds.
    pub request_timeout_secs: u64,
}

/// Slack incoming webhook settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SlackConfig {
    /// Incoming webhook URL. It embeds a token, so it is treated as a secret.
    pub webhook_url: SecretString,
    /// Upper bound for a single HTTP request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for IftttConfig {
    fn default() -> Self {
        Self {
            key: SecretString::from(String::new()),
            base_url: "https://maker.ifttt.com".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            webhook_url: SecretString::from(String::new()),
            request_timeout_secs: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn should_have_sensible_defaults() {
        let ifttt = IftttConfig::default();
        assert!(ifttt.key.expose_secret().is_empty());
        assert_eq!(ifttt.base_url, "https://maker.ifttt.com");
        assert_eq!(ifttt.request_timeout_secs, 10);

        let slack = SlackConfig::default();
        assert!(slack.webhook_url.expose_secret().is_empty());
    }

    #[test]
    fn should_deserialize_secrets_from_toml() {
        let config: IftttConfig = toml::from_str(r#"key = "abc123""#).unwrap();
        assert_eq!(config.key.expose_secret(), "abc123");
        assert_eq!(config.base_url, "https://maker.ifttt.com");
    }

    #[test]
    fn should_redact_secrets_in_debug_output() {
        let config: SlackConfig =
            toml::from_str(r#"webhook_url = "https://hooks.slack.com/services/T0/B0/XYZ""#)
                .unwrap();
        assert!(!format!("{config:?}").contains("hooks.slack.com"));
    }
}
