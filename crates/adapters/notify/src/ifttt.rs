//! IFTTT Maker trigger provider.

use std::future::Future;

use secrecy::{ExposeSecret, SecretString};
use tokio_util::sync::CancellationToken;
use url::Url;
use wifitriggers_app::ports::Delivery;
use wifitriggers_domain::error::WifiTriggersError;

use crate::config::IftttConfig;
use crate::error::NotifyError;
use crate::http;

/// Fires `GET {base}/trigger/{command}/with/key/{key}`.
#[derive(Debug, Clone)]
pub struct IftttTrigger {
    http: reqwest::Client,
    base_url: Url,
    key: SecretString,
}

impl IftttTrigger {
    /// # Errors
    ///
    /// Fails if the key is empty, the base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &IftttConfig) -> Result<Self, NotifyError> {
        let http = http::build_client(config.request_timeout_secs)?;
        Self::from_reqwest(&config.base_url, config.key.clone(), http)
    }

    /// Wrap an existing `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Fails if the key is empty or `base_url` cannot carry a path.
    pub fn from_reqwest(
        base_url: &str,
        key: SecretString,
        http: reqwest::Client,
    ) -> Result<Self, NotifyError> {
        if key.expose_secret().is_empty() {
            return Err(NotifyError::MissingSecret("ifttt key"));
        }
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(NotifyError::BaseUrl(base_url.into()));
        }
        Ok(Self {
            http,
            base_url,
            key,
        })
    }

    fn trigger_url(&self, command: &str) -> Result<Url, NotifyError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| NotifyError::BaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["trigger", command, "with", "key", self.key.expose_secret()]);
        Ok(url)
    }

    /// Fire the trigger named `command`.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-2xx answers or cancellation.
    pub async fn trigger(&self, cancel: &CancellationToken, command: &str) -> Result<(), NotifyError> {
        let url = self.trigger_url(command)?;
        tracing::debug!(command, "firing ifttt trigger");
        http::send(cancel, "ifttt", self.http.get(url)).await
    }
}

impl Delivery for IftttTrigger {
    type Payload = String;

    fn deliver(
        &self,
        cancel: &CancellationToken,
        payload: &String,
    ) -> impl Future<Output = Result<(), WifiTriggersError>> + Send {
        async move { Ok(self.trigger(cancel, payload).await?) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trigger(base: &str) -> IftttTrigger {
        IftttTrigger::from_reqwest(base, SecretString::from("k3y".to_string()), reqwest::Client::new())
            .unwrap()
    }

    #[test]
    fn should_build_maker_trigger_url() {
        let url = trigger("https://maker.ifttt.com")
            .trigger_url("arm_wyzecam")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://maker.ifttt.com/trigger/arm_wyzecam/with/key/k3y"
        );
    }

    #[test]
    fn should_escape_command_segment() {
        let url = trigger("https://maker.ifttt.com/")
            .trigger_url("a/b c")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://maker.ifttt.com/trigger/a%2Fb%20c/with/key/k3y"
        );
    }

    #[test]
    fn should_reject_empty_key() {
        let err = IftttTrigger::from_reqwest(
            "https://maker.ifttt.com",
            SecretString::from(String::new()),
            reqwest::Client::new(),
        )
        .unwrap_err();
        assert!(matches!(err, NotifyError::MissingSecret(_)));
    }

    #[test]
    fn should_not_leak_key_in_debug_output() {
        let t = trigger("https://maker.ifttt.com");
        assert!(!format!("{t:?}").contains("k3y"));
    }
}
