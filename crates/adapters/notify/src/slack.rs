//! Slack incoming webhook provider.

use std::future::Future;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use url::Url;
use wifitriggers_app::ports::Delivery;
use wifitriggers_domain::error::WifiTriggersError;

use crate::config::SlackConfig;
use crate::error::NotifyError;
use crate::http;

#[derive(Serialize)]
struct Message<'a> {
    text: &'a str,
}

/// Posts `{"text": …}` to an incoming webhook.
#[derive(Debug, Clone)]
pub struct SlackWebhook {
    http: reqwest::Client,
    webhook_url: SecretString,
}

impl SlackWebhook {
    /// # Errors
    ///
    /// Fails if the webhook URL is empty or invalid, or the HTTP client
    /// cannot be built.
    pub fn new(config: &SlackConfig) -> Result<Self, NotifyError> {
        let http = http::build_client(config.request_timeout_secs)?;
        Self::from_reqwest(config.webhook_url.clone(), http)
    }

    /// Wrap an existing `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Fails if the webhook URL is empty or does not parse.
    pub fn from_reqwest(webhook_url: SecretString, http: reqwest::Client) -> Result<Self, NotifyError> {
        if webhook_url.expose_secret().is_empty() {
            return Err(NotifyError::MissingSecret("slack webhook url"));
        }
        Url::parse(webhook_url.expose_secret())?;
        Ok(Self { http, webhook_url })
    }

    /// Post `text` to the channel behind the webhook.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-2xx answers or cancellation.
    pub async fn post(&self, cancel: &CancellationToken, text: &str) -> Result<(), NotifyError> {
        tracing::debug!(text, "posting slack message");
        let request = self
            .http
            .post(self.webhook_url.expose_secret())
            .json(&Message { text });
        http::send(cancel, "slack", request).await
    }
}

impl Delivery for SlackWebhook {
    type Payload = String;

    fn deliver(
        &self,
        cancel: &CancellationToken,
        payload: &String,
    ) -> impl Future<Output = Result<(), WifiTriggersError>> + Send {
        async move { Ok(self.post(cancel, payload).await?) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_reject_empty_webhook_url() {
        let err = SlackWebhook::from_reqwest(SecretString::from(String::new()), reqwest::Client::new())
            .unwrap_err();
        assert!(matches!(err, NotifyError::MissingSecret(_)));
    }

    #[test]
    fn should_reject_invalid_webhook_url() {
        let err = SlackWebhook::from_reqwest(SecretString::from("not a url".to_string()), reqwest::Client::new())
            .unwrap_err();
        assert!(matches!(err, NotifyError::Url(_)));
    }

    #[test]
    fn should_serialize_message_as_text_field() {
        let body = serde_json::to_value(Message { text: "hi" }).unwrap();
        assert_eq!(body, serde_json::json!({ "text": "hi" }));
    }
}
