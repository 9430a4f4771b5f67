//! Notification adapter error types.

use wifitriggers_domain::error::WifiTriggersError;

/// Errors specific to the notification providers.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// A required secret (key, webhook URL) is empty.
    #[error("{0} is not configured")]
    MissingSecret(&'static str),

    /// A configured URL does not parse.
    #[error("invalid provider URL")]
    Url(#[from] url::ParseError),

    /// The URL parses but cannot carry a path.
    #[error("provider URL {0} cannot be used as a base")]
    BaseUrl(String),

    /// The HTTP client failed. The request URL is stripped since it may
    /// embed a key.
    #[error("HTTP request failed")]
    Http(#[source] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("{provider} returned HTTP {status}")]
    Status {
        /// Which provider answered.
        provider: &'static str,
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// The request was abandoned because its token fired.
    #[error("delivery canceled")]
    Canceled,
}

impl NotifyError {
    /// Convert into a [`WifiTriggersError`] for propagation across port
    /// boundaries.
    pub fn into_domain(self) -> WifiTriggersError {
        match self {
            Self::Canceled => WifiTriggersError::Canceled,
            other => WifiTriggersError::Delivery(Box::new(other)),
        }
    }
}

impl From<reqwest::Error> for NotifyError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}

impl From<NotifyError> for WifiTriggersError {
    fn from(err: NotifyError) -> Self {
        err.into_domain()
    }
}
