//! Station backend adapter error types.

use wifitriggers_domain::error::WifiTriggersError;

/// Errors specific to the station backend adapter.
#[derive(Debug, thiserror::Error)]
pub enum HostapdError {
    /// The configured base URL does not parse.
    #[error("invalid backend URL")]
    Url(#[from] url::ParseError),

    /// The base URL parses but cannot carry a path (e.g. `mailto:`).
    #[error("backend URL {0} cannot be used as a base")]
    BaseUrl(String),

    /// The HTTP client failed (connect, timeout, body read).
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// The response body was not the expected JSON document.
    #[error("failed to decode backend response")]
    Decode(#[source] serde_json::Error),

    /// The request was abandoned because its token fired.
    #[error("request canceled")]
    Canceled,
}

impl HostapdError {
    /// Convert into a [`WifiTriggersError`] for propagation across port
    /// boundaries.
    pub fn into_domain(self) -> WifiTriggersError {
        match self {
            Self::Canceled => WifiTriggersError::Canceled,
            other => WifiTriggersError::Backend(Box::new(other)),
        }
    }
}

impl From<HostapdError> for WifiTriggersError {
    fn from(err: HostapdError) -> Self {
        err.into_domain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_status_error() {
        let err = HostapdError::Status {
            status: 503,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "backend returned HTTP 503");
    }

    #[test]
    fn should_convert_status_to_backend_error() {
        let err: WifiTriggersError = HostapdError::Status {
            status: 500,
            body: "boom".to_string(),
        }
        .into();
        assert!(matches!(err, WifiTriggersError::Backend(_)));
    }

    #[test]
    fn should_convert_canceled_to_domain_canceled() {
        let err: WifiTriggersError = HostapdError::Canceled.into();
        assert!(matches!(err, WifiTriggersError::Canceled));
    }

    #[test]
    fn should_convert_decode_error_to_backend_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{{bad").unwrap_err();
        let err: WifiTriggersError = HostapdError::Decode(json_err).into();
        assert!(matches!(err, WifiTriggersError::Backend(_)));
    }
}
