//! Request plumbing shared by both providers.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::NotifyError;

const BODY_PREVIEW: usize = 200;

pub(crate) fn build_client(timeout_secs: u64) -> Result<reqwest::Client, NotifyError> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("wifitriggers/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Send `request`, racing it against `cancel`, and fail on non-2xx.
pub(crate) async fn send(
    cancel: &CancellationToken,
    provider: &'static str,
    request: reqwest::RequestBuilder,
) -> Result<(), NotifyError> {
    let exchange = async {
        let resp = request.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(NotifyError::Status {
            provider,
            status: status.as_u16(),
            body: body.chars().take(BODY_PREVIEW).collect(),
        })
    };

    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(NotifyError::Canceled),
        result = exchange => result,
    }
}
