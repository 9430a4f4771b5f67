//! HTTP client for the station backend.
//!
//! The backend exposes two read-only resources:
//!
//! - `GET {base}/sockets` → `{"sockets": [{"name": "wlan0"}]}`
//! - `GET {base}/sockets/{name}/clients` → `{"clients": [{"addr": "aa:bb:cc:dd:ee:ff"}]}`

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use url::Url;
use wifitriggers_app::ports::{StationBackend, StationSocket};
use wifitriggers_domain::error::WifiTriggersError;

use crate::config::HostapdConfig;
use crate::error::HostapdError;

const BODY_PREVIEW: usize = 200;

#[derive(Debug, Deserialize)]
struct SocketsResponse {
    sockets: Vec<SocketEntry>,
}

#[derive(Debug, Deserialize)]
struct SocketEntry {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ClientsResponse {
    clients: Vec<ClientEntry>,
}

#[derive(Debug, Deserialize)]
struct ClientEntry {
    addr: String,
}

/// Station backend reached over HTTP.
#[derive(Debug, Clone)]
pub struct HostapdClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HostapdClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Fails if the URL is invalid or the HTTP client cannot be built.
    pub fn new(config: &HostapdConfig) -> Result<Self, HostapdError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("wifitriggers/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::from_reqwest(&config.url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Fails if `base_url` is not an absolute URL that can carry a path.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, HostapdError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(HostapdError::BaseUrl(base_url.into()));
        }
        Ok(Self { http, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append percent-encoded path segments to the base URL.
    fn url(&self, segments: &[&str]) -> Result<Url, HostapdError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| HostapdError::BaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        url: Url,
    ) -> Result<T, HostapdError> {
        tracing::trace!(%url, "GET");
        let request = async {
            let resp = self.http.get(url).send().await?;
            let status = resp.status();
            let body = resp.text().await?;
            if !status.is_success() {
                return Err(HostapdError::Status {
                    status: status.as_u16(),
                    body: body.chars().take(BODY_PREVIEW).collect(),
                });
            }
            serde_json::from_str(&body).map_err(HostapdError::Decode)
        };

        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(HostapdError::Canceled),
            result = request => result,
        }
    }

    /// List the backend's station sockets.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-success statuses, malformed bodies or
    /// cancellation.
    pub async fn sockets(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<StationSocket>, HostapdError> {
        let url = self.url(&["sockets"])?;
        let response: SocketsResponse = self.get(cancel, url).await?;
        Ok(response
            .sockets
            .into_iter()
            .map(|entry| StationSocket::new(entry.name))
            .collect())
    }

    /// List the raw addresses of the stations connected through `socket`.
    ///
    /// # Errors
    ///
    /// See [`sockets`](Self::sockets).
    pub async fn stations(
        &self,
        cancel: &CancellationToken,
        socket: &StationSocket,
    ) -> Result<Vec<String>, HostapdError> {
        let url = self.url(&["sockets", &socket.name, "clients"])?;
        let response: ClientsResponse = self.get(cancel, url).await?;
        Ok(response.clients.into_iter().map(|entry| entry.addr).collect())
    }
}

impl StationBackend for HostapdClient {
    fn list_sockets(
        &self,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<Vec<StationSocket>, WifiTriggersError>> + Send {
        async move { Ok(self.sockets(cancel).await?) }
    }

    fn list_stations(
        &self,
        cancel: &CancellationToken,
        socket: &StationSocket,
    ) -> impl Future<Output = Result<Vec<String>, WifiTriggersError>> + Send {
        async move { Ok(self.stations(cancel, socket).await?) }
    }
}
