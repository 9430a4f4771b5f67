//! Station aggregator — fan-out/fan-in over every station socket.
//!
//! The backend is first asked for its sockets, then every socket is queried
//! concurrently under one shared cancellation scope. Results are merged into
//! a single [`ClientSet`], so a station reported by two sockets (for example
//! while roaming between radios) appears once.
//!
//! The aggregator is strict: any failing query, unparsable address or
//! cancellation fails the whole fetch. Deciding what to do without an
//! accurate client set is the driver's job.

use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use wifitriggers_domain::client_set::ClientSet;
use wifitriggers_domain::error::WifiTriggersError;

use crate::ports::{ApReader, StationBackend};

/// Merges the station lists of every socket exposed by a [`StationBackend`].
pub struct StationAggregator<B> {
    backend: Arc<B>,
}

impl<B> Clone for StationAggregator<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B> StationAggregator<B>
where
    B: StationBackend + 'static,
{
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Query every socket concurrently and merge the results.
    ///
    /// # Errors
    ///
    /// Fails if listing sockets fails, if any socket query fails, if a
    /// reported address cannot be parsed, or if `cancel` fires first.
    #[tracing::instrument(skip_all)]
    pub async fn fetch(&self, cancel: &CancellationToken) -> Result<ClientSet, WifiTriggersError> {
        let sockets = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(WifiTriggersError::Canceled),
            sockets = self.backend.list_sockets(cancel) => sockets?,
        };
        if sockets.is_empty() {
            tracing::debug!("backend reported no station sockets");
            return Ok(ClientSet::new());
        }

        let scope = cancel.child_token();
        let _guard = scope.clone().drop_guard();

        let mut queries = JoinSet::new();
        for socket in sockets {
            let backend = Arc::clone(&self.backend);
            let scope = scope.clone();
            queries.spawn(async move {
                let stations = backend.list_stations(&scope, &socket).await;
                (socket, stations)
            });
        }

        let mut clients = ClientSet::new();
        loop {
            let joined = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(WifiTriggersError::Canceled),
                joined = queries.join_next() => joined,
            };
            let Some(joined) = joined else {
                break;
            };
            let (socket, stations) = joined.map_err(|err| WifiTriggersError::Task(Box::new(err)))?;
            let stations = stations.inspect_err(|err| {
                tracing::debug!(%err, socket = %socket.name, "station query failed");
            })?;
            tracing::debug!(socket = %socket.name, stations = stations.len(), "station query complete");
            for raw in stations {
                clients.insert(raw.parse()?);
            }
        }

        Ok(clients)
    }
}

impl<B> ApReader for StationAggregator<B>
where
    B: StationBackend + 'static,
{
    fn connected_clients(
        &self,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<ClientSet, WifiTriggersError>> + Send {
        self.fetch(cancel)
    }
}
