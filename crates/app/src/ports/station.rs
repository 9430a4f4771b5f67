//! Station ports — where the set of connected clients comes from.

use std::future::Future;

use tokio_util::sync::CancellationToken;
use wifitriggers_domain::client_set::ClientSet;
use wifitriggers_domain::error::WifiTriggersError;

/// One independently queryable station list, typically one per radio
/// interface.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StationSocket {
    pub name: String,
}

impl StationSocket {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Access-point control backend exposing per-socket station lists.
pub trait StationBackend: Send + Sync {
    /// List the sockets that can be queried for stations.
    fn list_sockets(
        &self,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<Vec<StationSocket>, WifiTriggersError>> + Send;

    /// List the addresses of the stations connected through `socket`, as
    /// reported by the backend (not yet parsed).
    fn list_stations(
        &self,
        cancel: &CancellationToken,
        socket: &StationSocket,
    ) -> impl Future<Output = Result<Vec<String>, WifiTriggersError>> + Send;
}

/// Produces the current set of connected clients.
///
/// The driver only sees this capability; an error means the set could not be
/// determined accurately.
pub trait ApReader: Send + Sync {
    fn connected_clients(
        &self,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<ClientSet, WifiTriggersError>> + Send;
}

impl<T: StationBackend> StationBackend for std::sync::Arc<T> {
    fn list_sockets(
        &self,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<Vec<StationSocket>, WifiTriggersError>> + Send {
        (**self).list_sockets(cancel)
    }

    fn list_stations(
        &self,
        cancel: &CancellationToken,
        socket: &StationSocket,
    ) -> impl Future<Output = Result<Vec<String>, WifiTriggersError>> + Send {
        (**self).list_stations(cancel, socket)
    }
}

impl<T: ApReader> ApReader for std::sync::Arc<T> {
    fn connected_clients(
        &self,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<ClientSet, WifiTriggersError>> + Send {
        (**self).connected_clients(cancel)
    }
}
