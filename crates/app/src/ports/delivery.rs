//! Delivery port — pushes a payload to an external notification provider.

use std::fmt::Display;
use std::future::Future;

use tokio_util::sync::CancellationToken;
use wifitriggers_domain::error::WifiTriggersError;

/// An external effect that a [`Switch`](crate::switch::Switch) fires when its
/// state changes.
///
/// Implementations should abort with [`WifiTriggersError::Canceled`] once
/// `cancel` fires.
pub trait Delivery: Send + Sync + 'static {
    /// What is delivered, e.g. a trigger command or a message text.
    type Payload: Display + Send + Sync + 'static;

    fn deliver(
        &self,
        cancel: &CancellationToken,
        payload: &Self::Payload,
    ) -> impl Future<Output = Result<(), WifiTriggersError>> + Send;
}

impl<T: Delivery> Delivery for std::sync::Arc<T> {
    type Payload = T::Payload;

    fn deliver(
        &self,
        cancel: &CancellationToken,
        payload: &Self::Payload,
    ) -> impl Future<Output = Result<(), WifiTriggersError>> + Send {
        (**self).deliver(cancel, payload)
    }
}
