//! Idempotent external switch.
//!
//! A [`Switch`] remembers which state it last delivered and only calls its
//! [`Delivery`] when asked for a different one, so a condition that keeps
//! holding tick after tick produces a single notification. A failed delivery
//! drops the belief back to [`SwitchState::Unknown`], which makes the next
//! matching tick deliver again.
//!
//! As an [`Action`] leg the switch contains its own delivery failures, so a
//! broken provider never cancels transitions on other switches.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use wifitriggers_domain::error::WifiTriggersError;
use wifitriggers_domain::switch_state::SwitchState;

use crate::action::{Action, Effect};
use crate::ports::Delivery;

/// On/off state machine wrapping an external delivery effect.
pub struct Switch<D: Delivery> {
    name: String,
    delivery: D,
    on: D::Payload,
    off: D::Payload,
    state: Mutex<SwitchState>,
}

impl<D: Delivery> Switch<D> {
    /// Create a switch in the [`Unknown`](SwitchState::Unknown) state.
    ///
    /// `on` and `off` are the payloads delivered when entering each state.
    pub fn new(name: impl Into<String>, delivery: D, on: D::Payload, off: D::Payload) -> Self {
        Self {
            name: name.into(),
            delivery,
            on,
            off,
            state: Mutex::new(SwitchState::Unknown),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current belief about the external state.
    pub async fn state(&self) -> SwitchState {
        *self.state.lock().await
    }

    /// Forget the current belief so the next transition delivers again.
    pub async fn invalidate(&self) {
        *self.state.lock().await = SwitchState::Unknown;
    }

    /// Configured payload for `target`, if it is deliverable.
    #[must_use]
    pub fn payload(&self, target: SwitchState) -> Option<&D::Payload> {
        match target {
            SwitchState::On => Some(&self.on),
            SwitchState::Off => Some(&self.off),
            SwitchState::Unknown => None,
        }
    }

    /// Move to `desired`, delivering `payload` unless already there.
    ///
    /// Holds the switch lock for the whole delivery, so concurrent
    /// transitions on the same switch are serialized.
    ///
    /// # Errors
    ///
    /// Returns [`WifiTriggersError::InvalidTarget`] for `Unknown`, or the
    /// delivery error, in which case the state is left `Unknown`.
    #[tracing::instrument(skip(self, cancel, payload), fields(switch = %self.name))]
    pub async fn transition(
        &self,
        cancel: &CancellationToken,
        desired: SwitchState,
        payload: &D::Payload,
    ) -> Result<(), WifiTriggersError> {
        if !desired.is_known() {
            return Err(WifiTriggersError::InvalidTarget {
                switch: self.name.clone(),
            });
        }

        let mut state = self.state.lock().await;
        if *state == desired {
            tracing::trace!(state = %desired, "already in desired state");
            return Ok(());
        }

        // Stays unknown if the delivery fails or is dropped mid-flight.
        *state = SwitchState::Unknown;
        match self.delivery.deliver(cancel, payload).await {
            Ok(()) => {
                tracing::info!(%payload, state = %desired, "delivered");
                *state = desired;
                Ok(())
            }
            Err(err) if err.is_canceled() => {
                tracing::debug!(%payload, state = %desired, "delivery canceled, state is now unknown");
                Err(err)
            }
            Err(err) => {
                tracing::warn!(%err, %payload, state = %desired, "delivery failed, state is now unknown");
                Err(err)
            }
        }
    }

    /// Move to `desired` using the configured payload.
    ///
    /// # Errors
    ///
    /// See [`transition`](Self::transition).
    pub async fn set(
        &self,
        cancel: &CancellationToken,
        desired: SwitchState,
    ) -> Result<(), WifiTriggersError> {
        let Some(payload) = self.payload(desired) else {
            return Err(WifiTriggersError::InvalidTarget {
                switch: self.name.clone(),
            });
        };
        self.transition(cancel, desired, payload).await
    }

    /// Action turning this switch on.
    pub fn on_action(self: &Arc<Self>) -> Action {
        self.action(SwitchState::On)
    }

    /// Action turning this switch off.
    pub fn off_action(self: &Arc<Self>) -> Action {
        self.action(SwitchState::Off)
    }

    fn action(self: &Arc<Self>, target: SwitchState) -> Action {
        Action::new(
            format!("{}:{target}", self.name),
            Transition {
                switch: Arc::clone(self),
                target,
            },
        )
    }
}

struct Transition<D: Delivery> {
    switch: Arc<Switch<D>>,
    target: SwitchState,
}

impl<D: Delivery> Effect for Transition<D> {
    fn run<'a>(
        &'a self,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), WifiTriggersError>> {
        Box::pin(async move {
            match self.switch.set(cancel, self.target).await {
                // Already logged by the switch; the next tick retries.
                Err(WifiTriggersError::Delivery(_)) => Ok(()),
                other => other,
            }
        })
    }
}
