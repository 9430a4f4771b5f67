//! Polling driver — fetch, evaluate and act once per tick.
//!
//! The driver owns the schedule. Ticks never overlap: each one fetches the
//! client set, evaluates the [`Engine`] and runs the composed [`Action`],
//! all bounded by a deadline one interval away. Every failure inside a tick
//! is logged and contained there; only cancellation of the outer token stops
//! the loop.
//!
//! A failed fetch is treated as an empty client set ("nobody is connected").
//! This is the only place in the crate where a failure degrades instead of
//! propagating.

use std::error::Error as _;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use wifitriggers_domain::client_set::ClientSet;
use wifitriggers_domain::error::WifiTriggersError;

use crate::action::Action;
use crate::engine::Engine;
use crate::ports::ApReader;

/// What happened during one tick.
#[derive(Debug, Default)]
pub struct TickReport {
    /// The client set the engine was evaluated against.
    pub clients: ClientSet,
    /// Why the fetch failed, if it did. `clients` is empty in that case.
    pub fetch_error: Option<WifiTriggersError>,
    /// Why the composed action failed, if it did.
    pub action_error: Option<WifiTriggersError>,
    /// Labels of every action leg that was run.
    pub actions: Vec<String>,
}

impl TickReport {
    /// Whether the tick completed without any contained failure.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.fetch_error.is_none() && self.action_error.is_none()
    }
}

/// Periodically reconciles switches against the connected clients.
pub struct Driver<R> {
    reader: R,
    engine: Engine,
    interval: Duration,
}

impl<R: ApReader> Driver<R> {
    /// # Errors
    ///
    /// Returns [`WifiTriggersError::ZeroInterval`] if `interval` is zero.
    pub fn new(reader: R, engine: Engine, interval: Duration) -> Result<Self, WifiTriggersError> {
        if interval.is_zero() {
            return Err(WifiTriggersError::ZeroInterval);
        }
        Ok(Self {
            reader,
            engine,
            interval,
        })
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Tick every interval until `cancel` fires.
    ///
    /// The first tick fires one interval after the call. A tick that overruns
    /// makes the schedule skip the missed slots rather than bunch them up.
    ///
    /// # Errors
    ///
    /// Only ever returns [`WifiTriggersError::Canceled`], once `cancel` has
    /// fired.
    pub async fn run(&self, cancel: &CancellationToken) -> Result<(), WifiTriggersError> {
        let mut ticker = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(
            interval = ?self.interval,
            bindings = self.engine.len(),
            "driver started"
        );

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    tracing::info!("driver stopped");
                    return Err(WifiTriggersError::Canceled);
                }
                _ = ticker.tick() => {}
            }

            let report = self.tick(cancel).await;
            tracing::debug!(
                clients = report.clients.len(),
                actions = ?report.actions,
                clean = report.is_clean(),
                "tick complete"
            );
        }
    }

    /// Run a single tick under a deadline of one interval.
    #[tracing::instrument(skip_all)]
    pub async fn tick(&self, cancel: &CancellationToken) -> TickReport {
        let scope = cancel.child_token();
        let _guard = scope.clone().drop_guard();
        let deadline = Instant::now() + self.interval;

        let fetched =
            tokio::time::timeout_at(deadline, self.reader.connected_clients(&scope)).await;
        let (clients, fetch_error) = match fetched {
            Ok(Ok(clients)) => (clients, None),
            Ok(Err(err)) => {
                tracing::warn!(error = %chain(&err), "fetch failed, treating client set as empty");
                (ClientSet::new(), Some(err))
            }
            Err(_) => {
                tracing::warn!("fetch missed the tick deadline, treating client set as empty");
                (ClientSet::new(), Some(WifiTriggersError::DeadlineExceeded))
            }
        };

        if cancel.is_cancelled() {
            tracing::debug!("driver canceled during fetch, skipping actions");
            return TickReport {
                clients,
                fetch_error,
                ..TickReport::default()
            };
        }

        tracing::debug!(clients = clients.len(), "evaluating bindings");
        let action = self.engine.evaluate(&clients);
        let actions = action.labels().map(str::to_owned).collect();
        let action_error = Self::act(&action, &scope, deadline).await;

        TickReport {
            clients,
            fetch_error,
            action_error,
            actions,
        }
    }

    async fn act(
        action: &Action,
        scope: &CancellationToken,
        deadline: Instant,
    ) -> Option<WifiTriggersError> {
        if action.is_empty() {
            return None;
        }
        match tokio::time::timeout_at(deadline, action.run(scope)).await {
            Ok(Ok(())) => None,
            Ok(Err(err)) => {
                tracing::warn!(error = %chain(&err), "action failed");
                Some(err)
            }
            Err(_) => {
                tracing::warn!(actions = ?action, "actions missed the tick deadline");
                Some(WifiTriggersError::DeadlineExceeded)
            }
        }
    }
}

/// `outer: inner: innermost` rendering of an error and its sources.
fn chain(err: &WifiTriggersError) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}
