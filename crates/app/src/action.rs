//! Action — side effects composed into one concurrently executing unit.
//!
//! An [`Action`] is a flat list of labelled legs. Composing two actions with
//! [`Action::and`] concatenates their legs, so `(a.and(b)).and(c)` and
//! `a.and(b.and(c))` run the same three legs side by side, and
//! [`Action::noop`] (no legs) is the identity.
//!
//! Running an action spawns every leg under one shared cancellation scope.
//! The first leg to fail cancels the scope so its siblings can stop early,
//! and that first failure is what the action reports.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use wifitriggers_domain::error::WifiTriggersError;

/// A single side effect, run with the cancellation token of its scope.
pub trait Effect: Send + Sync {
    fn run<'a>(
        &'a self,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), WifiTriggersError>>;
}

struct FnEffect<F>(F);

impl<F, Fut> Effect for FnEffect<F>
where
    F: Fn(CancellationToken) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), WifiTriggersError>> + Send + 'static,
{
    fn run<'a>(
        &'a self,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), WifiTriggersError>> {
        Box::pin((self.0)(cancel.clone()))
    }
}

#[derive(Clone)]
struct Leg {
    label: Arc<str>,
    effect: Arc<dyn Effect>,
}

/// A composable set of side effects run concurrently.
#[derive(Clone, Default)]
pub struct Action {
    legs: Vec<Leg>,
}

impl Action {
    /// The action that does nothing and always succeeds.
    #[must_use]
    pub fn noop() -> Self {
        Self::default()
    }

    /// A single-leg action.
    pub fn new(label: impl Into<Arc<str>>, effect: impl Effect + 'static) -> Self {
        Self {
            legs: vec![Leg {
                label: label.into(),
                effect: Arc::new(effect),
            }],
        }
    }

    /// A single-leg action from an async closure receiving the scope token.
    pub fn from_fn<F, Fut>(label: impl Into<Arc<str>>, f: F) -> Self
    where
        F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), WifiTriggersError>> + Send + 'static,
    {
        Self::new(label, FnEffect(f))
    }

    /// Parallel composition: run both actions' legs side by side.
    #[must_use]
    pub fn and(mut self, other: Self) -> Self {
        self.legs.extend(other.legs);
        self
    }

    /// Whether this action has no legs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Number of legs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.legs.len()
    }

    /// Labels of the legs, in composition order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.legs.iter().map(|leg| &*leg.label)
    }

    /// Run every leg concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first leg failure observed, wrapped in
    /// [`WifiTriggersError::Action`] with the leg's label. Remaining legs see
    /// their token canceled and are awaited before returning.
    pub async fn run(&self, cancel: &CancellationToken) -> Result<(), WifiTriggersError> {
        if self.legs.is_empty() {
            return Ok(());
        }

        let scope = cancel.child_token();
        let _guard = scope.clone().drop_guard();

        let mut running = JoinSet::new();
        for Leg { label, effect } in self.legs.iter().cloned() {
            let scope = scope.clone();
            running.spawn(async move {
                effect
                    .run(&scope)
                    .await
                    .map_err(|source| WifiTriggersError::Action {
                        label: label.to_string(),
                        source: Box::new(source),
                    })
            });
        }

        let mut first_failure = None;
        while let Some(joined) = running.join_next().await {
            let outcome = match joined {
                Ok(outcome) => outcome,
                Err(err) => Err(WifiTriggersError::Task(Box::new(err))),
            };
            if let Err(err) = outcome {
                if first_failure.is_none() {
                    scope.cancel();
                    first_failure = Some(err);
                } else {
                    tracing::debug!(%err, "sibling action failed after scope cancellation");
                }
            }
        }

        match first_failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.labels()).finish()
    }
}
