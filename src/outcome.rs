//! The future returned by `navigate`.

use crate::error::NavigationError;
use crate::state::Outcome;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// Eventual result of a navigate call.
///
/// Resolves to:
///
/// - `Ok(true)` when the navigation committed,
/// - `Ok(false)` when it was ignored, superseded or canceled,
/// - `Err(_)` when it was rejected.
///
/// The navigation proceeds whether or not the outcome is awaited; dropping it
/// only discards the result.
#[must_use = "the outcome reports whether the navigation committed"]
#[derive(Debug)]
pub struct NavigationOutcome {
    url: String,
    inner: Inner,
}

#[derive(Debug)]
enum Inner {
    Settled(Option<Outcome>),
    Pending(oneshot::Receiver<Outcome>),
}

impl NavigationOutcome {
    /// An outcome that is already known when `navigate` returns.
    pub(crate) fn settled(url: String, outcome: Outcome) -> Self {
        Self {
            url,
            inner: Inner::Settled(Some(outcome)),
        }
    }

    /// An outcome the engine will deliver later through `rx`.
    pub(crate) fn pending(url: String, rx: oneshot::Receiver<Outcome>) -> Self {
        Self {
            url,
            inner: Inner::Pending(rx),
        }
    }

    /// The url this outcome belongs to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether the navigate call was short-circuited (already-current or
    /// duplicate url) and never reached the engine.
    pub fn is_settled(&self) -> bool {
        matches!(self.inner, Inner::Settled(_))
    }
}

impl Future for NavigationOutcome {
    type Output = Result<bool, NavigationError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match &mut this.inner {
            Inner::Settled(outcome) => Poll::Ready(outcome.take().unwrap_or(Ok(false))),
            Inner::Pending(rx) => match Pin::new(rx).poll(cx) {
                Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
                // Sender dropped without settling.
                Poll::Ready(Err(_)) => Poll::Ready(Err(NavigationError::Interrupted {
                    url: this.url.clone(),
                })),
                Poll::Pending => Poll::Pending,
            },
        }
    }
}
