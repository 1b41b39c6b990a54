//! Cooperative cancellation signals for in-flight navigations.
//!
//! Every navigation that reaches its handler gets a fresh [`CancelSignal`]
//! paired with a one-shot [`AbortHandle`]. The navigator keeps the handle on
//! its pending request and fires it when the request is superseded or
//! canceled; the handler holds the signal and may consult it.
//!
//! Cancellation is cooperative. Aborting a signal never stops the handler's
//! future, it only tells the handler that its result will be discarded.
//!
//! # Examples
//!
//! ```
//! use navigator_core::abort::create_signal;
//!
//! let (signal, abort) = create_signal();
//! assert!(!signal.is_aborted());
//!
//! assert!(abort.abort());
//! assert!(!abort.abort()); // one-shot
//! assert!(signal.is_aborted());
//! assert!(signal.check().is_err());
//! ```

use crate::error::Aborted;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Default)]
struct SignalState {
    aborted: AtomicBool,
    notify: Notify,
}

/// Create a fresh signal together with the handle that aborts it.
pub fn create_signal() -> (CancelSignal, AbortHandle) {
    let state = Arc::new(SignalState::default());
    (
        CancelSignal {
            state: Arc::clone(&state),
        },
        AbortHandle { state },
    )
}

/// Read side of a cancellation flag, handed to route handlers.
///
/// Flips from unset to aborted at most once. Cloning is cheap and every
/// clone observes the same flag.
#[derive(Clone)]
pub struct CancelSignal {
    state: Arc<SignalState>,
}

impl CancelSignal {
    /// Whether the navigation this signal belongs to has been abandoned.
    pub fn is_aborted(&self) -> bool {
        self.state.aborted.load(Ordering::Acquire)
    }

    /// `Err(Aborted)` once the signal has fired, for early returns with `?`.
    pub fn check(&self) -> Result<(), Aborted> {
        if self.is_aborted() {
            Err(Aborted)
        } else {
            Ok(())
        }
    }

    /// Resolves once the signal is aborted.
    ///
    /// Resolves immediately if it already is. Typically raced against the
    /// handler's own work with `tokio::select!`.
    pub async fn aborted(&self) {
        loop {
            let notified = self.state.notify.notified();
            if self.is_aborted() {
                return;
            }
            notified.await;
        }
    }
}

impl fmt::Debug for CancelSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelSignal")
            .field("aborted", &self.is_aborted())
            .finish()
    }
}

/// Write side of a cancellation flag. Owned by the navigator.
pub struct AbortHandle {
    state: Arc<SignalState>,
}

impl AbortHandle {
    /// Flip the signal to aborted and wake anything waiting on it.
    ///
    /// Returns `true` only for the call that actually flipped the flag.
    pub fn abort(&self) -> bool {
        let flipped = self
            .state
            .aborted
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if flipped {
            self.state.notify.notify_waiters();
        }
        flipped
    }

    /// Whether [`abort`](Self::abort) has already fired.
    pub fn is_aborted(&self) -> bool {
        self.state.aborted.load(Ordering::Acquire)
    }

    /// Another read view of the flag this handle controls.
    pub fn signal(&self) -> CancelSignal {
        CancelSignal {
            state: Arc::clone(&self.state),
        }
    }
}

impl fmt::Debug for AbortHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AbortHandle")
            .field("aborted", &self.is_aborted())
            .finish()
    }
}
