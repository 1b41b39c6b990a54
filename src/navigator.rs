//! The navigation engine.
//!
//! [`Navigator`] owns the navigation state (`current` record and pending
//! `next` request), the [`RouteRegistry`] and the [`EventBus`]. It decides,
//! synchronously at call time, whether a navigate call is ignored, supersedes
//! the pending request, or starts fresh, and then drives the accepted request
//! through route resolution and its handler on the tokio runtime.
//!
//! # Request lifecycle
//!
//! ```text
//! navigate ──► ignored (already current / duplicate pending)  → Ok(false)
//!    │
//!    ▼
//! RESOLVING ──► no route matched                              → Err(NoRouteMatched)
//!    │
//!    ▼
//! RUNNING ───► handler Ok,  still pending                      → Ok(true), commit
//!    │    └──► handler Err, still pending                      → Err(HandlerFailed)
//!    │
//!    └─(any time)─► superseded / cancel_navigation             → Ok(false)
//! ```
//!
//! A canceled request never commits and never surfaces its handler's error,
//! whatever the handler does afterwards.
//!
//! # Redirects
//!
//! There is no redirect type. A handler that calls [`Navigator::navigate`]
//! with another url supersedes its own request like any other caller would;
//! its own outcome becomes `false` and the new navigation takes over.
//!
//! # Example
//!
//! ```
//! use navigator_core::{handler_fn, Navigator};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let navigator = Navigator::new();
//! navigator.register("/a", handler_fn(|details, _signal| async move {
//!     println!("loading {}", details.url);
//!     Ok(())
//! }));
//!
//! let first = navigator.navigate("/a/1");
//! let second = navigator.navigate("/a/2");
//! assert_eq!(first.await.unwrap(), false);
//! assert_eq!(second.await.unwrap(), true);
//! assert_eq!(navigator.current().unwrap().url, "/a/2");
//! # }
//! ```

use crate::abort::{create_signal, CancelSignal};
#[cfg(feature = "cache")]
use crate::cache::{CacheStats, ResolveCache};
use crate::error::{HandlerResult, NavigationError};
use crate::events::{EventBus, NavigationEvent};
use crate::handler::{NavigationDetails, RouteHandler};
use crate::outcome::NavigationOutcome;
use crate::registry::{RouteEntry, RouteId, RouteRegistry};
use crate::state::{
    NavigationId, NavigationPhase, NavigationRecord, NavigationSnapshot, NavigationState,
    PendingRequest,
};
use crate::{debug_log, error_log, info_log, trace_log, warn_log};
use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};
use tokio::sync::{broadcast, oneshot};

// ============================================================================
// NavigateOptions
// ============================================================================

/// Flags for [`Navigator::navigate_with`].
///
/// # Example
///
/// ```
/// use navigator_core::NavigateOptions;
///
/// let options = NavigateOptions::new().replace(true).force(true);
/// assert!(options.replace && options.force);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Replace the current history entry instead of pushing a new one.
    /// Passed through to handlers and events; the engine does not interpret it.
    pub replace: bool,

    /// Navigate even if the url is already current or already pending.
    pub force: bool,
}

impl NavigateOptions {
    /// Default options: push, not forced.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the replace flag.
    pub fn replace(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }

    /// Set the force flag.
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

// ============================================================================
// NavigatorBuilder
// ============================================================================

/// Builder for a [`Navigator`] with non-default capacities.
///
/// ```
/// use navigator_core::Navigator;
///
/// let navigator = Navigator::builder().event_capacity(256).build();
/// assert!(!navigator.is_navigating());
/// ```
#[derive(Debug, Clone)]
pub struct NavigatorBuilder {
    event_capacity: usize,
    #[cfg(feature = "cache")]
    cache_capacity: usize,
}

impl NavigatorBuilder {
    /// Start from the default configuration.
    pub fn new() -> Self {
        Self {
            event_capacity: EventBus::DEFAULT_CAPACITY,
            #[cfg(feature = "cache")]
            cache_capacity: ResolveCache::DEFAULT_CAPACITY,
        }
    }

    /// Events buffered per subscriber before slow subscribers start lagging.
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// Number of url → route resolutions kept in the LRU cache.
    #[cfg(feature = "cache")]
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Build the navigator.
    pub fn build(self) -> Navigator {
        #[cfg(feature = "cache")]
        let registry = RouteRegistry::with_cache_capacity(self.cache_capacity);
        #[cfg(not(feature = "cache"))]
        let registry = RouteRegistry::new();

        Navigator {
            shared: Arc::new(Shared {
                state: Mutex::new(NavigationState::new()),
                registry: Mutex::new(registry),
                events: EventBus::with_capacity(self.event_capacity),
            }),
        }
    }
}

impl Default for NavigatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Navigator
// ============================================================================

/// State shared between navigator handles, registrations and in-flight
/// resolution tasks.
///
/// Lock order is `state` before `registry`. Neither lock is held while a
/// handler runs.
struct Shared {
    state: Mutex<NavigationState>,
    registry: Mutex<RouteRegistry>,
    events: EventBus,
}

/// Handle to a navigation engine.
///
/// Cloning is cheap; all clones drive the same state. Create one per store
/// and thread it to whoever needs to navigate.
#[derive(Clone)]
pub struct Navigator {
    shared: Arc<Shared>,
}

impl Navigator {
    /// Create a navigator with default configuration.
    pub fn new() -> Self {
        NavigatorBuilder::new().build()
    }

    /// Configure a navigator before creating it.
    pub fn builder() -> NavigatorBuilder {
        NavigatorBuilder::new()
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Register `handler` for urls starting with `pattern`.
    ///
    /// The new route takes priority over every route registered before it.
    /// Takes effect for every navigation that has not resolved its route yet.
    pub fn register(
        &self,
        pattern: impl Into<String>,
        handler: impl RouteHandler,
    ) -> RouteRegistration {
        let pattern = pattern.into();
        let id = {
            let mut registry = self.shared.registry.lock();
            let id = registry.insert(pattern.clone(), handler);
            self.shared.events.dispatch(NavigationEvent::RoutesChanged {
                routes: registry.patterns(),
            });
            id
        };
        info_log!("Registered route '{}' ({})", pattern, id);
        RouteRegistration {
            navigator: Arc::downgrade(&self.shared),
            id,
            pattern,
        }
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Navigate to `url` (push, not forced).
    ///
    /// See [`navigate_with`](Self::navigate_with).
    pub fn navigate(&self, url: impl Into<String>) -> NavigationOutcome {
        self.navigate_with(url, NavigateOptions::default())
    }

    /// Navigate to `url`, replacing the current history entry.
    pub fn replace(&self, url: impl Into<String>) -> NavigationOutcome {
        self.navigate_with(url, NavigateOptions::new().replace(true))
    }

    /// Request a navigation.
    ///
    /// Decided synchronously:
    ///
    /// 1. `url` is already current (and not `force`): ignored, outcome `false`.
    /// 2. A request for the same `url` is pending (and not `force`): this call
    ///    is ignored with outcome `false`; the pending one carries on.
    /// 3. Otherwise any pending request is canceled (its outcome becomes
    ///    `false`) and a new request is installed.
    ///
    /// Route resolution and the handler run later on the tokio runtime, so the
    /// returned outcome is always still pending for an accepted request.
    ///
    /// # Runtime
    ///
    /// The resolution step of an accepted request is spawned, and it only waits
    /// for the caller's current synchronous turn on a **current-thread**
    /// runtime (`#[tokio::main(flavor = "current_thread")]`, `LocalSet`,
    /// `#[tokio::test]`). There, back-to-back calls like
    /// `navigate("/a/1"); navigate("/a/2");` invoke the handler once, for
    /// `/a/2` only.
    ///
    /// On a multi-thread runtime another worker may pick the step up before
    /// the next call, so a superseded request's handler can start as well.
    /// What still holds there:
    ///
    /// - the outcomes: a superseded request settles `false`,
    /// - the latest request is the one that commits,
    /// - the superseded handler's signal is aborted and its result discarded.
    ///
    /// # Panics
    ///
    /// Accepting a request spawns a tokio task, which panics outside a tokio
    /// runtime. Ignored calls (rules 1 and 2) never touch the runtime.
    pub fn navigate_with(
        &self,
        url: impl Into<String>,
        options: NavigateOptions,
    ) -> NavigationOutcome {
        let url = url.into();

        let (id, rx) = {
            let mut state = self.shared.state.lock();

            if !options.force && state.current().is_some_and(|current| current.url == url) {
                debug_log!("Navigation to '{}' ignored: already current", url);
                return NavigationOutcome::settled(url, Ok(false));
            }

            if !options.force && state.next().is_some_and(|pending| pending.url == url) {
                debug_log!("Navigation to '{}' ignored: already pending", url);
                return NavigationOutcome::settled(url, Ok(false));
            }

            if let Some(previous) = state.take_next() {
                let previous_url = previous.cancel();
                info_log!("Navigation to '{}' superseded by '{}'", previous_url, url);
                self.shared
                    .events
                    .dispatch(NavigationEvent::NavigationCanceled { url: previous_url });
            }

            let (tx, rx) = oneshot::channel();
            let id = state.next_id();
            state.install(PendingRequest::new(id, url.clone(), options.replace, tx));
            self.shared.events.dispatch(NavigationEvent::NavigationBegin {
                url: url.clone(),
                replace: options.replace,
            });
            (id, rx)
        };

        debug_log!("Navigation #{} to '{}' accepted", id, url);
        tokio::spawn(run_navigation(Arc::clone(&self.shared), id));

        NavigationOutcome::pending(url, rx)
    }

    /// Cancel the pending navigation, if any.
    ///
    /// Aborts its signal and settles its outcome `false`. Returns whether a
    /// navigation was pending.
    pub fn cancel_navigation(&self) -> bool {
        let mut state = self.shared.state.lock();
        let Some(pending) = state.take_next() else {
            trace_log!("cancel_navigation: nothing pending");
            return false;
        };
        let url = pending.cancel();
        info_log!("Navigation to '{}' canceled", url);
        self.shared
            .events
            .dispatch(NavigationEvent::NavigationCanceled { url });
        true
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Copy of `{ current, next }`.
    pub fn snapshot(&self) -> NavigationSnapshot {
        self.shared.state.lock().snapshot()
    }

    /// The last committed navigation.
    pub fn current(&self) -> Option<NavigationRecord> {
        self.shared.state.lock().current().cloned()
    }

    /// Where the pending navigation (if any) stands.
    pub fn phase(&self) -> NavigationPhase {
        self.shared.state.lock().phase()
    }

    /// Whether a navigation is pending.
    pub fn is_navigating(&self) -> bool {
        self.phase() != NavigationPhase::Idle
    }

    /// Registered patterns, highest priority first.
    pub fn routes(&self) -> Vec<String> {
        self.shared.registry.lock().patterns()
    }

    /// Subscribe to navigation events.
    pub fn subscribe(&self) -> broadcast::Receiver<NavigationEvent> {
        self.shared.events.subscribe()
    }

    /// Route resolution cache statistics.
    #[cfg(feature = "cache")]
    pub fn cache_stats(&self) -> CacheStats {
        self.shared.registry.lock().cache_stats().clone()
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Navigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("state", &self.snapshot())
            .field("routes", &self.routes())
            .finish()
    }
}

// ============================================================================
// Resolution step
// ============================================================================

/// Resolve, run and settle one accepted navigation.
async fn run_navigation(shared: Arc<Shared>, id: NavigationId) {
    let _guard = InterruptGuard {
        shared: Arc::clone(&shared),
        id,
    };

    let Some((entry, details, signal)) = begin(&shared, id) else {
        return;
    };

    trace_log!(
        "Navigation #{}: invoking handler of '{}' for '{}'",
        id,
        details.route,
        details.url
    );
    let result = entry.handler().handle(details.clone(), signal).await;

    finish(&shared, id, details, result);
}

/// Resolve the route of a still-pending request and arm its cancel signal.
///
/// Returns `None` if the request was superseded before it got here, or if no
/// route matched (in which case it is rejected).
fn begin(
    shared: &Shared,
    id: NavigationId,
) -> Option<(Arc<RouteEntry>, NavigationDetails, CancelSignal)> {
    let mut state = shared.state.lock();

    let Some(url) = state.pending_mut(id).map(|pending| pending.url.clone()) else {
        trace_log!("Navigation #{} no longer pending, skipping resolution", id);
        return None;
    };

    let resolved = shared.registry.lock().resolve(&url);
    let Some(entry) = resolved else {
        if let Some(pending) = state.take_pending(id) {
            warn_log!("No route matched '{}'", url);
            pending.settle(Err(NavigationError::NoRouteMatched { url }));
        }
        return None;
    };

    let (signal, abort) = create_signal();
    let pending = state.pending_mut(id)?;
    pending.route = Some(entry.pattern().to_string());
    pending.abort = Some(abort);

    let details = NavigationDetails {
        url,
        route: entry.pattern().to_string(),
        replace: pending.replace,
    };
    Some((entry, details, signal))
}

/// Commit or reject a request whose handler has finished.
///
/// A request that was canceled while its handler ran is gone from the state
/// already; whatever the handler produced is discarded.
fn finish(shared: &Shared, id: NavigationId, details: NavigationDetails, result: HandlerResult) {
    let mut state = shared.state.lock();

    let Some(pending) = state.take_pending(id) else {
        match result {
            Ok(()) => {
                debug_log!(
                    "Navigation to '{}' finished after cancellation, discarded",
                    details.url
                );
            }
            Err(_err) => {
                debug_log!(
                    "Navigation to '{}' failed after cancellation, discarded: {}",
                    details.url,
                    _err
                );
            }
        }
        return;
    };

    let NavigationDetails {
        url,
        route,
        replace,
    } = details;

    match result {
        Ok(()) => {
            state.commit(NavigationRecord {
                url: url.clone(),
                route: route.clone(),
            });
            info_log!("Navigation complete: '{}' (route '{}')", url, route);
            pending.settle(Ok(true));
            shared.events.dispatch(NavigationEvent::NavigationEnded {
                url,
                route,
                replace,
            });
        }
        Err(source) => {
            warn_log!("Handler for '{}' failed on '{}': {}", route, url, source);
            pending.settle(Err(NavigationError::HandlerFailed { url, route, source }));
        }
    }
}

/// Settles the request as interrupted if its task is dropped while the
/// request is still pending (handler panic, runtime shutdown).
struct InterruptGuard {
    shared: Arc<Shared>,
    id: NavigationId,
}

impl Drop for InterruptGuard {
    fn drop(&mut self) {
        let mut state = self.shared.state.lock();
        if let Some(pending) = state.take_pending(self.id) {
            error_log!("Navigation to '{}' interrupted before settling", pending.url);
            let url = pending.url.clone();
            pending.settle(Err(NavigationError::Interrupted { url }));
        }
    }
}

// ============================================================================
// RouteRegistration
// ============================================================================

/// Returned by [`Navigator::register`]; removes the route again.
///
/// Dropping a registration does **not** unregister the route.
#[derive(Debug)]
pub struct RouteRegistration {
    navigator: Weak<Shared>,
    id: RouteId,
    pattern: String,
}

impl RouteRegistration {
    /// Remove exactly this registration.
    ///
    /// Idempotent: returns `true` only on the call that removed the route.
    /// Also returns `false` once the navigator itself is gone.
    pub fn unregister(&self) -> bool {
        let Some(shared) = self.navigator.upgrade() else {
            return false;
        };
        let mut registry = shared.registry.lock();
        if !registry.remove(self.id) {
            return false;
        }
        shared.events.dispatch(NavigationEvent::RoutesChanged {
            routes: registry.patterns(),
        });
        info_log!("Unregistered route '{}' ({})", self.pattern, self.id);
        true
    }

    /// Identity of the registered route.
    pub fn id(&self) -> RouteId {
        self.id
    }

    /// Pattern the route was registered with.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}
