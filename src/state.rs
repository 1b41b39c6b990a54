//! Navigator state management

use crate::abort::AbortHandle;
use crate::error::NavigationError;
use tokio::sync::oneshot;

/// Outcome delivered to the caller of `navigate`.
pub(crate) type Outcome = Result<bool, NavigationError>;

/// The last successfully committed navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRecord {
    /// Url that was navigated to
    pub url: String,
    /// Pattern of the route that handled it
    pub route: String,
}

/// Read-only view of the pending navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSnapshot {
    /// Url being navigated to
    pub url: String,
    /// Matched route pattern, `None` until the route has been resolved
    pub route: Option<String>,
}

/// Read-only copy of the navigator state: `{ current, next }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationSnapshot {
    /// Last committed navigation
    pub current: Option<NavigationRecord>,
    /// Navigation in flight
    pub next: Option<PendingSnapshot>,
}

/// Where the navigator currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPhase {
    /// No navigation pending
    Idle,
    /// A navigation is pending and its route is not resolved yet
    Resolving,
    /// The matched handler is running
    Running,
}

/// Identity of one accepted navigate call.
pub(crate) type NavigationId = u64;

/// The single in-flight navigation.
///
/// Owned exclusively by [`NavigationState`]; once taken out of it the request
/// is settled by value, which makes double settlement impossible.
pub(crate) struct PendingRequest {
    pub(crate) id: NavigationId,
    pub(crate) url: String,
    pub(crate) route: Option<String>,
    pub(crate) replace: bool,
    /// Set once the route resolves and the handler is about to run.
    pub(crate) abort: Option<AbortHandle>,
    settle: oneshot::Sender<Outcome>,
}

impl PendingRequest {
    pub(crate) fn new(
        id: NavigationId,
        url: String,
        replace: bool,
        settle: oneshot::Sender<Outcome>,
    ) -> Self {
        Self {
            id,
            url,
            route: None,
            replace,
            abort: None,
            settle,
        }
    }

    /// Abort the signal (if one was created) and settle `false`.
    pub(crate) fn cancel(self) -> String {
        if let Some(abort) = &self.abort {
            abort.abort();
        }
        let Self { url, settle, .. } = self;
        let _ = settle.send(Ok(false));
        url
    }

    /// Deliver the final outcome. A caller that dropped its outcome is fine.
    pub(crate) fn settle(self, outcome: Outcome) {
        let _ = self.settle.send(outcome);
    }

    fn snapshot(&self) -> PendingSnapshot {
        PendingSnapshot {
            url: self.url.clone(),
            route: self.route.clone(),
        }
    }
}

/// Navigator state: `current` record plus the pending `next` request.
///
/// `current` changes only through [`commit`](Self::commit); at most one
/// request is pending at any time.
#[derive(Default)]
pub(crate) struct NavigationState {
    current: Option<NavigationRecord>,
    next: Option<PendingRequest>,
    /// Navigation ID counter, one per accepted navigate call
    last_id: NavigationId,
}

impl NavigationState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn current(&self) -> Option<&NavigationRecord> {
        self.current.as_ref()
    }

    pub(crate) fn next(&self) -> Option<&PendingRequest> {
        self.next.as_ref()
    }

    /// Allocate the id for a newly accepted navigation.
    pub(crate) fn next_id(&mut self) -> NavigationId {
        self.last_id += 1;
        self.last_id
    }

    /// The pending request, if it is still the one identified by `id`.
    pub(crate) fn pending_mut(&mut self, id: NavigationId) -> Option<&mut PendingRequest> {
        self.next.as_mut().filter(|pending| pending.id == id)
    }

    /// Take the pending request out, if it is still the one identified by `id`.
    pub(crate) fn take_pending(&mut self, id: NavigationId) -> Option<PendingRequest> {
        if self.next.as_ref().is_some_and(|pending| pending.id == id) {
            self.next.take()
        } else {
            None
        }
    }

    /// Take whatever request is pending.
    pub(crate) fn take_next(&mut self) -> Option<PendingRequest> {
        self.next.take()
    }

    /// Install a freshly accepted request. The slot must be empty.
    pub(crate) fn install(&mut self, pending: PendingRequest) {
        debug_assert!(self.next.is_none(), "a pending request was overwritten");
        self.next = Some(pending);
    }

    pub(crate) fn commit(&mut self, record: NavigationRecord) {
        self.current = Some(record);
    }

    pub(crate) fn phase(&self) -> NavigationPhase {
        match &self.next {
            None => NavigationPhase::Idle,
            Some(pending) if pending.abort.is_some() => NavigationPhase::Running,
            Some(_) => NavigationPhase::Resolving,
        }
    }

    pub(crate) fn snapshot(&self) -> NavigationSnapshot {
        NavigationSnapshot {
            current: self.current.clone(),
            next: self.next.as_ref().map(PendingRequest::snapshot),
        }
    }
}
