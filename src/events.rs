//! Navigation events and the bus that carries them.
//!
//! The bus is the only channel through which outside code (UI, history
//! synchronization) observes transitions. Events are emitted at exactly these
//! points:
//!
//! | Event | Emitted when |
//! |-------|--------------|
//! | [`RoutesChanged`](NavigationEvent::RoutesChanged) | a route is registered or unregistered |
//! | [`NavigationBegin`](NavigationEvent::NavigationBegin) | a request is installed as the pending navigation |
//! | [`NavigationCanceled`](NavigationEvent::NavigationCanceled) | the pending request is canceled or superseded |
//! | [`NavigationEnded`](NavigationEvent::NavigationEnded) | the pending request commits |
//!
//! `NavigationEnded` fires once per committed navigation and never on
//! cancellation or failure.

use tokio::sync::broadcast;

/// A state transition observable on the [`EventBus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    /// The set of registered routes changed. Informational.
    RoutesChanged {
        /// Registered patterns, highest priority first.
        routes: Vec<String>,
    },

    /// A navigation request was accepted and is now pending.
    NavigationBegin {
        /// The requested url
        url: String,
        /// Whether the navigation replaces the current history entry
        replace: bool,
    },

    /// The pending navigation was abandoned.
    NavigationCanceled {
        /// Url of the abandoned request
        url: String,
    },

    /// The pending navigation committed and is now current.
    NavigationEnded {
        /// The committed url
        url: String,
        /// Pattern of the route whose handler completed
        route: String,
        /// Whether the navigation replaces the current history entry
        replace: bool,
    },
}

impl NavigationEvent {
    /// The url this event concerns, if it concerns a navigation.
    pub fn url(&self) -> Option<&str> {
        match self {
            NavigationEvent::RoutesChanged { .. } => None,
            NavigationEvent::NavigationBegin { url, .. }
            | NavigationEvent::NavigationCanceled { url }
            | NavigationEvent::NavigationEnded { url, .. } => Some(url),
        }
    }
}

/// Broadcast bus for [`NavigationEvent`]s.
///
/// Subscribers that fall more than the configured capacity behind lose the
/// oldest events (`RecvError::Lagged`).
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<NavigationEvent>,
}

impl EventBus {
    /// Default number of buffered events per subscriber.
    pub const DEFAULT_CAPACITY: usize = 64;

    /// Create a bus with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create a bus buffering up to `capacity` events (clamped to at least 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Subscribe to events dispatched from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<NavigationEvent> {
        self.tx.subscribe()
    }

    /// Publish an event. Events without subscribers are dropped.
    pub fn dispatch(&self, event: NavigationEvent) {
        let _ = self.tx.send(event);
    }

    /// Number of live subscribers.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
