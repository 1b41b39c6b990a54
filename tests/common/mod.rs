//! Test utilities for navigation tests
//!
//! Provides recording handlers, gates and event helpers shared by the
//! integration tests.

#![allow(dead_code)]

use navigator_core::*;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, Notify};

/// Route logs into the test harness output.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Records every invocation a handler receives.
#[derive(Clone, Default)]
pub struct Calls {
    seen: Arc<Mutex<Vec<NavigationDetails>>>,
}

impl Calls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, details: &NavigationDetails) {
        self.seen.lock().push(details.clone());
    }

    pub fn count(&self) -> usize {
        self.seen.lock().len()
    }

    pub fn urls(&self) -> Vec<String> {
        self.seen.lock().iter().map(|d| d.url.clone()).collect()
    }

    pub fn all(&self) -> Vec<NavigationDetails> {
        self.seen.lock().clone()
    }
}

/// Handler that records its calls and succeeds immediately.
pub fn recording(calls: &Calls) -> impl RouteHandler {
    let calls = calls.clone();
    sync_handler_fn(move |details, _signal| {
        calls.record(&details);
        Ok(())
    })
}

/// Handler that always fails with `message`.
pub fn failing(message: &'static str) -> impl RouteHandler {
    sync_handler_fn(move |_, _| Err(HandlerError::from(message)))
}

/// Lets a test decide when a gated handler finishes.
#[derive(Clone, Default)]
pub struct Gate {
    notify: Arc<Notify>,
    entered: Arc<AtomicUsize>,
}

impl Gate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Release one waiting (or the next) handler.
    pub fn open(&self) {
        self.notify.notify_one();
    }

    /// Number of handlers that reached the gate.
    pub fn entered(&self) -> usize {
        self.entered.load(Ordering::SeqCst)
    }

    async fn pass(&self) {
        self.entered.fetch_add(1, Ordering::SeqCst);
        self.notify.notified().await;
    }
}

/// What a gated handler saw once it was released.
#[derive(Clone, Default)]
pub struct SignalProbe {
    aborted_after_gate: Arc<Mutex<Vec<bool>>>,
}

impl SignalProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observed(&self) -> Vec<bool> {
        self.aborted_after_gate.lock().clone()
    }
}

/// Handler that records its call, waits at `gate`, then fails with
/// `fail_with` if given.
pub fn gated(
    calls: &Calls,
    gate: &Gate,
    probe: &SignalProbe,
    fail_with: Option<&'static str>,
) -> impl RouteHandler {
    let calls = calls.clone();
    let gate = gate.clone();
    let probe = probe.clone();
    handler_fn(move |details, signal| {
        let calls = calls.clone();
        let gate = gate.clone();
        let probe = probe.clone();
        async move {
            calls.record(&details);
            gate.pass().await;
            probe.aborted_after_gate.lock().push(signal.is_aborted());
            match fail_with {
                Some(message) => Err(HandlerError::from(message)),
                None => Ok(()),
            }
        }
    })
}

/// Yield to the runtime until nothing is pending (bounded).
pub async fn run_until_idle(navigator: &Navigator) {
    for _ in 0..100 {
        if !navigator.is_navigating() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("navigator still busy: {:?}", navigator.snapshot());
}

/// Yield to the runtime until the pending handler is running (bounded).
pub async fn run_until_running(navigator: &Navigator) {
    for _ in 0..100 {
        if navigator.phase() == NavigationPhase::Running {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("navigation never reached its handler: {:?}", navigator.snapshot());
}

/// Drain every event received so far.
pub fn drain(rx: &mut broadcast::Receiver<NavigationEvent>) -> Vec<NavigationEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

pub fn begin(url: &str) -> NavigationEvent {
    NavigationEvent::NavigationBegin {
        url: url.to_string(),
        replace: false,
    }
}

pub fn canceled(url: &str) -> NavigationEvent {
    NavigationEvent::NavigationCanceled {
        url: url.to_string(),
    }
}

pub fn ended(url: &str, route: &str) -> NavigationEvent {
    NavigationEvent::NavigationEnded {
        url: url.to_string(),
        route: route.to_string(),
        replace: false,
    }
}

pub fn record(url: &str, route: &str) -> NavigationRecord {
    NavigationRecord {
        url: url.to_string(),
        route: route.to_string(),
    }
}

/// Give spawned tasks (including canceled handlers) a chance to finish.
pub async fn settle_tasks() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}
