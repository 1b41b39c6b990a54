//! Route handlers.
//!
//! A handler reacts to a navigation that resolved to its pattern. It receives
//! the [`NavigationDetails`] and the request's [`CancelSignal`] and returns a
//! future. The navigator commits the navigation when that future resolves to
//! `Ok(())` and the request has not been canceled in the meantime.
//!
//! # Creating handlers
//!
//! | Approach | When to use |
//! |----------|-------------|
//! | Implement [`RouteHandler`] | Full control, handler carries its own state |
//! | [`handler_fn`] | Async closure (fetch data, lazy loading) |
//! | [`sync_handler_fn`] | Plain closure with no asynchronous work |
//!
//! # Example
//!
//! ```
//! use navigator_core::{handler_fn, sync_handler_fn, HandlerError};
//!
//! let page = handler_fn(|details, signal| async move {
//!     // fetch data for details.url ...
//!     signal.check()?;
//!     Ok(())
//! });
//!
//! let fallback = sync_handler_fn(|details, _signal| {
//!     if details.url.starts_with("/admin") {
//!         return Err(HandlerError::from("forbidden"));
//!     }
//!     Ok(())
//! });
//! # let _ = (page, fallback);
//! ```

use crate::abort::CancelSignal;
use crate::error::HandlerResult;
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by [`RouteHandler::handle`].
pub type HandlerFuture = Pin<Box<dyn Future<Output = HandlerResult> + Send + 'static>>;

/// What a handler is asked to navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationDetails {
    /// The requested url
    pub url: String,

    /// The pattern of the route that matched the url
    pub route: String,

    /// Whether the navigation should replace the current history entry
    pub replace: bool,
}

/// A handler invoked when a navigation resolves to its route.
///
/// `handle` is called without any navigator lock held, so a handler may call
/// back into the navigator (navigate elsewhere to redirect, or cancel).
pub trait RouteHandler: Send + Sync + 'static {
    /// Start handling the navigation.
    fn handle(&self, details: NavigationDetails, signal: CancelSignal) -> HandlerFuture;
}

// ============================================================================
// handler_fn helper
// ============================================================================

/// Create a handler from an async closure.
pub const fn handler_fn<F, Fut>(f: F) -> FnHandler<F>
where
    F: Fn(NavigationDetails, CancelSignal) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    FnHandler { f }
}

/// Handler created from an async closure.
pub struct FnHandler<F> {
    f: F,
}

impl<F, Fut> RouteHandler for FnHandler<F>
where
    F: Fn(NavigationDetails, CancelSignal) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    fn handle(&self, details: NavigationDetails, signal: CancelSignal) -> HandlerFuture {
        Box::pin((self.f)(details, signal))
    }
}

// ============================================================================
// sync_handler_fn helper
// ============================================================================

/// Create a handler from a plain closure.
///
/// The closure runs when the navigator invokes the handler; its result is
/// delivered as an already-completed future.
pub const fn sync_handler_fn<F>(f: F) -> SyncFnHandler<F>
where
    F: Fn(NavigationDetails, CancelSignal) -> HandlerResult + Send + Sync + 'static,
{
    SyncFnHandler { f }
}

/// Handler created from a plain closure.
pub struct SyncFnHandler<F> {
    f: F,
}

impl<F> RouteHandler for SyncFnHandler<F>
where
    F: Fn(NavigationDetails, CancelSignal) -> HandlerResult + Send + Sync + 'static,
{
    fn handle(&self, details: NavigationDetails, signal: CancelSignal) -> HandlerFuture {
        let result = (self.f)(details, signal);
        Box::pin(std::future::ready(result))
    }
}
