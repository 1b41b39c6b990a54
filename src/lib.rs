//! # navigator-core
//!
//! A navigation coordinator: independently registered handlers react to url
//! changes, handlers may be asynchronous (fetch data, load code lazily), and
//! every navigation can be canceled, superseded or redirected while it runs.
//!
//! The crate implements the request lifecycle only. History synchronization,
//! link interception and rendering are left to whoever subscribes to the
//! [`NavigationEvent`]s.
//!
//! # Quick start
//!
//! ```
//! use navigator_core::{handler_fn, sync_handler_fn, NavigationEvent, Navigator};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let navigator = Navigator::new();
//! let mut events = navigator.subscribe();
//!
//! // Catch-all, lowest priority because it is registered first.
//! navigator.register("", sync_handler_fn(|_details, _signal| Ok(())));
//!
//! let users = navigator.register("/users", handler_fn(|_details, signal| async move {
//!     // load data for the url, bail out if the navigation was abandoned
//!     signal.check()?;
//!     Ok(())
//! }));
//!
//! assert!(navigator.navigate("/users/42").await.unwrap());
//! assert_eq!(navigator.current().unwrap().route, "/users");
//!
//! users.unregister();
//! assert!(navigator.navigate("/users/43").await.unwrap());
//! assert_eq!(navigator.current().unwrap().route, "");
//!
//! while let Ok(event) = events.try_recv() {
//!     if let NavigationEvent::NavigationEnded { url, .. } = event {
//!         println!("now at {url}");
//!     }
//! }
//! # }
//! ```
//!
//! # Features
//!
//! | Feature   | Default | Description |
//! |-----------|---------|-------------|
//! | `log`     | yes     | Log through the `log` crate |
//! | `tracing` | no      | Log through the `tracing` crate |
//! | `cache`   | yes     | LRU cache for url → route resolution |
//!
//! # Modules
//!
//! - [`navigator`] — the engine: navigate, cancel, commit.
//! - [`registry`] — prefix-matched routes, most recent first.
//! - [`abort`] — cooperative cancellation signals.
//! - [`handler`] — the [`RouteHandler`] trait and closure adapters.
//! - [`events`] — the event bus.
//! - [`state`] — navigation records and snapshots.
//! - [`error`] — [`NavigationError`].

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod abort;
#[cfg(feature = "cache")]
pub mod cache;
pub mod error;
pub mod events;
pub mod handler;
pub mod logging;
pub mod navigator;
mod outcome;
pub mod registry;
pub mod state;

pub use abort::{create_signal, AbortHandle, CancelSignal};
#[cfg(feature = "cache")]
pub use cache::CacheStats;
pub use error::{Aborted, HandlerError, HandlerResult, NavigationError};
pub use events::{EventBus, NavigationEvent};
pub use handler::{
    handler_fn, sync_handler_fn, FnHandler, HandlerFuture, NavigationDetails, RouteHandler,
    SyncFnHandler,
};
pub use navigator::{NavigateOptions, Navigator, NavigatorBuilder, RouteRegistration};
pub use outcome::NavigationOutcome;
pub use registry::{RouteEntry, RouteId, RouteRegistry};
pub use state::{NavigationPhase, NavigationRecord, NavigationSnapshot, PendingSnapshot};
