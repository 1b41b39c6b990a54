//! Error handling for the navigator.
//!
//! A navigation outcome is `Result<bool, NavigationError>`:
//!
//! - `Ok(true)` — the navigation committed.
//! - `Ok(false)` — the navigation was ignored, superseded or canceled.
//!   Cancellation is never an error.
//! - `Err(NavigationError)` — the navigation was rejected.
//!
//! # Examples
//!
//! ```
//! use navigator_core::NavigationError;
//!
//! let err = NavigationError::NoRouteMatched { url: "/nowhere".into() };
//! assert!(err.is_no_route());
//! assert_eq!(err.url(), "/nowhere");
//! assert_eq!(err.to_string(), "No route matched '/nowhere'");
//! ```

use thiserror::Error;

/// Error type returned by route handlers.
///
/// Any `std::error::Error + Send + Sync` converts into it with `?` or
/// `.into()`, including plain strings.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type returned by route handlers.
pub type HandlerResult = Result<(), HandlerError>;

/// Reasons a navigation outcome is rejected.
///
/// Neither variant corrupts navigator state: on any error the pending request
/// is cleared and the current navigation record is left untouched.
#[derive(Debug, Error)]
pub enum NavigationError {
    /// No registered pattern is a prefix of the requested url.
    #[error("No route matched '{url}'")]
    NoRouteMatched { url: String },

    /// The matched handler failed and the navigation had not been canceled.
    #[error("Handler for route '{route}' failed navigating to '{url}': {source}")]
    HandlerFailed {
        url: String,
        route: String,
        #[source]
        source: HandlerError,
    },

    /// The resolution task was dropped before it could settle the outcome
    /// (handler panic or runtime shutdown).
    #[error("Navigation to '{url}' was interrupted before it settled")]
    Interrupted { url: String },
}

impl NavigationError {
    /// Check if no route matched the url
    pub fn is_no_route(&self) -> bool {
        matches!(self, NavigationError::NoRouteMatched { .. })
    }

    /// Check if the route handler failed
    pub fn is_handler_failure(&self) -> bool {
        matches!(self, NavigationError::HandlerFailed { .. })
    }

    /// Check if the navigation task was interrupted
    pub fn is_interrupted(&self) -> bool {
        matches!(self, NavigationError::Interrupted { .. })
    }

    /// The url of the rejected navigation.
    pub fn url(&self) -> &str {
        match self {
            NavigationError::NoRouteMatched { url }
            | NavigationError::HandlerFailed { url, .. }
            | NavigationError::Interrupted { url } => url,
        }
    }
}

/// Returned by [`CancelSignal::check`](crate::CancelSignal::check) once the
/// signal has been aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Navigation aborted")]
pub struct Aborted;
