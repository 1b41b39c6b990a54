//! Logging macros.
//!
//! The engine never names a logging crate directly. Every call site goes
//! through one of the five macros below, which forward to [`log`] or
//! [`tracing`] depending on the enabled feature (`log` is the default; enable
//! at most one). With neither feature the macros expand to nothing, so
//! arguments that only appear in a log line should be bound as `_name`.
//!
//! | Level | Macro | What the navigator reports |
//! |-------|-------|----------------------------|
//! | trace | `trace_log!` | resolve cache hits and misses, route inserts, handler invocation |
//! | debug | `debug_log!` | navigate decisions: ignored, accepted, results discarded after cancel |
//! | info  | `info_log!`  | registrations, commits, cancellations and supersedes |
//! | warn  | `warn_log!`  | rejections: no route matched, handler failed |
//! | error | `error_log!` | a navigation task dropped before it settled |
//!
//! The macros expand to statements, so use them in statement position (wrap
//! them in a block inside `match` arms).
//!
//! [`log`]: https://docs.rs/log
//! [`tracing`]: https://docs.rs/tracing

#[doc(hidden)]
#[macro_export]
macro_rules! __navigator_log {
    ($level:ident, $($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::$level!($($arg)*);
        #[cfg(feature = "log")]
        ::log::$level!($($arg)*);
    };
}

/// Log at trace level.
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        $crate::__navigator_log!(trace, $($arg)*);
    };
}

/// Log at debug level.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::__navigator_log!(debug, $($arg)*);
    };
}

/// Log at info level.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        $crate::__navigator_log!(info, $($arg)*);
    };
}

/// Log at warn level.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        $crate::__navigator_log!(warn, $($arg)*);
    };
}

/// Log at error level.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        $crate::__navigator_log!(error, $($arg)*);
    };
}
