//! Emission macros gated on a [`Logger`](crate::Logger) threshold.
//!
//! Each macro takes a logger (anything that dereferences to `Logger`, such as
//! `Arc<Logger>`) followed by `format!`-style arguments. The message is forwarded to
//! `tracing` with the module name in the `module` field, and only when the logger's
//! current level lets it through.

#[doc(hidden)]
#[macro_export]
macro_rules! __chanlog_event {
    ($level:expr, $tracing_level:expr, $logger:expr, $($arg:tt)+) => {{
        let logger: &$crate::Logger = &$logger;
        if logger.is_enabled($level) {
            $crate::__private::tracing::event!($tracing_level, module = logger.name(), $($arg)+);
        }
    }};
}

/// Emits a `TRACE` message through `logger`.
#[macro_export]
macro_rules! log_trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__chanlog_event!($crate::Level::Trace, $crate::__private::tracing::Level::TRACE, $logger, $($arg)+)
    };
}

/// Emits a `DEBUG` message through `logger`.
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__chanlog_event!($crate::Level::Debug, $crate::__private::tracing::Level::DEBUG, $logger, $($arg)+)
    };
}

/// Emits an `INFO` message through `logger`.
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__chanlog_event!($crate::Level::Info, $crate::__private::tracing::Level::INFO, $logger, $($arg)+)
    };
}

/// Emits a `WARN` message through `logger`.
#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__chanlog_event!($crate::Level::Warn, $crate::__private::tracing::Level::WARN, $logger, $($arg)+)
    };
}

/// Emits an `ERROR` message through `logger`.
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__chanlog_event!($crate::Level::Error, $crate::__private::tracing::Level::ERROR, $logger, $($arg)+)
    };
}

/// Emits a `FATAL` message through `logger`. Tracing has no fatal level, so the event
/// is recorded as `ERROR` with `fatal = true`.
#[macro_export]
macro_rules! log_fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__chanlog_event!($crate::Level::Fatal, $crate::__private::tracing::Level::ERROR, $logger, fatal = true, $($arg)+)
    };
}
