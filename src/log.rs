//! Log routing between libmongoc and the host process.
//!
//! libmongoc reports every internal diagnostic through a single
//! process-wide callback. [`crate::init`] points that callback at the
//! trampoline in this module, which converts the raw C event into Rust
//! types and hands it to the currently registered handler. The default
//! handler forwards events to `tracing`; hosts that need something else
//! install their own with [`set_log_handler`].

use std::borrow::Cow;
use std::ffi::CStr;
use std::fmt;
use std::panic;
use std::str::FromStr;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use libc::{c_char, c_void};
use once_cell::sync::Lazy;
use thiserror::Error;

use mongoc_sys as sys;

/// Severity of a libmongoc log event, mirroring `mongoc_log_level_t`.
///
/// Ordered by severity: `Error` is the most severe, `Trace` the least.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Error,
    Critical,
    Warning,
    Message,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub(crate) fn from_raw(raw: sys::mongoc_log_level_t) -> Option<LogLevel> {
        match raw {
            sys::MONGOC_LOG_LEVEL_ERROR => Some(LogLevel::Error),
            sys::MONGOC_LOG_LEVEL_CRITICAL => Some(LogLevel::Critical),
            sys::MONGOC_LOG_LEVEL_WARNING => Some(LogLevel::Warning),
            sys::MONGOC_LOG_LEVEL_MESSAGE => Some(LogLevel::Message),
            sys::MONGOC_LOG_LEVEL_INFO => Some(LogLevel::Info),
            sys::MONGOC_LOG_LEVEL_DEBUG => Some(LogLevel::Debug),
            sys::MONGOC_LOG_LEVEL_TRACE => Some(LogLevel::Trace),
            _ => None,
        }
    }

    pub(crate) fn to_raw(self) -> sys::mongoc_log_level_t {
        match self {
            LogLevel::Error => sys::MONGOC_LOG_LEVEL_ERROR,
            LogLevel::Critical => sys::MONGOC_LOG_LEVEL_CRITICAL,
            LogLevel::Warning => sys::MONGOC_LOG_LEVEL_WARNING,
            LogLevel::Message => sys::MONGOC_LOG_LEVEL_MESSAGE,
            LogLevel::Info => sys::MONGOC_LOG_LEVEL_INFO,
            LogLevel::Debug => sys::MONGOC_LOG_LEVEL_DEBUG,
            LogLevel::Trace => sys::MONGOC_LOG_LEVEL_TRACE,
        }
    }

    /// Lowercase name of the level, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Critical => "critical",
            LogLevel::Warning => "warning",
            LogLevel::Message => "message",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by [`LogLevel`]'s `FromStr` impl for unrecognized names.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown log level '{0}'")]
pub struct ParseLogLevelError(String);

impl FromStr for LogLevel {
    type Err = ParseLogLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "critical" => Ok(LogLevel::Critical),
            "warning" => Ok(LogLevel::Warning),
            "message" => Ok(LogLevel::Message),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(ParseLogLevelError(s.to_string())),
        }
    }
}

type Handler = dyn Fn(LogLevel, &str, &str) + Send + Sync;

static HANDLER: Lazy<RwLock<Arc<Handler>>> =
    Lazy::new(|| RwLock::new(Arc::new(tracing_handler)));

static MAX_LEVEL: AtomicI32 = AtomicI32::new(sys::MONGOC_LOG_LEVEL_TRACE);

/// Replaces the handler that receives the driver's log events.
///
/// The handler is invoked once per event with the severity, the
/// originating libmongoc subsystem (the "domain", e.g. `"cluster"`), and
/// the message text. libmongoc may call it concurrently from its own
/// threads, so it must be cheap and must not block; a panicking handler is
/// contained before it can unwind into the driver, but the event is lost.
pub fn set_log_handler<F>(handler: F)
where
    F: Fn(LogLevel, &str, &str) + Send + Sync + 'static,
{
    *HANDLER.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(handler);
}

/// Restores the default handler, which forwards events to `tracing` under
/// the `mongoc` target at the closest matching level.
pub fn reset_log_handler() {
    *HANDLER.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(tracing_handler);
}

/// Drops events less severe than `level` before they reach the handler.
///
/// The default is [`LogLevel::Trace`]: everything the driver emits is
/// forwarded. Trace events are additionally gated by the driver's own
/// switch ([`trace_enable`]/[`trace_disable`]).
pub fn set_max_log_level(level: LogLevel) {
    MAX_LEVEL.store(level.to_raw(), Ordering::Relaxed);
}

/// Current forwarding threshold.
pub fn max_log_level() -> LogLevel {
    LogLevel::from_raw(MAX_LEVEL.load(Ordering::Relaxed)).unwrap_or(LogLevel::Trace)
}

/// Enables trace-level output from the driver.
///
/// Only effective when libmongoc itself was compiled with tracing support.
pub fn trace_enable() {
    unsafe { sys::mongoc_log_trace_enable() }
}

/// Disables trace-level output from the driver.
pub fn trace_disable() {
    unsafe { sys::mongoc_log_trace_disable() }
}

fn tracing_handler(level: LogLevel, domain: &str, message: &str) {
    match level {
        LogLevel::Error | LogLevel::Critical => {
            tracing::error!(target: "mongoc", domain, "{message}")
        }
        LogLevel::Warning => tracing::warn!(target: "mongoc", domain, "{message}"),
        LogLevel::Message | LogLevel::Info => tracing::info!(target: "mongoc", domain, "{message}"),
        LogLevel::Debug => tracing::debug!(target: "mongoc", domain, "{message}"),
        LogLevel::Trace => tracing::trace!(target: "mongoc", domain, "{message}"),
    }
}

fn dispatch(level: LogLevel, domain: &str, message: &str) {
    if level > max_log_level() {
        return;
    }
    let handler = Arc::clone(&HANDLER.read().unwrap_or_else(PoisonError::into_inner));
    handler(level, domain, message);
}

/// The callback registered with `mongoc_log_set_handler`.
///
/// Runs on whatever thread libmongoc emits from; the user-data pointer is
/// unused because handler state lives in [`HANDLER`].
pub(crate) unsafe extern "C" fn log_trampoline(
    raw_level: sys::mongoc_log_level_t,
    raw_domain: *const c_char,
    raw_message: *const c_char,
    _user_data: *mut c_void,
) {
    // An out-of-range level means a newer libmongoc than these bindings
    // know about; surface the event as a warning rather than dropping it.
    let level = LogLevel::from_raw(raw_level).unwrap_or(LogLevel::Warning);
    let domain: Cow<'_, str> = if raw_domain.is_null() {
        Cow::Borrowed("")
    } else {
        CStr::from_ptr(raw_domain).to_string_lossy()
    };
    let message: Cow<'_, str> = if raw_message.is_null() {
        Cow::Borrowed("")
    } else {
        CStr::from_ptr(raw_message).to_string_lossy()
    };
    // A panic must not unwind across the C boundary.
    let _ = panic::catch_unwind(panic::AssertUnwindSafe(|| {
        dispatch(level, &domain, &message);
    }));
}
