//! Raw FFI declarations for the subset of libmongoc this workspace binds:
//! global initialization, log-handler registration, log emission, trace
//! toggles and version queries.
//!
//! Everything here is a 1:1 mirror of the C API. Safe wrappers live in the
//! `mongoc` crate; nothing in this crate should be called directly from
//! application code.

#![allow(non_camel_case_types)]

use libc::{c_char, c_int, c_void};

/// Mirror of `mongoc_log_level_t`. Lower values are more severe.
pub type mongoc_log_level_t = c_int;

pub const MONGOC_LOG_LEVEL_ERROR: mongoc_log_level_t = 0;
pub const MONGOC_LOG_LEVEL_CRITICAL: mongoc_log_level_t = 1;
pub const MONGOC_LOG_LEVEL_WARNING: mongoc_log_level_t = 2;
pub const MONGOC_LOG_LEVEL_MESSAGE: mongoc_log_level_t = 3;
pub const MONGOC_LOG_LEVEL_INFO: mongoc_log_level_t = 4;
pub const MONGOC_LOG_LEVEL_DEBUG: mongoc_log_level_t = 5;
pub const MONGOC_LOG_LEVEL_TRACE: mongoc_log_level_t = 6;

/// Mirror of `mongoc_log_func_t`: the callback libmongoc invokes for every
/// log event. May be called concurrently from the driver's own threads.
pub type mongoc_log_func_t = Option<
    unsafe extern "C" fn(
        log_level: mongoc_log_level_t,
        log_domain: *const c_char,
        message: *const c_char,
        user_data: *mut c_void,
    ),
>;

extern "C" {
    /// One-time global setup of the driver. Must run before any other
    /// libmongoc call; there is no corresponding teardown bound here, the
    /// process exit releases everything.
    pub fn mongoc_init();

    /// Installs `log_func` as the process-wide log handler. `user_data` is
    /// passed back verbatim on every invocation.
    pub fn mongoc_log_set_handler(log_func: mongoc_log_func_t, user_data: *mut c_void);

    /// Emits a log event through the installed handler. `format` is a
    /// printf-style format string.
    pub fn mongoc_log(
        log_level: mongoc_log_level_t,
        log_domain: *const c_char,
        format: *const c_char,
        ...
    );

    pub fn mongoc_log_trace_enable();
    pub fn mongoc_log_trace_disable();

    /// Returns a pointer to a static version string, e.g. `"1.27.2"`.
    pub fn mongoc_get_version() -> *const c_char;

    /// True when the loaded library is at least the required version.
    pub fn mongoc_check_version(
        required_major: c_int,
        required_minor: c_int,
        required_micro: c_int,
    ) -> bool;

    pub fn mongoc_get_major_version() -> c_int;
    pub fn mongoc_get_minor_version() -> c_int;
    pub fn mongoc_get_micro_version() -> c_int;
}
