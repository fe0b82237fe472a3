use std::ptr;
use std::sync::Once;

use crate::log;

static INIT: Once = Once::new();

/// Prepares libmongoc for use.
///
/// Performs the driver's one-time global setup and installs the handler
/// that forwards its internal log events to the host process (see
/// [`crate::set_log_handler`]). Call this from the startup path before any
/// other interaction with the driver; every call after the first is a
/// no-op, so callers do not need their own guard.
///
/// The underlying setup does not report failure. If the platform cannot
/// support the driver at all, the failure is fatal inside libmongoc itself
/// rather than surfaced here.
///
/// There is no teardown: the driver's global state lives until process
/// exit.
pub fn init() {
    INIT.call_once(|| unsafe {
        mongoc_sys::mongoc_init();
        // Handler state lives on the Rust side, so the C user-data pointer
        // stays null.
        mongoc_sys::mongoc_log_set_handler(Some(log::log_trampoline), ptr::null_mut());
    });
}
