//! Rust binding for the libmongoc C driver's process-lifecycle surface.
//!
//! The crate covers exactly three concerns:
//! - one-time global initialization of the driver ([`init`]);
//! - routing of the driver's internal log events into the host process,
//!   by default through `tracing` ([`set_log_handler`], [`LogLevel`]);
//! - version queries against the loaded library ([`version`],
//!   [`check_version`]).
//!
//! Connection handling, queries and the wire protocol are libmongoc's own
//! business and are not wrapped here.
//!
//! # Example
//!
//! ```no_run
//! mongoc::init();
//! tracing::info!("libmongoc {} ready", mongoc::version());
//! ```

mod init;
mod log;
mod version;

pub use init::init;
pub use log::{
    max_log_level, reset_log_handler, set_log_handler, set_max_log_level, trace_disable,
    trace_enable, LogLevel, ParseLogLevelError,
};
pub use version::{check_version, major_version, micro_version, minor_version, version};
