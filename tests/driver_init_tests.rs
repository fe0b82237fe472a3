//! Driver Lifecycle Tests
//!
//! End-to-end checks against the loaded libmongoc:
//! - One-time initialization (repeated calls are no-ops)
//! - Version queries after init
//! - Log events reaching the registered handler exactly once
//! - Threshold filtering and trace gating
//! - Default forwarding into `tracing`

use std::ffi::CString;
use std::sync::{Arc, Mutex};

use mongoc::LogLevel;
use mongoc_sys as sys;

/// In-memory writer for capturing formatted subscriber output.
#[derive(Clone)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Emits one event through libmongoc's log entry point, exactly as the
/// driver's own subsystems do.
fn emit(raw_level: sys::mongoc_log_level_t, domain: &str, message: &str) {
    let domain = CString::new(domain).unwrap();
    let format = CString::new("%s").unwrap();
    let message = CString::new(message).unwrap();
    unsafe {
        sys::mongoc_log(raw_level, domain.as_ptr(), format.as_ptr(), message.as_ptr());
    }
}

// The handler slot and init guard are process-wide, so everything runs in
// a single test function.
#[test]
fn test_init_version_and_log_routing() {
    mongoc::init();
    mongoc::init(); // second call must be a no-op

    // A trivial operation succeeding is the observable proof that the
    // driver is ready.
    let version = mongoc::version();
    assert!(!version.is_empty());
    assert!(mongoc::check_version(
        mongoc::major_version(),
        mongoc::minor_version(),
        mongoc::micro_version(),
    ));
    assert!(mongoc::check_version(1, 0, 0));
    assert!(!mongoc::check_version(i32::MAX, 0, 0));

    let events: Arc<Mutex<Vec<(LogLevel, String, String)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    mongoc::set_log_handler(move |level, domain, message| {
        sink.lock()
            .unwrap()
            .push((level, domain.to_string(), message.to_string()));
    });

    emit(sys::MONGOC_LOG_LEVEL_WARNING, "cluster", "no suitable servers");
    emit(sys::MONGOC_LOG_LEVEL_INFO, "topology", "scan complete");

    {
        let seen = events.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(
            seen[0],
            (
                LogLevel::Warning,
                "cluster".to_string(),
                "no suitable servers".to_string(),
            )
        );
        assert_eq!(seen[1].0, LogLevel::Info);
        assert!(!seen[1].2.is_empty());
    }

    // Events below the threshold are dropped before the handler runs.
    mongoc::set_max_log_level(LogLevel::Warning);
    emit(sys::MONGOC_LOG_LEVEL_DEBUG, "socket", "poll timeout");
    assert_eq!(events.lock().unwrap().len(), 2);
    mongoc::set_max_log_level(LogLevel::Trace);

    // Trace gating depends on the libmongoc build: libraries compiled
    // without tracing support ignore the toggles and drop trace output
    // unconditionally, and tracing-enabled builds start with trace ON.
    // Disabling first gives a known state on every build.
    mongoc::trace_disable();
    emit(sys::MONGOC_LOG_LEVEL_TRACE, "stream", "dropped while disabled");
    assert_eq!(events.lock().unwrap().len(), 2);

    mongoc::trace_enable();
    emit(sys::MONGOC_LOG_LEVEL_TRACE, "stream", "visible while enabled");
    let delivered = {
        let seen = events.lock().unwrap();
        // Whether the event arrives depends on the build; when it does,
        // it must arrive intact.
        match seen.len() {
            2 => false,
            3 => {
                assert_eq!(seen[2].0, LogLevel::Trace);
                assert_eq!(seen[2].1, "stream");
                assert_eq!(seen[2].2, "visible while enabled");
                true
            }
            n => panic!("expected 2 or 3 events, got {n}"),
        }
    };

    // After disable, trace output is dropped on every build.
    mongoc::trace_disable();
    emit(sys::MONGOC_LOG_LEVEL_TRACE, "stream", "dropped again");
    assert_eq!(events.lock().unwrap().len(), if delivered { 3 } else { 2 });

    mongoc::reset_log_handler();

    // With the default handler restored, events must surface through
    // `tracing` under the `mongoc` target.
    let captured = SharedBuf(Arc::new(Mutex::new(Vec::new())));
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        emit(sys::MONGOC_LOG_LEVEL_WARNING, "cluster", "heartbeat failed");
    });
    let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("WARN"), "unexpected output: {output}");
    assert!(output.contains("mongoc"), "unexpected output: {output}");
    assert!(output.contains("cluster"), "unexpected output: {output}");
    assert!(output.contains("heartbeat failed"), "unexpected output: {output}");
}
