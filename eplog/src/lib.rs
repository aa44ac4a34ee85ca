//! Logging runtime for instrumented programs.
//!
//! Instrumented units call two routines: `init`, which sets up the logging
//! backend once and returns a status, and `log_function_call`, which records
//! that a function was entered. Both are methods on a [`Logger`] handle that
//! callers acquire once and pass around; the handle owns its "initialized"
//! state instead of relying on an ambient global, and its first use performs
//! the initialization lazily.
//!
//! Failures never propagate to instrumented code: a backend that cannot be
//! opened or written to downgrades logging to a no-op with a `warn!` on the
//! diagnostic facade.
use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::PathBuf,
    sync::OnceLock,
};

use chrono::{DateTime, Utc};
use log::warn;
use parking_lot::Mutex;

/// One function-entry event.
pub struct LogRecord<'a> {
    /// Name of the function that was entered.
    pub function: &'a str,
    /// When the entry was recorded.
    pub at: DateTime<Utc>,
}

/// Callback sink receiving every record, for embedders that bring their own
/// backend.
pub type LogSink = Box<dyn Fn(&LogRecord<'_>) + Send + Sync>;

/// Backend selection, fixed at handle construction.
pub enum LoggerBackend {
    /// Append one line per record to the file at this path. The file is
    /// opened lazily on first use.
    File(PathBuf),
    /// Hand every record to a callback.
    Callback(LogSink),
}

enum Backend {
    File(Mutex<File>),
    Callback(LogSink),
}

/// Handle to the logging backend.
///
/// Cheap to share by reference; all methods take `&self`. Initialization
/// runs at most once, on the first call to [`Logger::init`] or
/// [`Logger::log_function_call`], and its outcome is sticky: a failed
/// initialization is never retried.
pub struct Logger {
    config: Mutex<Option<LoggerBackend>>,
    backend: OnceLock<Option<Backend>>,
}

impl Logger {
    pub fn new(backend: LoggerBackend) -> Self {
        Self {
            config: Mutex::new(Some(backend)),
            backend: OnceLock::new(),
        }
    }

    /// Logger appending to the file at `path`.
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self::new(LoggerBackend::File(path.into()))
    }

    /// Logger handing records to `sink`.
    pub fn with_sink(sink: LogSink) -> Self {
        Self::new(LoggerBackend::Callback(sink))
    }

    fn backend(&self) -> Option<&Backend> {
        self.backend
            .get_or_init(|| {
                let config = self.config.lock().take()?;
                match config {
                    LoggerBackend::File(path) => {
                        match OpenOptions::new().create(true).append(true).open(&path) {
                            Ok(file) => Some(Backend::File(Mutex::new(file))),
                            Err(err) => {
                                warn!("cannot open function-call log {:?}: {}", path, err);
                                None
                            }
                        }
                    }
                    LoggerBackend::Callback(sink) => Some(Backend::Callback(sink)),
                }
            })
            .as_ref()
    }

    /// One-time setup of the logging backend.
    ///
    /// Returns `0` on success and a non-zero status on failure. Callers are
    /// not required to check the result; a failed backend simply swallows
    /// subsequent records.
    pub fn init(&self) -> i64 {
        if self.backend().is_some() { 0 } else { -1 }
    }

    /// Record that the function named `function` was entered.
    ///
    /// Safe to call without prior [`Logger::init`]; the first call
    /// initializes the backend. Backend failures are swallowed.
    pub fn log_function_call(&self, function: &str) {
        let Some(backend) = self.backend() else {
            return;
        };
        let record = LogRecord {
            function,
            at: Utc::now(),
        };
        match backend {
            Backend::File(file) => {
                let mut file = file.lock();
                if let Err(err) = writeln!(file, "{} {}", record.at.to_rfc3339(), record.function)
                {
                    warn!("cannot append function-call record: {}", err);
                }
            }
            Backend::Callback(sink) => sink(&record),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn capturing_logger() -> (Logger, Arc<Mutex<Vec<String>>>) {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&captured);
        let logger = Logger::with_sink(Box::new(move |record| {
            sink.lock().push(record.function.to_string());
        }));
        (logger, captured)
    }

    #[test]
    fn records_reach_the_sink() {
        let (logger, captured) = capturing_logger();
        logger.log_function_call("foo");
        logger.log_function_call("bar");
        assert_eq!(*captured.lock(), vec!["foo", "bar"]);
    }

    #[test]
    fn init_is_lazy_and_sticky() {
        let (logger, _captured) = capturing_logger();
        assert_eq!(logger.init(), 0);
        assert_eq!(logger.init(), 0);
    }

    #[test]
    fn file_backend_appends_lines() {
        let path = std::env::temp_dir().join(format!("eplog-test-{}", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let logger = Logger::with_file(&path);
        logger.log_function_call("foo");
        logger.log_function_call("bar");

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" foo"));
        assert!(lines[1].ends_with(" bar"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn failed_backend_is_swallowed() {
        let logger = Logger::with_file("/nonexistent-dir/eplog/calls.log");
        assert_eq!(logger.init(), -1);
        // Must not panic or retry initialization.
        logger.log_function_call("foo");
        assert_eq!(logger.init(), -1);
    }
}
